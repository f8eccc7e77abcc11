//! # Blood Type Vocabulary
//!
//! The eight ABO/Rh blood types and a compact set representation used by
//! compatibility policies and search filters.
//!
//! `BloodTypeSet` is a `u8` bitmask: one bit per ABO/Rh type. Sets are
//! `Copy`, cheap to pass across ports, and iterate in canonical order
//! (the order of [`BloodType::ALL`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the eight ABO/Rh blood types.
///
/// Serialized in clinical notation (`"A+"`, `"O-"`, ...), matching the
/// format donors and requesters supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BloodType {
    #[serde(rename = "A+")]
    APos,
    #[serde(rename = "A-")]
    ANeg,
    #[serde(rename = "B+")]
    BPos,
    #[serde(rename = "B-")]
    BNeg,
    #[serde(rename = "AB+")]
    AbPos,
    #[serde(rename = "AB-")]
    AbNeg,
    #[serde(rename = "O+")]
    OPos,
    #[serde(rename = "O-")]
    ONeg,
}

impl BloodType {
    /// All eight types in canonical order.
    pub const ALL: [BloodType; 8] = [
        BloodType::APos,
        BloodType::ANeg,
        BloodType::BPos,
        BloodType::BNeg,
        BloodType::AbPos,
        BloodType::AbNeg,
        BloodType::OPos,
        BloodType::ONeg,
    ];

    /// Clinical notation for this type.
    pub fn as_str(self) -> &'static str {
        match self {
            BloodType::APos => "A+",
            BloodType::ANeg => "A-",
            BloodType::BPos => "B+",
            BloodType::BNeg => "B-",
            BloodType::AbPos => "AB+",
            BloodType::AbNeg => "AB-",
            BloodType::OPos => "O+",
            BloodType::ONeg => "O-",
        }
    }

    /// Position of this type in the canonical order (0..8).
    fn index(self) -> u8 {
        match self {
            BloodType::APos => 0,
            BloodType::ANeg => 1,
            BloodType::BPos => 2,
            BloodType::BNeg => 3,
            BloodType::AbPos => 4,
            BloodType::AbNeg => 5,
            BloodType::OPos => 6,
            BloodType::ONeg => 7,
        }
    }

    fn bit(self) -> u8 {
        1u8 << self.index()
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a recognized ABO/Rh type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized blood type: {0:?}")]
pub struct ParseBloodTypeError(pub String);

impl FromStr for BloodType {
    type Err = ParseBloodTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A+" => Ok(BloodType::APos),
            "A-" => Ok(BloodType::ANeg),
            "B+" => Ok(BloodType::BPos),
            "B-" => Ok(BloodType::BNeg),
            "AB+" => Ok(BloodType::AbPos),
            "AB-" => Ok(BloodType::AbNeg),
            "O+" => Ok(BloodType::OPos),
            "O-" => Ok(BloodType::ONeg),
            other => Err(ParseBloodTypeError(other.to_string())),
        }
    }
}

/// A set of blood types backed by a `u8` bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BloodTypeSet(u8);

impl BloodTypeSet {
    /// The empty set.
    pub const EMPTY: BloodTypeSet = BloodTypeSet(0);

    /// The set containing all eight types.
    pub const ALL: BloodTypeSet = BloodTypeSet(0xFF);

    /// A set containing exactly one type.
    pub fn only(blood_type: BloodType) -> Self {
        BloodTypeSet(blood_type.bit())
    }

    /// Builds a set from a slice of types.
    pub fn of(types: &[BloodType]) -> Self {
        types.iter().copied().collect()
    }

    /// Adds a type to the set.
    pub fn insert(&mut self, blood_type: BloodType) {
        self.0 |= blood_type.bit();
    }

    /// True if the set contains the given type.
    pub fn contains(self, blood_type: BloodType) -> bool {
        self.0 & blood_type.bit() != 0
    }

    /// Number of types in the set.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// True if the set is empty.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates members in canonical order.
    pub fn iter(self) -> impl Iterator<Item = BloodType> {
        BloodType::ALL.into_iter().filter(move |t| self.contains(*t))
    }
}

impl FromIterator<BloodType> for BloodTypeSet {
    fn from_iter<I: IntoIterator<Item = BloodType>>(iter: I) -> Self {
        let mut set = BloodTypeSet::EMPTY;
        for t in iter {
            set.insert(t);
        }
        set
    }
}

impl fmt::Display for BloodTypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, t) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{t}")?;
        }
        write!(f, "}}")
    }
}

//! # Engine Configuration
//!
//! Unified configuration for all subsystems and runtime parameters.
//!
//! Every knob has a sane default; deployments override through `HL_*`
//! environment variables. Unparsable overrides are logged and ignored
//! rather than refused, so a typo cannot keep the engine down.

use std::time::Duration;

use hl_01_geo_index::{GeoIndexConfig, MAX_CELL_SIZE_DEG, MIN_CELL_SIZE_DEG};
use hl_02_matching::{CompatibilityMode, MatchingConfig, MAX_RADIUS_KM};
use hl_03_donor_registry::RegistryConfig;
use hl_04_request_lifecycle::DocumentPolicy;
use thiserror::Error;
use tracing::warn;

/// Complete engine configuration.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// Geo index configuration.
    pub index: GeoIndexConfig,
    /// Matching engine configuration.
    pub matching: MatchingConfig,
    /// Which compatibility policy the matching engine runs.
    pub compatibility: CompatibilityMode,
    /// Donor registry acceptance thresholds.
    pub registry: RegistryConfig,
    /// Proof document policy.
    pub documents: DocumentPolicy,
}

impl ServiceConfig {
    /// Defaults overridden by any `HL_*` environment variables present.
    ///
    /// Recognized variables:
    /// - `HL_CELL_SIZE_DEG` — geo index cell edge, degrees
    /// - `HL_COMPATIBILITY` — `exact` or `medical`
    /// - `HL_DEFAULT_RADIUS_KM` — radius applied when a query has none
    /// - `HL_MATCH_TIMEOUT_MS` — default match time budget
    /// - `HL_MAX_DOCUMENT_MB` — proof document size cap
    pub fn load_from_env() -> Self {
        let mut config = ServiceConfig::default();

        if let Some(v) = env_f64("HL_CELL_SIZE_DEG") {
            config.index.cell_size_deg = v;
        }
        if let Ok(raw) = std::env::var("HL_COMPATIBILITY") {
            match raw.parse::<CompatibilityMode>() {
                Ok(mode) => config.compatibility = mode,
                Err(err) => warn!(value = %raw, %err, "ignoring HL_COMPATIBILITY"),
            }
        }
        if let Some(v) = env_f64("HL_DEFAULT_RADIUS_KM") {
            config.matching.default_radius_km = v;
        }
        if let Some(v) = env_u64("HL_MATCH_TIMEOUT_MS") {
            config.matching.default_timeout = Some(Duration::from_millis(v));
        }
        if let Some(v) = env_u64("HL_MAX_DOCUMENT_MB") {
            config.documents.max_bytes = (v as usize) * 1024 * 1024;
        }

        config
    }

    /// Validates the configuration before any subsystem is built.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any knob is outside the range its subsystem
    /// accepts; the engine refuses to start on a broken configuration
    /// rather than fail on the first request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cell = self.index.cell_size_deg;
        if !cell.is_finite() || !(MIN_CELL_SIZE_DEG..=MAX_CELL_SIZE_DEG).contains(&cell) {
            return Err(ConfigError::CellSize(cell));
        }

        let max = self.matching.max_radius_km;
        if !max.is_finite() || max <= 0.0 || max > MAX_RADIUS_KM {
            return Err(ConfigError::RadiusCap(max));
        }
        let default = self.matching.default_radius_km;
        if !default.is_finite() || default <= 0.0 || default > max {
            return Err(ConfigError::Radius { default, max });
        }

        if self.registry.min_age > self.registry.max_age {
            return Err(ConfigError::AgeBand {
                min: self.registry.min_age,
                max: self.registry.max_age,
            });
        }
        let weight = self.registry.min_weight_kg;
        if !weight.is_finite() || weight <= 0.0 {
            return Err(ConfigError::Weight(weight));
        }

        if self.documents.max_bytes == 0 {
            return Err(ConfigError::DocumentCap);
        }

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Cell size outside the range the geo index supports.
    #[error("cell size {0} degrees outside [{MIN_CELL_SIZE_DEG}, {MAX_CELL_SIZE_DEG}]")]
    CellSize(f64),

    /// Radius cap not positive or above the engine-wide maximum.
    #[error("maximum radius {0} km outside (0, {MAX_RADIUS_KM}]")]
    RadiusCap(f64),

    /// Default radius outside (0, max].
    #[error("default radius {default} km outside (0, {max}]")]
    Radius { default: f64, max: f64 },

    /// Registration age band is empty.
    #[error("age band {min}..={max} is empty")]
    AgeBand { min: u8, max: u8 },

    /// Minimum weight not positive.
    #[error("minimum weight {0} kg must be positive")]
    Weight(f64),

    /// Document cap of zero would reject every upload.
    #[error("document size cap must be positive")]
    DocumentCap,

    /// The geo index rejected its configuration at construction.
    #[error("geo index rejected configuration: {0}")]
    Index(String),
}

fn env_f64(name: &str) -> Option<f64> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(%name, value = %raw, "ignoring unparsable override");
            None
        }
    }
}

fn env_u64(name: &str) -> Option<u64> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(%name, value = %raw, "ignoring unparsable override");
            None
        }
    }
}

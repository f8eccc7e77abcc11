//! Grid quantization and ring geometry.
//!
//! The coordinate plane is cut into fixed-size cells indexed from the
//! south pole and the antimeridian: `lat_idx` counts rows northward from
//! -90°, `lng_idx` counts columns eastward from -180°. Longitude wraps
//! modulo the column count; latitude clamps at the poles.
//!
//! Proximity queries enumerate cells in expanding Chebyshev rings around
//! the origin cell. [`Grid::ring`] yields each grid cell exactly once
//! across all rings, even where longitude wrap would otherwise revisit
//! columns, so the ring sequence partitions the grid.

use serde::{Deserialize, Serialize};
use shared_types::Coordinate;

use super::errors::GeoIndexError;
use super::geo::EARTH_RADIUS_KM;

/// Smallest supported cell edge, in degrees (~1.1 km of latitude).
pub const MIN_CELL_SIZE_DEG: f64 = 0.01;

/// Largest supported cell edge, in degrees.
pub const MAX_CELL_SIZE_DEG: f64 = 45.0;

/// Index of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellKey {
    /// Row, counted northward from the south pole.
    pub lat_idx: i32,
    /// Column, counted eastward from the antimeridian.
    pub lng_idx: i32,
}

/// Immutable grid geometry shared by every index operation.
#[derive(Debug, Clone, Copy)]
pub struct Grid {
    cell_size_deg: f64,
    rows: i32,
    cols: i32,
}

impl Grid {
    /// Builds a grid with the given cell edge length in degrees.
    pub fn new(cell_size_deg: f64) -> Result<Self, GeoIndexError> {
        if !cell_size_deg.is_finite()
            || !(MIN_CELL_SIZE_DEG..=MAX_CELL_SIZE_DEG).contains(&cell_size_deg)
        {
            return Err(GeoIndexError::InvalidCellSize(cell_size_deg));
        }
        Ok(Grid {
            cell_size_deg,
            rows: (180.0 / cell_size_deg).ceil() as i32,
            cols: (360.0 / cell_size_deg).ceil() as i32,
        })
    }

    /// Number of latitude rows.
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of longitude columns.
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// The cell containing a coordinate.
    pub fn cell_of(&self, c: Coordinate) -> CellKey {
        let lat_idx = ((c.lat() + 90.0) / self.cell_size_deg) as i32;
        let lng_idx = ((c.lng() + 180.0) / self.cell_size_deg) as i32;
        // lat = 90.0 and lng = 180.0 land one past the last row/column.
        CellKey {
            lat_idx: lat_idx.clamp(0, self.rows - 1),
            lng_idx: lng_idx.clamp(0, self.cols - 1),
        }
    }

    /// Latitude bounds of a row, in degrees.
    fn lat_bounds(&self, lat_idx: i32) -> (f64, f64) {
        let lo = -90.0 + f64::from(lat_idx) * self.cell_size_deg;
        let hi = (lo + self.cell_size_deg).min(90.0);
        (lo, hi)
    }

    /// Longitude bounds of a column, in degrees.
    fn lng_bounds(&self, lng_idx: i32) -> (f64, f64) {
        let lo = -180.0 + f64::from(lng_idx) * self.cell_size_deg;
        let hi = (lo + self.cell_size_deg).min(180.0);
        (lo, hi)
    }

    /// Lower bound on the great-circle distance from `origin` to any point
    /// of the cell, in kilometers. Zero when the origin lies inside.
    ///
    /// Uses the haversine form with the clamped latitude/longitude
    /// separations and, for the longitude term, the smallest cosine over
    /// the cell's latitude band. Each term underestimates its true
    /// counterpart for every point of the cell, so the bound is safe for
    /// ring pruning at any latitude.
    pub fn min_distance_km(&self, origin: Coordinate, key: CellKey) -> f64 {
        let (lat_lo, lat_hi) = self.lat_bounds(key.lat_idx);
        let (lng_lo, lng_hi) = self.lng_bounds(key.lng_idx);

        let dlat_deg = if origin.lat() < lat_lo {
            lat_lo - origin.lat()
        } else if origin.lat() > lat_hi {
            origin.lat() - lat_hi
        } else {
            0.0
        };
        let dlng_deg = lng_separation_deg(origin.lng(), lng_lo, lng_hi);

        // Smallest cosine over the cell's latitude band: the edge farthest
        // from the equator.
        let band_extreme = lat_lo.abs().max(lat_hi.abs());
        let min_cos = band_extreme.to_radians().cos().max(0.0);

        let h = (dlat_deg.to_radians() / 2.0).sin().powi(2)
            + origin.lat().to_radians().cos() * min_cos * (dlng_deg.to_radians() / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
    }

    /// The cells at Chebyshev ring `k` around `center`. Ring 0 is the
    /// center cell alone. Rows outside the grid are clipped; columns wrap.
    ///
    /// Rings partition the grid: once the window spanned by earlier rings
    /// wraps the full column count, side columns stop being emitted and
    /// only the new top/bottom rows remain. An empty ring (k > 0) means
    /// the grid is exhausted in every direction.
    pub fn ring(&self, center: CellKey, k: i32) -> Vec<CellKey> {
        if k == 0 {
            return vec![center];
        }
        let mut out = Vec::new();

        // New top and bottom rows enter the ring whole.
        let width = (2 * k + 1).min(self.cols);
        for row in [center.lat_idx - k, center.lat_idx + k] {
            if row < 0 || row >= self.rows {
                continue;
            }
            for i in 0..width {
                out.push(CellKey {
                    lat_idx: row,
                    lng_idx: (center.lng_idx - k + i).rem_euclid(self.cols),
                });
            }
        }

        // Side columns of the interior rows, skipped once the interior
        // window already covers every column.
        if self.cols > 2 * k - 1 {
            // When cols == 2k the right column aliases the left one.
            let emit_right = self.cols > 2 * k;
            for row in (center.lat_idx - k + 1)..=(center.lat_idx + k - 1) {
                if row < 0 || row >= self.rows {
                    continue;
                }
                out.push(CellKey {
                    lat_idx: row,
                    lng_idx: (center.lng_idx - k).rem_euclid(self.cols),
                });
                if emit_right {
                    out.push(CellKey {
                        lat_idx: row,
                        lng_idx: (center.lng_idx + k).rem_euclid(self.cols),
                    });
                }
            }
        }
        out
    }
}

/// Wrap-aware angular separation from `lng` to the interval `[lo, hi]`,
/// in degrees. Zero when `lng` lies inside the interval.
fn lng_separation_deg(lng: f64, lo: f64, hi: f64) -> f64 {
    if (lo..=hi).contains(&lng) {
        return 0.0;
    }
    circular_delta_deg(lng, lo).min(circular_delta_deg(lng, hi))
}

/// Shorter angular distance between two longitudes, in [0, 180].
fn circular_delta_deg(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % 360.0;
    if d > 180.0 {
        360.0 - d
    } else {
        d
    }
}

//! Physical constants used by the circular-orbit model.
//!
//! The model works in mixed units: orbit heights are kept in kilometers,
//! positions and speeds are reported in meters and meters per second.

use std::time::Duration;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0090;

/// Earth's gravitational parameter in units of 1e10 km³/s².
///
/// `sqrt(EARTH_GM_KM_E10 / r_km) * SPEED_UNIT_FACTOR` yields m/s.
pub const EARTH_GM_KM_E10: f64 = 39.8600436;

/// Converts `sqrt(1e10 km³/s² / km)` into m/s.
pub const SPEED_UNIT_FACTOR: f64 = 1e5;

/// Kilometers to meters.
pub const METERS_PER_KM: f64 = 1000.0;

/// Length of one rotation of the Earth frame.
///
/// A flat 24 hours, not the sidereal day.
pub const EARTH_ROTATION_PERIOD: Duration = Duration::from_secs(24 * 3600);

/// Default attribute values.
pub const DEFAULT_ALTITUDE_KM: f64 = 1000.0;
pub const DEFAULT_INCLINATION_DEG: f64 = 10.0;
pub const DEFAULT_PRECISION: Duration = Duration::from_secs(1);

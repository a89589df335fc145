//! Orbit parameters and their validation.
//!
//! `OrbitConfig` holds the values the user configures (altitude in km,
//! inclination in degrees, update precision) in the units the kinematics
//! work with. Validation happens here, at the setter boundary; the
//! calculators in [`super::kinematics`] assume valid input.

use log::warn;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::time::Duration;

use super::constants::{
    DEFAULT_ALTITUDE_KM, DEFAULT_INCLINATION_DEG, DEFAULT_PRECISION, EARTH_RADIUS_KM, METERS_PER_KM,
};
use super::kinematics::orbital_speed;

/// Errors raised when configuring an orbit.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrbitError {
    #[error("Inclination must not be zero: the orbital plane would be undefined")]
    ZeroInclination,
    #[error("Inclination {0}° is outside (0°, 180°]")]
    InclinationOutOfRange(f64),
    #[error("Altitude {0} km puts the orbit at or below the Earth's surface")]
    AltitudeBelowSurface(f64),
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },
}

/// How strictly orbit parameters are checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Only a zero inclination is rejected. Other suspicious values are
    /// accepted with a warning.
    #[default]
    Permissive,
    /// Also rejects non-finite values, orbits at or below the surface and
    /// inclinations outside (0°, 180°].
    Strict,
}

/// How the propagator refreshes its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Every query recomputes; nothing is cached and no course change is
    /// ever reported.
    Continuous,
    /// Position is cached and recomputed every interval.
    Discrete(Duration),
}

impl UpdateMode {
    pub fn from_precision(precision: Duration) -> Self {
        if precision.is_zero() {
            UpdateMode::Continuous
        } else {
            UpdateMode::Discrete(precision)
        }
    }

    pub fn is_discrete(&self) -> bool {
        matches!(self, UpdateMode::Discrete(_))
    }
}

/// Orbit parameters shared by all kinematics calculators.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitConfig {
    /// Distance from the Earth's center in km
    orbit_height_km: f64,
    inclination_rad: f64,
    precision: Duration,
    policy: ValidationPolicy,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            orbit_height_km: EARTH_RADIUS_KM + DEFAULT_ALTITUDE_KM,
            inclination_rad: DEFAULT_INCLINATION_DEG.to_radians(),
            precision: DEFAULT_PRECISION,
            policy: ValidationPolicy::default(),
        }
    }
}

impl OrbitConfig {
    /// Build a configuration from user units.
    pub fn new(
        altitude_km: f64,
        inclination_deg: f64,
        precision: Duration,
        policy: ValidationPolicy,
    ) -> Result<Self, OrbitError> {
        let mut config = Self {
            policy,
            precision,
            ..Self::default()
        };
        config.set_altitude_km(altitude_km)?;
        config.set_inclination_deg(inclination_deg)?;
        Ok(config)
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// Altitude above the Earth's surface in km.
    pub fn altitude_km(&self) -> f64 {
        self.orbit_height_km - EARTH_RADIUS_KM
    }

    pub fn set_altitude_km(&mut self, altitude_km: f64) -> Result<(), OrbitError> {
        let below_surface = altitude_km <= 0.0;
        match self.policy {
            ValidationPolicy::Strict => {
                if !altitude_km.is_finite() {
                    return Err(OrbitError::NonFinite {
                        field: "altitude",
                        value: altitude_km,
                    });
                }
                if below_surface {
                    return Err(OrbitError::AltitudeBelowSurface(altitude_km));
                }
            }
            ValidationPolicy::Permissive => {
                if below_surface || !altitude_km.is_finite() {
                    warn!("Accepting altitude {} km that does not describe a valid orbit", altitude_km);
                }
            }
        }
        self.orbit_height_km = EARTH_RADIUS_KM + altitude_km;
        Ok(())
    }

    /// Inclination in degrees.
    pub fn inclination_deg(&self) -> f64 {
        (self.inclination_rad / PI) * 180.0
    }

    pub fn set_inclination_deg(&mut self, inclination_deg: f64) -> Result<(), OrbitError> {
        if inclination_deg == 0.0 {
            return Err(OrbitError::ZeroInclination);
        }
        let in_range = inclination_deg > 0.0 && inclination_deg <= 180.0;
        match self.policy {
            ValidationPolicy::Strict => {
                if !inclination_deg.is_finite() {
                    return Err(OrbitError::NonFinite {
                        field: "inclination",
                        value: inclination_deg,
                    });
                }
                if !in_range {
                    return Err(OrbitError::InclinationOutOfRange(inclination_deg));
                }
            }
            ValidationPolicy::Permissive => {
                if !in_range {
                    warn!("Accepting inclination {}° outside (0°, 180°]", inclination_deg);
                }
            }
        }
        self.inclination_rad = (inclination_deg / 180.0) * PI;
        Ok(())
    }

    pub fn precision(&self) -> Duration {
        self.precision
    }

    pub fn set_precision(&mut self, precision: Duration) {
        self.precision = precision;
    }

    pub fn update_mode(&self) -> UpdateMode {
        UpdateMode::from_precision(self.precision)
    }

    pub fn orbit_height_km(&self) -> f64 {
        self.orbit_height_km
    }

    pub fn orbit_height_m(&self) -> f64 {
        self.orbit_height_km * METERS_PER_KM
    }

    pub fn inclination_rad(&self) -> f64 {
        self.inclination_rad
    }

    /// Orbital speed in m/s.
    pub fn speed(&self) -> f64 {
        orbital_speed(self.orbit_height_km)
    }

    /// Time for one revolution of a circular orbit of this radius, in seconds.
    pub fn orbital_period_s(&self) -> f64 {
        TAU * self.orbit_height_m() / self.speed()
    }

    /// Time for the progress angle to advance one full turn, in seconds.
    ///
    /// Progress is measured along the Earth's circumference, so this is
    /// shorter than [`Self::orbital_period_s`].
    pub fn progress_period_s(&self) -> f64 {
        TAU * EARTH_RADIUS_KM * METERS_PER_KM / self.speed()
    }
}

/// The two free phase constants of an orbit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrbitPhase {
    /// Angular origin inside the rotating Earth frame
    pub longitude_offset_rad: f64,
    /// Initial angle of the satellite inside its orbital plane
    pub plane_offset_rad: f64,
}

impl OrbitPhase {
    pub fn new(longitude_offset_rad: f64, plane_offset_rad: f64) -> Self {
        Self {
            longitude_offset_rad,
            plane_offset_rad,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_attribute_defaults() {
        let config = OrbitConfig::default();
        assert!((config.altitude_km() - 1000.0).abs() < 1e-9);
        assert!((config.inclination_deg() - 10.0).abs() < 1e-9);
        assert_eq!(config.precision(), Duration::from_secs(1));
        assert_eq!(config.update_mode(), UpdateMode::Discrete(Duration::from_secs(1)));
        assert_eq!(config.policy(), ValidationPolicy::Permissive);
    }

    #[test]
    fn altitude_round_trips() {
        let mut config = OrbitConfig::default();
        for h in [0.5, 160.0, 550.0, 1200.0, 35_786.0, -100.0] {
            config.set_altitude_km(h).unwrap();
            assert!((config.altitude_km() - h).abs() < 1e-9, "altitude {}", h);
            assert!((config.orbit_height_km() - (EARTH_RADIUS_KM + h)).abs() < 1e-9);
        }
    }

    #[test]
    fn inclination_round_trips() {
        let mut config = OrbitConfig::default();
        for d in [0.001, 53.0, 87.0, 90.0, 97.6, 180.0, -45.0] {
            config.set_inclination_deg(d).unwrap();
            assert!((config.inclination_deg() - d).abs() < 1e-9, "inclination {}", d);
        }
    }

    #[test]
    fn zero_inclination_is_rejected_under_every_policy() {
        for policy in [ValidationPolicy::Permissive, ValidationPolicy::Strict] {
            let mut config = OrbitConfig::new(1000.0, 53.0, DEFAULT_PRECISION, policy).unwrap();
            assert_eq!(config.set_inclination_deg(0.0), Err(OrbitError::ZeroInclination));
            assert_eq!(config.set_inclination_deg(-0.0), Err(OrbitError::ZeroInclination));
            // Rejected value leaves the previous one in place
            assert!((config.inclination_deg() - 53.0).abs() < 1e-9);
        }
    }

    #[test]
    fn permissive_policy_accepts_suspicious_values() {
        let mut config = OrbitConfig::default();
        assert!(config.set_altitude_km(-10.0).is_ok());
        assert!(config.set_inclination_deg(200.0).is_ok());
        assert!(config.set_inclination_deg(-30.0).is_ok());
    }

    #[test]
    fn strict_policy_rejects_suspicious_values() {
        let mut config =
            OrbitConfig::new(1000.0, 53.0, DEFAULT_PRECISION, ValidationPolicy::Strict).unwrap();
        assert_eq!(config.set_altitude_km(0.0), Err(OrbitError::AltitudeBelowSurface(0.0)));
        assert_eq!(config.set_altitude_km(-10.0), Err(OrbitError::AltitudeBelowSurface(-10.0)));
        assert!(matches!(
            config.set_altitude_km(f64::INFINITY),
            Err(OrbitError::NonFinite { field: "altitude", .. })
        ));
        assert_eq!(
            config.set_inclination_deg(180.5),
            Err(OrbitError::InclinationOutOfRange(180.5))
        );
        assert!(matches!(
            config.set_inclination_deg(f64::NAN),
            Err(OrbitError::NonFinite { field: "inclination", .. })
        ));
        assert!(config.set_inclination_deg(180.0).is_ok());
        assert!((config.altitude_km() - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn zero_precision_means_continuous() {
        let mut config = OrbitConfig::default();
        config.set_precision(Duration::ZERO);
        assert_eq!(config.update_mode(), UpdateMode::Continuous);
        assert!(!config.update_mode().is_discrete());
    }

    #[test]
    fn periods_follow_speed() {
        let config = OrbitConfig::new(1000.0, 53.0, DEFAULT_PRECISION, ValidationPolicy::Strict).unwrap();
        // ~105 minutes at 1000 km
        assert!((config.orbital_period_s() / 60.0 - 105.0).abs() < 1.0);
        assert!(config.progress_period_s() < config.orbital_period_s());
    }
}

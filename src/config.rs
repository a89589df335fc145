use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

use crate::mobility::CircularOrbitModel;
use crate::orbit::constants::{DEFAULT_ALTITUDE_KM, DEFAULT_INCLINATION_DEG, DEFAULT_PRECISION};
use crate::orbit::{OrbitConfig, OrbitDescriptor, OrbitError, OrbitPhase, ValidationPolicy};

/// Top-level scenario configuration that mirrors the YAML file
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// General simulation settings
    pub general: GeneralConfig,
    /// Satellites to propagate
    pub satellites: Vec<SatelliteConfig>,
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.general.stop_time.is_zero() {
            return Err(ValidationError::InvalidGeneral(
                "stop_time must be greater than zero".to_string(),
            ));
        }
        if let Some(interval) = self.general.sample_interval {
            if interval.is_zero() {
                return Err(ValidationError::InvalidGeneral(
                    "sample_interval must be greater than zero".to_string(),
                ));
            }
        }

        if self.satellites.is_empty() {
            return Err(ValidationError::InvalidSatellite(
                "at least one satellite must be configured".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for satellite in &self.satellites {
            if satellite.id.trim().is_empty() {
                return Err(ValidationError::InvalidSatellite(
                    "satellite id cannot be empty".to_string(),
                ));
            }
            if !seen.insert(satellite.id.as_str()) {
                return Err(ValidationError::InvalidSatellite(format!(
                    "duplicate satellite id '{}'",
                    satellite.id
                )));
            }
            if satellite.orbit.is_some()
                && (satellite.altitude.is_some() || satellite.inclination.is_some())
            {
                return Err(ValidationError::InvalidSatellite(format!(
                    "satellite '{}' sets both 'orbit' and 'altitude'/'inclination'",
                    satellite.id
                )));
            }
            satellite
                .orbit_config(self.general.validation)
                .map_err(|e| ValidationError::InvalidSatellite(format!("{}: {}", satellite.id, e)))?;
        }

        Ok(())
    }

    /// Get the general configuration
    pub fn general(&self) -> &GeneralConfig {
        &self.general
    }
}

/// General simulation settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeneralConfig {
    /// Simulated time to run for (e.g. "10s", "2h")
    #[serde(with = "humantime_serde")]
    pub stop_time: Duration,
    /// (Optional) Period at which satellite trajectories are sampled
    #[serde(default, with = "humantime_serde::option", skip_serializing_if = "Option::is_none")]
    pub sample_interval: Option<Duration>,
    /// (Optional) Log filter, e.g. "debug"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    /// How strictly orbit parameters are checked (default: permissive)
    #[serde(default)]
    pub validation: ValidationPolicy,
}

/// Configuration for a single satellite
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SatelliteConfig {
    /// Unique name of this satellite
    pub id: String,
    /// (Optional) Orbit descriptor "altitude:inclination:planes:satellites";
    /// supplies altitude and inclination
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbit: Option<OrbitDescriptor>,
    /// (Optional) Altitude above the surface in km (default: 1000)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    /// (Optional) Inclination in degrees (default: 10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inclination: Option<f64>,
    /// Update interval; "0s" computes positions on demand (default: 1s)
    #[serde(default = "default_precision", with = "humantime_serde")]
    pub precision: Duration,
    /// Angular origin in the rotating Earth frame, radians
    #[serde(default)]
    pub longitude_offset: f64,
    /// Initial angle inside the orbital plane, radians
    #[serde(default)]
    pub plane_offset: f64,
}

fn default_precision() -> Duration {
    DEFAULT_PRECISION
}

impl SatelliteConfig {
    /// Altitude in km, from the descriptor, the explicit field or the default
    pub fn altitude_km(&self) -> f64 {
        match &self.orbit {
            Some(orbit) => orbit.altitude_km,
            None => self.altitude.unwrap_or(DEFAULT_ALTITUDE_KM),
        }
    }

    /// Inclination in degrees, from the descriptor, the explicit field or the default
    pub fn inclination_deg(&self) -> f64 {
        match &self.orbit {
            Some(orbit) => orbit.inclination_deg,
            None => self.inclination.unwrap_or(DEFAULT_INCLINATION_DEG),
        }
    }

    pub fn phase(&self) -> OrbitPhase {
        OrbitPhase::new(self.longitude_offset, self.plane_offset)
    }

    pub fn orbit_config(&self, policy: ValidationPolicy) -> Result<OrbitConfig, OrbitError> {
        OrbitConfig::new(self.altitude_km(), self.inclination_deg(), self.precision, policy)
    }

    /// Build the mobility model for this satellite
    pub fn build_model(&self, policy: ValidationPolicy) -> Result<CircularOrbitModel, OrbitError> {
        Ok(CircularOrbitModel::new(self.orbit_config(policy)?, self.phase()))
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid general configuration: {0}")]
    InvalidGeneral(String),
    #[error("Invalid satellite configuration: {0}")]
    InvalidSatellite(String),
}

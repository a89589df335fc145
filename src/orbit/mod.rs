//! Circular-orbit model.
//!
//! This module contains the orbit parameters, the pure kinematics that turn
//! parameters and simulated time into position and velocity, and the orbit
//! descriptor text format.

pub mod constants;
pub mod descriptor;
pub mod kinematics;
pub mod params;

// Re-export commonly used types
pub use descriptor::{DescriptorError, OrbitDescriptor};
pub use kinematics::{position_at, velocity_at};
pub use params::{OrbitConfig, OrbitError, OrbitPhase, UpdateMode, ValidationPolicy};

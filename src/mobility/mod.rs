//! Mobility models.
//!
//! A mobility model answers "where is this node and how fast is it moving"
//! for a given simulated time. Models that refresh on a schedule report each
//! refresh as a [`CourseChange`].

pub mod circular;

use nalgebra::Vector3;
use serde::Serialize;
use std::time::Duration;

pub use circular::CircularOrbitModel;

/// Result of one discrete position update.
///
/// The caller reports it to course-change observers and schedules the next
/// update `next_update` after `at`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseChange {
    /// Simulated time of the update
    #[serde(with = "humantime_serde")]
    pub at: Duration,
    /// Position in meters
    pub position: Vector3<f64>,
    /// Velocity in m/s
    pub velocity: Vector3<f64>,
    /// Delay until the next update
    #[serde(with = "humantime_serde")]
    pub next_update: Duration,
}

/// Position and velocity of a node over simulated time.
pub trait MobilityModel {
    /// Position in meters at `now`.
    fn position(&self, now: Duration) -> Vector3<f64>;

    /// Velocity in m/s at `now`.
    fn velocity(&self, now: Duration) -> Vector3<f64>;

    /// Reposition the node. Returns the resulting course change, if the
    /// model reports one.
    fn set_position(&mut self, position: Vector3<f64>, now: Duration) -> Option<CourseChange>;
}

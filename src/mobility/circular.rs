//! Circular-orbit propagator.
//!
//! Wraps the pure kinematics with the update cycle of a satellite:
//!
//! - **Continuous** (precision 0): every query recomputes at the queried
//!   time; nothing is cached and no course change is reported.
//! - **Discrete** (precision > 0): the position is cached and recomputed
//!   once per interval. Each recomputation yields a [`CourseChange`] that the
//!   caller reports to observers and uses to re-arm the model's timer.
//!
//! The model never talks to a scheduler itself. It only remembers which
//! timer entry is armed for it so the host can cancel it and ignore stale
//! ticks.

use log::{debug, trace};
use nalgebra::Vector3;
use std::time::Duration;

use super::{CourseChange, MobilityModel};
use crate::orbit::kinematics::{frame_angle, plane_normal, position_at, velocity_at, velocity_for};
use crate::orbit::{OrbitConfig, OrbitError, OrbitPhase, UpdateMode};
use crate::sim::EventId;

/// Last discrete fix
#[derive(Debug, Clone, Copy, PartialEq)]
struct Fix {
    at: Duration,
    position: Vector3<f64>,
}

/// Position and velocity of one satellite on a circular orbit.
#[derive(Debug, Clone)]
pub struct CircularOrbitModel {
    orbit: OrbitConfig,
    phase: OrbitPhase,
    fix: Option<Fix>,
    timer: Option<EventId>,
}

impl Default for CircularOrbitModel {
    fn default() -> Self {
        Self::new(OrbitConfig::default(), OrbitPhase::default())
    }
}

impl CircularOrbitModel {
    pub fn new(orbit: OrbitConfig, phase: OrbitPhase) -> Self {
        Self {
            orbit,
            phase,
            fix: None,
            timer: None,
        }
    }

    pub fn orbit(&self) -> &OrbitConfig {
        &self.orbit
    }

    pub fn phase(&self) -> OrbitPhase {
        self.phase
    }

    pub fn update_mode(&self) -> UpdateMode {
        self.orbit.update_mode()
    }

    /// Orbital speed in m/s.
    pub fn speed(&self) -> f64 {
        self.orbit.speed()
    }

    pub fn altitude_km(&self) -> f64 {
        self.orbit.altitude_km()
    }

    pub fn inclination_deg(&self) -> f64 {
        self.orbit.inclination_deg()
    }

    /// Physical period `2π·r/v` in seconds.
    pub fn orbital_period_s(&self) -> f64 {
        self.orbit.orbital_period_s()
    }

    /// Seconds for the progress angle to advance one full turn.
    pub fn progress_period_s(&self) -> f64 {
        self.orbit.progress_period_s()
    }

    /// Cached position and the time it was computed at.
    ///
    /// Always `None` in continuous mode.
    pub fn cached_position(&self) -> Option<(Duration, Vector3<f64>)> {
        self.fix.map(|fix| (fix.at, fix.position))
    }

    /// Recompute the position at `now`.
    ///
    /// Returns the course change to report in discrete mode, `None` in
    /// continuous mode.
    pub fn refresh(&mut self, now: Duration) -> Option<CourseChange> {
        match self.orbit.update_mode() {
            UpdateMode::Continuous => {
                self.fix = None;
                None
            }
            UpdateMode::Discrete(interval) => {
                let position = position_at(&self.orbit, &self.phase, now);
                self.fix = Some(Fix { at: now, position });
                let change = CourseChange {
                    at: now,
                    position,
                    velocity: self.fix_velocity(now),
                    next_update: interval,
                };
                debug!(
                    "Course change at {:?}: |r| = {:.1} m, next update in {:?}",
                    now,
                    position.norm(),
                    interval
                );
                Some(change)
            }
        }
    }

    /// Run one scheduled update cycle.
    ///
    /// A tick that arrives after the model switched to continuous mode
    /// produces nothing.
    pub fn on_timer(&mut self, now: Duration) -> Option<CourseChange> {
        trace!("Update timer fired at {:?}", now);
        self.refresh(now)
    }

    pub fn set_altitude_km(
        &mut self,
        altitude_km: f64,
        now: Duration,
    ) -> Result<Option<CourseChange>, OrbitError> {
        self.orbit.set_altitude_km(altitude_km)?;
        Ok(self.refresh(now))
    }

    pub fn set_inclination_deg(
        &mut self,
        inclination_deg: f64,
        now: Duration,
    ) -> Result<Option<CourseChange>, OrbitError> {
        self.orbit.set_inclination_deg(inclination_deg)?;
        Ok(self.refresh(now))
    }

    /// Change the update interval.
    ///
    /// Leaving continuous mode starts a discrete cycle right away and zero
    /// switches to continuous mode. Between two non-zero intervals the armed
    /// update keeps its time and the new interval applies from the next
    /// cycle on.
    pub fn set_precision(&mut self, precision: Duration, now: Duration) -> Option<CourseChange> {
        let was_cycling = matches!(self.orbit.update_mode(), UpdateMode::Discrete(_))
            && self.timer.is_some();
        self.orbit.set_precision(precision);
        match self.orbit.update_mode() {
            UpdateMode::Discrete(_) if was_cycling => None,
            _ => self.refresh(now),
        }
    }

    /// Move the satellite within its shell: longitude of the orbital plane
    /// and position along it, both in radians.
    pub fn set_offsets(
        &mut self,
        longitude_offset_rad: f64,
        plane_offset_rad: f64,
        now: Duration,
    ) -> Option<CourseChange> {
        self.phase = OrbitPhase::new(longitude_offset_rad, plane_offset_rad);
        self.refresh(now)
    }

    pub(crate) fn armed_timer(&self) -> Option<EventId> {
        self.timer
    }

    pub(crate) fn arm(&mut self, id: EventId) {
        self.timer = Some(id);
    }

    pub(crate) fn disarm(&mut self) -> Option<EventId> {
        self.timer.take()
    }

    /// Velocity at the cached fix, using the plane normal of the fix time.
    fn fix_velocity(&self, now: Duration) -> Vector3<f64> {
        match self.fix {
            Some(fix) => {
                let normal = plane_normal(
                    self.orbit.inclination_rad(),
                    frame_angle(fix.at, self.phase.longitude_offset_rad),
                );
                velocity_for(&fix.position, &normal, self.orbit.speed())
            }
            None => velocity_at(&self.orbit, &self.phase, now),
        }
    }
}

impl MobilityModel for CircularOrbitModel {
    fn position(&self, now: Duration) -> Vector3<f64> {
        match (self.orbit.update_mode(), self.fix) {
            (UpdateMode::Discrete(_), Some(fix)) => fix.position,
            _ => position_at(&self.orbit, &self.phase, now),
        }
    }

    fn velocity(&self, now: Duration) -> Vector3<f64> {
        match self.orbit.update_mode() {
            UpdateMode::Discrete(_) => self.fix_velocity(now),
            UpdateMode::Continuous => velocity_at(&self.orbit, &self.phase, now),
        }
    }

    /// Uses `x` as the longitude offset and `y` as the plane offset, both in
    /// radians. `z` is ignored, so the position read back afterwards is not
    /// the vector passed in.
    fn set_position(&mut self, position: Vector3<f64>, now: Duration) -> Option<CourseChange> {
        self.set_offsets(position.x, position.y, now)
    }
}

//! Simulation host.
//!
//! The host plays the part of the surrounding network simulator: it owns
//! the clock and event queue, the satellites' mobility models and the
//! course-change sink. Each model has at most one armed timer entry. When a
//! model reports a course change the host notifies the sink and arms the
//! next entry in place of the pending one. Removing a model or switching it
//! to continuous mode cancels its pending entry.

use log::{info, trace};
use nalgebra::Vector3;
use std::collections::BTreeMap;
use std::time::Duration;

use super::queue::{EventId, EventQueue};
use super::trace::CourseChangeSink;
use crate::mobility::{CircularOrbitModel, CourseChange, MobilityModel};
use crate::orbit::{OrbitError, UpdateMode};

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Unknown satellite: {0}")]
    UnknownSatellite(String),
    #[error("Satellite already installed: {0}")]
    DuplicateSatellite(String),
    #[error(transparent)]
    Orbit(#[from] OrbitError),
}

pub struct Host<S: CourseChangeSink> {
    queue: EventQueue<String>,
    satellites: BTreeMap<String, CircularOrbitModel>,
    sink: S,
}

impl<S: CourseChangeSink> Host<S> {
    pub fn new(sink: S) -> Self {
        Self {
            queue: EventQueue::new(),
            satellites: BTreeMap::new(),
            sink,
        }
    }

    /// Current simulated time.
    pub fn now(&self) -> Duration {
        self.queue.now()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Number of armed update timers.
    pub fn pending_updates(&self) -> usize {
        self.queue.len()
    }

    pub fn satellite_ids(&self) -> impl Iterator<Item = &str> {
        self.satellites.keys().map(String::as_str)
    }

    pub fn model(&self, id: &str) -> Option<&CircularOrbitModel> {
        self.satellites.get(id)
    }

    /// Position of a satellite at the current time.
    pub fn position(&self, id: &str) -> Option<Vector3<f64>> {
        let now = self.now();
        self.satellites.get(id).map(|m| m.position(now))
    }

    /// Velocity of a satellite at the current time.
    pub fn velocity(&self, id: &str) -> Option<Vector3<f64>> {
        let now = self.now();
        self.satellites.get(id).map(|m| m.velocity(now))
    }

    /// Add a satellite. A discrete-mode model gets its first update right
    /// away.
    pub fn install(
        &mut self,
        id: impl Into<String>,
        mut model: CircularOrbitModel,
    ) -> Result<(), HostError> {
        let id = id.into();
        if self.satellites.contains_key(&id) {
            return Err(HostError::DuplicateSatellite(id));
        }
        info!(
            "Installing satellite {}: altitude {} km, inclination {}°, {:?}",
            id,
            model.altitude_km(),
            model.inclination_deg(),
            model.update_mode()
        );
        // A token carried in from another host entry is not ours to cancel
        model.disarm();
        let change = model.refresh(self.now());
        self.satellites.insert(id.clone(), model);
        self.apply(&id, change);
        Ok(())
    }

    /// Change a satellite's configuration.
    ///
    /// `f` receives the model and the current time and returns the model's
    /// response to the change. A reported course change replaces the pending
    /// update with one armed from now. Without one, the pending update is
    /// kept unless the model switched to continuous mode. On error nothing
    /// is rescheduled.
    pub fn configure<F>(&mut self, id: &str, f: F) -> Result<(), HostError>
    where
        F: FnOnce(&mut CircularOrbitModel, Duration) -> Result<Option<CourseChange>, OrbitError>,
    {
        let now = self.now();
        let model = self
            .satellites
            .get_mut(id)
            .ok_or_else(|| HostError::UnknownSatellite(id.to_string()))?;
        let change = f(model, now)?;
        self.apply(id, change);
        Ok(())
    }

    /// Remove a satellite and cancel its pending update.
    pub fn remove(&mut self, id: &str) -> Option<CircularOrbitModel> {
        let mut model = self.satellites.remove(id)?;
        if let Some(timer) = model.disarm() {
            self.queue.cancel(timer);
        }
        info!("Removed satellite {}", id);
        Some(model)
    }

    /// Dispatch every update due strictly before `stop`, then move the clock
    /// to `stop`.
    pub fn run_until(&mut self, stop: Duration) {
        while let Some((event, id)) = self.queue.pop_before(stop) {
            self.dispatch(event, &id);
        }
        self.queue.advance_to(stop);
    }

    /// Like [`Self::run_until`], but also dispatches updates due exactly at `t`.
    pub fn run_through(&mut self, t: Duration) {
        while let Some((event, id)) = self.queue.pop_through(t) {
            self.dispatch(event, &id);
        }
        self.queue.advance_to(t);
    }

    fn dispatch(&mut self, event: EventId, id: &str) {
        let now = self.queue.now();
        let Some(model) = self.satellites.get_mut(id) else {
            trace!("Dropping update for removed satellite {}", id);
            return;
        };
        if model.armed_timer() != Some(event) {
            trace!("Dropping stale update for {} at {:?}", id, now);
            return;
        }
        model.disarm();
        let change = model.on_timer(now);
        self.apply(id, change);
    }

    fn apply(&mut self, id: &str, change: Option<CourseChange>) {
        let Some(model) = self.satellites.get_mut(id) else {
            return;
        };
        let keep_pending = change.is_none() && model.update_mode() != UpdateMode::Continuous;
        if keep_pending {
            return;
        }
        if let Some(timer) = model.disarm() {
            self.queue.cancel(timer);
        }
        if let Some(change) = change {
            self.sink.course_changed(id, &change);
            let timer = self.queue.schedule(change.next_update, id.to_string());
            model.arm(timer);
        }
    }
}

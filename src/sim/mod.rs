//! Simulation host environment.
//!
//! This module provides the pieces a mobility model needs from the
//! surrounding simulator: a clock and cancellable event queue, a sink for
//! course-change notifications, and a host that ties them to the installed
//! satellites.

pub mod host;
pub mod queue;
pub mod trace;

// Re-export commonly used types
pub use host::{Host, HostError};
pub use queue::{EventId, EventQueue};
pub use trace::{CourseChangeLog, CourseChangeRecord, CourseChangeSink, NullSink};

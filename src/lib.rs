//! # LeoSim - Circular-orbit mobility for LEO satellite network simulations
//!
//! This library provides the mobility layer for simulating low Earth orbit
//! satellites inside a discrete-event network simulation: given an orbit's
//! altitude, inclination and a simulated point in time, it derives the
//! satellite's 3-D position and velocity, and re-derives them on a periodic
//! schedule while notifying observers of every course change.
//!
//! ## Overview
//!
//! Orbits are idealized circles. The kinematics are pure functions of the
//! orbit parameters and the simulated time; a small stateful propagator
//! caches the latest position and tells its host when to update it next.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `orbit`: Orbit parameters, validation, kinematics and the orbit descriptor format
//! - `mobility`: The `MobilityModel` trait and the circular-orbit propagator
//! - `sim`: Event queue, course-change sinks and the simulation host
//! - `config`: Type-safe scenario configuration and YAML parsing
//! - `config_loader`: Scenario file loading
//! - `scenario`: Runs a scenario and produces a report
//!
//! ## Example Usage
//!
//! ```rust
//! use leosim::mobility::{CircularOrbitModel, MobilityModel};
//! use leosim::orbit::{OrbitConfig, OrbitPhase, ValidationPolicy};
//! use leosim::sim::{CourseChangeLog, Host};
//! use std::time::Duration;
//!
//! let orbit = OrbitConfig::new(1000.0, 53.0, Duration::from_secs(1), ValidationPolicy::Permissive)?;
//! let mut host = Host::new(CourseChangeLog::new());
//! host.install("sat-0", CircularOrbitModel::new(orbit, OrbitPhase::default()))?;
//!
//! host.run_until(Duration::from_secs(10));
//! assert_eq!(host.sink().len(), 10);
//!
//! let position = host.position("sat-0").unwrap();
//! assert!((position.norm() - 7_371_009.0).abs() < 1e-3);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Configuration Format
//!
//! Scenarios use YAML:
//!
//! ```yaml
//! general:
//!   stop_time: "2h"
//!   sample_interval: "1min"
//!   validation: permissive   # or strict
//!
//! satellites:
//!   - id: "shell-a-0"
//!     orbit: "800:53:10:20"  # altitude:inclination:planes:satellites
//!     precision: "1s"        # "0s" computes positions on demand
//!   - id: "polar-0"
//!     altitude: 550.0
//!     inclination: 97.6
//!     plane_offset: 1.2
//! ```
//!
//! ## Error Handling
//!
//! Library seams return typed `thiserror` errors (`OrbitError`,
//! `DescriptorError`, `HostError`, `ValidationError`). Loading and running
//! scenarios returns `color_eyre::Result` with context attached.

pub mod config;
pub mod config_loader;
pub mod mobility;
pub mod orbit;
pub mod scenario;
pub mod sim;

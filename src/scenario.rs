//! Scenario runner.
//!
//! This module drives a configured scenario from start to stop time:
//! installing every satellite into a [`Host`], advancing simulated time in
//! sampling steps, and collecting trajectory samples and course-change
//! notifications into a [`ScenarioReport`].

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{info, warn};
use nalgebra::Vector3;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::config::Config;
use crate::orbit::constants::METERS_PER_KM;
use crate::orbit::{OrbitConfig, OrbitDescriptor, UpdateMode, ValidationPolicy};
use crate::sim::{CourseChangeLog, CourseChangeRecord, CourseChangeSink, Host};

/// Static properties of one satellite's orbit plus how often it reported.
#[derive(Serialize, Debug, Clone)]
pub struct SatelliteSummary {
    pub id: String,
    pub altitude_km: f64,
    pub inclination_deg: f64,
    /// Orbital speed in m/s
    pub speed: f64,
    /// Time for one revolution in seconds
    pub orbital_period_s: f64,
    /// Update interval; "0s" for continuous mode
    #[serde(with = "humantime_serde")]
    pub precision: Duration,
    /// Number of course-change notifications emitted
    pub course_changes: usize,
}

/// Position and velocity of one satellite at one sampling instant.
#[derive(Serialize, Debug, Clone)]
pub struct TrajectorySample {
    pub satellite: String,
    pub time_s: f64,
    /// Position in meters
    pub position: Vector3<f64>,
    /// Velocity in m/s
    pub velocity: Vector3<f64>,
    /// Distance from the Earth's center in km
    pub radius_km: f64,
}

/// Everything a scenario run produced.
#[derive(Serialize, Debug)]
pub struct ScenarioReport {
    #[serde(with = "humantime_serde")]
    pub stop_time: Duration,
    pub satellites: Vec<SatelliteSummary>,
    pub samples: Vec<TrajectorySample>,
    pub course_changes: Vec<CourseChangeRecord>,
}

/// Derived properties of an orbital shell described by an [`OrbitDescriptor`].
#[derive(Serialize, Debug, Clone)]
pub struct ShellSummary {
    pub descriptor: OrbitDescriptor,
    pub total_satellites: u64,
    /// Orbital speed in m/s
    pub speed: f64,
    pub orbital_period_s: f64,
}

/// Describe the shell named by a descriptor.
pub fn describe_shell(descriptor: &OrbitDescriptor, policy: ValidationPolicy) -> Result<ShellSummary> {
    let orbit = OrbitConfig::new(
        descriptor.altitude_km,
        descriptor.inclination_deg,
        Duration::ZERO,
        policy,
    )
    .wrap_err_with(|| format!("Invalid orbit descriptor '{}'", descriptor))?;

    Ok(ShellSummary {
        descriptor: *descriptor,
        total_satellites: descriptor.total_satellites(),
        speed: orbit.speed(),
        orbital_period_s: orbit.orbital_period_s(),
    })
}

/// Run a scenario to its stop time.
///
/// Samples are taken at t = 0 and every `sample_interval` strictly before
/// the stop time, after all updates due at that instant have been applied.
/// Notifications are collected over `[0, stop_time)`.
pub fn run_scenario(config: &Config) -> Result<ScenarioReport> {
    let general = config.general();
    let policy = general.validation;
    let stop = general.stop_time;

    let mut host = Host::new(CourseChangeLog::new());
    for satellite in &config.satellites {
        let model = satellite
            .build_model(policy)
            .wrap_err_with(|| format!("Failed to configure satellite '{}'", satellite.id))?;
        host.install(satellite.id.clone(), model)?;
    }

    let mut samples = Vec::new();
    match general.sample_interval {
        Some(interval) => {
            let mut t = Duration::ZERO;
            while t < stop {
                host.run_through(t);
                sample_all(&host, &mut samples);
                t = t.saturating_add(interval);
            }
            host.run_until(stop);
        }
        None => host.run_until(stop),
    }

    let summaries = summarize(&host);
    let log = host.into_sink();
    info!(
        "Scenario finished at {:?}: {} course change(s), {} sample(s)",
        stop,
        log.len(),
        samples.len()
    );

    Ok(ScenarioReport {
        stop_time: stop,
        satellites: summaries,
        samples,
        course_changes: log.records,
    })
}

fn sample_all<S: CourseChangeSink>(host: &Host<S>, samples: &mut Vec<TrajectorySample>) {
    let time_s = host.now().as_secs_f64();
    for id in host.satellite_ids() {
        let (Some(position), Some(velocity)) = (host.position(id), host.velocity(id)) else {
            continue;
        };
        samples.push(TrajectorySample {
            satellite: id.to_string(),
            time_s,
            position,
            velocity,
            radius_km: position.norm() / METERS_PER_KM,
        });
    }
}

fn summarize(host: &Host<CourseChangeLog>) -> Vec<SatelliteSummary> {
    host.satellite_ids()
        .filter_map(|id| {
            let model = host.model(id)?;
            let orbit = model.orbit();
            let precision = match model.update_mode() {
                UpdateMode::Continuous => Duration::ZERO,
                UpdateMode::Discrete(interval) => interval,
            };
            Some(SatelliteSummary {
                id: id.to_string(),
                altitude_km: orbit.altitude_km(),
                inclination_deg: orbit.inclination_deg(),
                speed: orbit.speed(),
                orbital_period_s: orbit.orbital_period_s(),
                precision,
                course_changes: host.sink().for_satellite(id).count(),
            })
        })
        .collect()
}

/// Write a report as YAML (`.yaml`/`.yml`) or pretty JSON (anything else).
pub fn write_report(report: &ScenarioReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("Failed to create output directory '{}'", parent.display()))?;
    }

    let is_yaml = path
        .extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml");
    let content = if is_yaml {
        serde_yaml::to_string(report).wrap_err("Failed to serialize report as YAML")?
    } else {
        serde_json::to_string_pretty(report).wrap_err("Failed to serialize report as JSON")?
    };

    if report.samples.is_empty() && report.course_changes.is_empty() {
        warn!("Report contains no samples and no course changes");
    }

    fs::write(path, content)
        .wrap_err_with(|| format!("Failed to write report '{}'", path.display()))?;
    info!("Wrote report to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_loader::load_config_str;
    use tempfile::TempDir;

    const SCENARIO: &str = r#"
general:
  stop_time: "10s"
  sample_interval: "2s"
satellites:
  - id: "discrete"
    altitude: 1000.0
    inclination: 53.0
    precision: "1s"
  - id: "continuous"
    orbit: "550:97.6:72:22"
    precision: "0s"
"#;

    #[test]
    fn test_run_scenario() {
        let config = load_config_str(SCENARIO).unwrap();
        let report = run_scenario(&config).unwrap();

        assert_eq!(report.stop_time, Duration::from_secs(10));
        // 5 sampling instants (0, 2, 4, 6, 8) x 2 satellites
        assert_eq!(report.samples.len(), 10);
        assert_eq!(report.course_changes.len(), 10);
        assert!(report.course_changes.iter().all(|r| r.satellite == "discrete"));

        let discrete = report.satellites.iter().find(|s| s.id == "discrete").unwrap();
        assert_eq!(discrete.course_changes, 10);
        assert!((discrete.speed - 7353.6).abs() < 1.0);
        let continuous = report.satellites.iter().find(|s| s.id == "continuous").unwrap();
        assert_eq!(continuous.course_changes, 0);
        assert!(continuous.precision.is_zero());

        for sample in &report.samples {
            let expected = if sample.satellite == "discrete" { 7371.009 } else { 6921.009 };
            assert!((sample.radius_km - expected).abs() < 1e-6, "{:?}", sample);
            assert!(sample.position.dot(&sample.velocity).abs() / sample.position.norm() < 1e-6);
        }
    }

    #[test]
    fn test_samples_see_updates_due_at_sample_time() {
        let config = load_config_str(SCENARIO).unwrap();
        let report = run_scenario(&config).unwrap();
        for sample in report.samples.iter().filter(|s| s.satellite == "discrete") {
            let record = report
                .course_changes
                .iter()
                .find(|r| r.change.at.as_secs_f64() == sample.time_s)
                .unwrap();
            assert_eq!(record.change.position, sample.position);
        }
    }

    #[test]
    fn test_write_report_formats() {
        let config = load_config_str(SCENARIO).unwrap();
        let report = run_scenario(&config).unwrap();
        let dir = TempDir::new().unwrap();

        let json_path = dir.path().join("out/report.json");
        write_report(&report, &json_path).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(json["stop_time"], "10s");
        assert_eq!(json["samples"].as_array().unwrap().len(), 10);

        let yaml_path = dir.path().join("report.yaml");
        write_report(&report, &yaml_path).unwrap();
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(&fs::read_to_string(&yaml_path).unwrap()).unwrap();
        assert_eq!(yaml["satellites"].as_sequence().unwrap().len(), 2);
    }

    #[test]
    fn test_describe_shell() {
        let descriptor: OrbitDescriptor = "1000:53:10:20".parse().unwrap();
        let summary = describe_shell(&descriptor, ValidationPolicy::Permissive).unwrap();
        assert_eq!(summary.total_satellites, 200);
        assert!((summary.orbital_period_s / 60.0 - 105.0).abs() < 1.0);

        let flat = OrbitDescriptor::new(1000.0, 0.0, 1, 1);
        assert!(describe_shell(&flat, ValidationPolicy::Permissive).is_err());
    }
}

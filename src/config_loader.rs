use crate::config::Config;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load and parse a scenario configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration '{}'", config_path.display()))?;

    let config: Config = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration '{}'", config_path.display()))?;

    info!(
        "Scenario: {} satellite(s), stop time {:?}",
        config.satellites.len(),
        config.general.stop_time
    );

    config.validate()?;

    Ok(config)
}

/// Parse and validate a scenario configuration held in memory
pub fn load_config_str(yaml: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(yaml).wrap_err("Failed to parse configuration")?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SCENARIO: &str = r#"
general:
  stop_time: "30s"
  sample_interval: "5s"
satellites:
  - id: "sat-0"
    orbit: "1200:87:6:40"
"#;

    #[test]
    fn test_load_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", SCENARIO).unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.satellites.len(), 1);
        assert_eq!(config.satellites[0].altitude_km(), 1200.0);
        assert_eq!(config.satellites[0].inclination_deg(), 87.0);
    }

    #[test]
    fn test_load_bundled_scenario() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/two_shells.yaml");
        let config = load_config(&path).unwrap();
        assert_eq!(config.satellites.len(), 3);
        assert_eq!(config.general.log_level.as_deref(), Some("info"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/nonexistent/scenario.yaml")).unwrap_err();
        assert!(format!("{:?}", err).contains("Failed to open configuration"));
    }

    #[test]
    fn test_load_invalid_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            "general:\n  stop_time: \"10s\"\nsatellites:\n  - id: \"a\"\n    inclination: 0.0\n"
        )
        .unwrap();
        assert!(load_config(temp_file.path()).is_err());
    }

    #[test]
    fn test_load_config_str() {
        assert!(load_config_str(SCENARIO).is_ok());
        assert!(load_config_str("general: {}").is_err());
    }
}

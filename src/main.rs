use clap::Parser;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use leosim::orbit::{OrbitDescriptor, ValidationPolicy};
use leosim::{config_loader, scenario};

/// Circular-orbit satellite mobility for LEO network simulations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the scenario configuration YAML file
    #[arg(short, long, required_unless_present = "describe")]
    config: Option<PathBuf>,

    /// Output path for the report (.json, or .yaml/.yml)
    #[arg(short, long, default_value = "leosim_report.json")]
    output: PathBuf,

    /// Describe an orbit descriptor (altitude:inclination:planes:satellites) and exit
    #[arg(long, conflicts_with = "config")]
    describe: Option<OrbitDescriptor>,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // The scenario may set the default log filter, so load it first
    let config = args
        .config
        .as_deref()
        .map(config_loader::load_config)
        .transpose()?;
    let default_filter = config
        .as_ref()
        .and_then(|c| c.general.log_level.clone())
        .unwrap_or_else(|| "info".to_string());

    // Initialize logging; RUST_LOG still takes precedence
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    if let Some(descriptor) = args.describe {
        let summary = scenario::describe_shell(&descriptor, ValidationPolicy::Permissive)?;
        info!("Orbit descriptor: {}", summary.descriptor);
        info!("  altitude:    {} km", descriptor.altitude_km);
        info!("  inclination: {}°", descriptor.inclination_deg);
        info!(
            "  satellites:  {} planes x {} = {}",
            descriptor.planes, descriptor.satellites, summary.total_satellites
        );
        info!("  speed:       {:.1} m/s", summary.speed);
        info!("  period:      {:.1} min", summary.orbital_period_s / 60.0);
        return Ok(());
    }

    // clap requires --config unless --describe is given
    let config = config.ok_or_else(|| eyre!("No configuration file given"))?;

    info!("Starting LeoSim scenario runner");
    info!("Configuration file: {:?}", args.config);
    info!("Output file: {:?}", args.output);
    info!(
        "Loaded {} satellite(s), stop time {:?}",
        config.satellites.len(),
        config.general.stop_time
    );

    let report = scenario::run_scenario(&config)?;
    scenario::write_report(&report, &args.output)?;

    info!("Scenario completed successfully");
    Ok(())
}

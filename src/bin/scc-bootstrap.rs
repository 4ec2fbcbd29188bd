//! scc-bootstrap CLI Binary
//!
//! Command-line front end for fetching and merging config server properties.

use clap::Parser;
use scc_bootstrap::cli::{execute, Cli};
use scc_bootstrap::logging::init_logging;
use scc_bootstrap::settings::{ClientSettings, SettingsLoader};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let settings = match build_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load settings: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(Some(&settings.logging)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("scc-bootstrap starting");

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create runtime: {}", e);
            process::exit(1);
        }
    };

    match rt.block_on(execute(&cli.command, &settings)) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

/// Settings file and environment first, then CLI flags on top.
fn build_settings(cli: &Cli) -> Result<ClientSettings, scc_bootstrap::error::BootstrapError> {
    let mut settings = SettingsLoader::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut settings);
    settings.validate()?;
    Ok(settings)
}

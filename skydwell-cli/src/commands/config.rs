//! Configuration CLI commands.
//!
//! Provides `config path` and `config show`.

use clap::Subcommand;
use skydwell::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Show the effective classifier settings
    Show,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => run_path(),
        ConfigCommands::Show => run_show(),
    }
}

/// Show the configuration file path.
fn run_path() -> Result<(), CliError> {
    println!("{}", config_file_path().display());
    Ok(())
}

/// Show the effective classifier settings.
fn run_show() -> Result<(), CliError> {
    let path = config_file_path();
    let config = ConfigFile::load()?;
    let c = &config.classifier;

    if path.exists() {
        println!("# {}", path.display());
    } else {
        println!("# {} (not found, using defaults)", path.display());
    }
    println!("[classifier]");
    println!("taxi_speed_kt = {}", c.taxi_speed_kt);
    println!("level_rate_fpm = {}", c.level_rate_fpm);
    println!("cruise_band_fpm = {}", c.cruise_band_fpm);
    println!("trend_threshold_fpm = {}", c.trend_threshold_fpm);
    println!("tendency_window = {}", c.tendency_window);
    println!("level_off_tolerance_ft = {}", c.level_off_tolerance_ft);
    println!();
    println!("# {} airspace volume(s); see `skydwell airspaces`", config.airspaces.len());

    Ok(())
}

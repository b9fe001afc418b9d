//! Airspaces command - list configured volumes.

use std::path::Path;

use super::common::load_config;
use crate::error::CliError;

/// Run the airspaces command.
pub fn run(config_path: Option<&Path>) -> Result<(), CliError> {
    let config = load_config(config_path)?;

    if config.airspaces.is_empty() {
        println!("No airspace volumes configured.");
        return Ok(());
    }

    println!("{:<20} {:>22} {:>9}", "Volume", "Vertical limits", "Vertices");
    for volume in &config.airspaces {
        println!(
            "{:<20} {:>22} {:>9}",
            volume.name(),
            volume.band().to_string(),
            volume.polygon().vertices().len()
        );
    }

    Ok(())
}

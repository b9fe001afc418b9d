//! SkyDwell CLI - Command-line interface
//!
//! Analyse recorded flight tracks: phase segmentation, boundary events and
//! airspace dwell times.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use skydwell::logging::{init_logging, LogConfig};

use commands::analyze::AnalyzeArgs;
use commands::batch::BatchArgs;
use commands::common::OutputFormat;
use commands::config::ConfigCommands;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "skydwell")]
#[command(version, about = "Flight-phase segmentation and airspace dwell times", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Classify one flight and print its timing summary
    Analyze {
        /// Track CSV file
        track: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Also print every sample with its rate and phase
        #[arg(long)]
        samples: bool,

        /// Configuration file (defaults to the user config)
        #[arg(long, value_name = "INI")]
        config: Option<PathBuf>,
    },

    /// Analyse every track CSV in a directory
    Batch {
        /// Directory containing track CSV files
        dir: PathBuf,

        /// Summary CSV to write
        #[arg(short, long, default_value = "summary.csv")]
        output: PathBuf,

        /// Configuration file (defaults to the user config)
        #[arg(long, value_name = "INI")]
        config: Option<PathBuf>,
    },

    /// List the configured airspace volumes
    Airspaces {
        /// Configuration file (defaults to the user config)
        #[arg(long, value_name = "INI")]
        config: Option<PathBuf>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig {
        verbose: cli.verbose,
        log_file: cli.log_file.clone(),
    };
    // Held until exit so buffered file output is flushed
    let _guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => exit_with(CliError::from(e)),
    };

    if let Err(e) = run(cli.command) {
        tracing::debug!(error = %e, "Command failed");
        exit_with(e);
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Analyze {
            track,
            format,
            samples,
            config,
        } => commands::analyze::run(AnalyzeArgs {
            track,
            format,
            samples,
            config,
        }),
        Commands::Batch {
            dir,
            output,
            config,
        } => commands::batch::run(BatchArgs {
            dir,
            output,
            config,
        }),
        Commands::Airspaces { config } => commands::airspaces::run(config.as_deref()),
        Commands::Config { command } => commands::config::run(command),
    }
}

fn exit_with(error: CliError) -> ! {
    eprintln!("Error: {}", error);
    std::process::exit(error.exit_code());
}

//! CLI error type and exit codes.

use std::fmt;

use skydwell::analysis::AnalysisError;
use skydwell::config::ConfigurationError;
use skydwell::logging::LoggingError;
use skydwell::telemetry::TelemetryError;

/// Errors surfaced to the user by the `skydwell` binary.
#[derive(Debug)]
pub enum CliError {
    /// Configuration file or command-line settings are invalid.
    Config(String),
    /// Logging could not be initialised.
    Logging(LoggingError),
    /// Track files could not be listed or read.
    Telemetry(TelemetryError),
    /// A flight could not be analysed.
    Analysis { flight: String, error: AnalysisError },
    /// Writing output failed.
    Output(String),
    /// Some flights in a batch failed.
    BatchFailures { failed: usize, total: usize },
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) | CliError::Logging(_) => 2,
            CliError::Telemetry(_) | CliError::Output(_) => 3,
            CliError::Analysis { .. } | CliError::BatchFailures { .. } => 1,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Logging(e) => write!(f, "Logging error: {}", e),
            CliError::Telemetry(e) => write!(f, "Track error: {}", e),
            CliError::Analysis { flight, error } => {
                write!(f, "Flight {} ({}): {}", flight, error.kind(), error)
            }
            CliError::Output(msg) => write!(f, "Output error: {}", msg),
            CliError::BatchFailures { failed, total } => {
                write!(f, "{} of {} flights could not be analysed", failed, total)
            }
        }
    }
}

impl std::error::Error for CliError {}

impl From<ConfigurationError> for CliError {
    fn from(e: ConfigurationError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e)
    }
}

impl From<TelemetryError> for CliError {
    fn from(e: TelemetryError) -> Self {
        CliError::Telemetry(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_non_zero() {
        let errors = [
            CliError::Config("bad".into()),
            CliError::Output("disk full".into()),
            CliError::BatchFailures {
                failed: 1,
                total: 3,
            },
        ];
        for error in errors {
            assert_ne!(error.exit_code(), 0);
        }
    }

    #[test]
    fn test_batch_failure_message() {
        let error = CliError::BatchFailures {
            failed: 2,
            total: 5,
        };
        assert_eq!(error.to_string(), "2 of 5 flights could not be analysed");
    }

    #[test]
    fn test_configuration_error_conversion() {
        let error = CliError::from(ConfigurationError::EmptyName);
        assert!(matches!(error, CliError::Config(_)));
        assert_eq!(error.exit_code(), 2);
    }
}

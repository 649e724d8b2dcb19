//! CLI-level errors (wrap domain and config errors)

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::DomainError;
use crate::exitcode;

/// CLI errors are the top-level error type; these are what the user sees.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Domain(DomainError::InvalidGrammar(_)) => exitcode::USAGE,
            CliError::Domain(_) => exitcode::DATAERR,
            CliError::Config(ConfigError::Write(_)) => exitcode::IOERR,
            CliError::Config(_) => exitcode::CONFIG,
            CliError::InvalidArgs(_) => exitcode::USAGE,
        }
    }
}

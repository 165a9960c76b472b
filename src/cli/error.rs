//! CLI-level errors (wraps engine and script errors)

use thiserror::Error;

use crate::script::ScriptError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Script(#[from] ScriptError),

    #[error("cannot read script: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Script(_) => crate::exitcode::DATAERR,
            CliError::Io(_) => crate::exitcode::IOERR,
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
        }
    }
}

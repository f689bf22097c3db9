//! CLI error types.

use ad_operators::OperatorError;
use thiserror::Error;

/// Errors raised by CLI commands.
#[derive(Error, Debug)]
pub enum CliError {
    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Unsupported argument value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Case file parses but describes an inconsistent mesh
    #[error("Invalid case: {0}")]
    InvalidCase(String),

    /// Operator precondition failed
    #[error("Operator error: {0}")]
    Operator(#[from] OperatorError),
}

/// Result alias for CLI helpers.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_error_conversion() {
        let err: CliError = OperatorError::ZeroWidth.into();
        assert_eq!(
            err.to_string(),
            "Operator error: Quantity width must be at least 1"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            CliError::FileNotFound("mesh.toml".into()).to_string(),
            "File not found: mesh.toml"
        );
    }
}

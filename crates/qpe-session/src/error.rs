//! Error handling for sessions.

use qpe_core::CoreError;
use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur during session operations.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Invalid parameter or generator failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// The session's event channel was closed.
    #[error("Session closed")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SessionError::Config("latency_ms must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: latency_ms must be positive"
        );

        let err: SessionError = CoreError::InvalidFactorInput.into();
        assert_eq!(err.to_string(), "Please enter an integer greater than 1.");

        assert_eq!(SessionError::Closed.to_string(), "Session closed");
    }
}

//! # Error Types
//!
//! Custom error types for Retropad Oracle using `thiserror`.
//!
//! The mapping engines are total and never produce these; only table
//! validation, calibration ingestion, the DUT codec, the transport and
//! configuration loading do.

use thiserror::Error;

/// Main error type for Retropad Oracle
#[derive(Debug, Error)]
pub enum OracleError {
    /// Malformed DUT command frame or response record
    #[error("DUT protocol error: {0}")]
    Protocol(String),

    /// Calibration record rejected before reaching the axis engine
    #[error("Calibration error: {0}")]
    Calibration(String),

    /// No descriptor matches the requested profile
    #[error("Unknown controller profile: {0}")]
    UnknownProfile(String),

    /// Link open or write failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// No matching response within the polling budget
    #[error("Timed out after {after_ms}ms waiting for {waiting_for}")]
    Timeout {
        waiting_for: String,
        after_ms: u64,
    },

    /// Observed DUT output disagreed with the model
    #[error("{0} scenario(s) did not match the expected output")]
    Mismatch(usize),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// JSON encode/decode errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Retropad Oracle
pub type Result<T> = std::result::Result<T, OracleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message() {
        let err = OracleError::Timeout {
            waiting_for: "wired_output".to_string(),
            after_ms: 1000,
        };
        assert_eq!(err.to_string(), "Timed out after 1000ms waiting for wired_output");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
        let err: OracleError = io.into();
        assert!(matches!(err, OracleError::Io(_)));
    }
}

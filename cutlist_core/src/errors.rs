//! # Error Types
//!
//! Structured error types for cutlist_core. Each variant carries enough
//! context to tell the user which input or file needs fixing.
//!
//! ## Example
//!
//! ```rust
//! use cutlist_core::errors::{CalcError, CalcResult};
//!
//! fn validate_doors(num_doors: u32) -> CalcResult<()> {
//!     if num_doors == 0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "num_doors".to_string(),
//!             value: num_doors.to_string(),
//!             reason: "At least one door is required".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_doors(0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for cutlist_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for cut-list operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, non-finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Measurement text could not be parsed
    #[error("Could not parse '{input}': {reason}")]
    ParseError { input: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Report or drawing output could not be produced
    #[error("Render failed during {stage}: {reason}")]
    RenderFailed { stage: String, reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a ParseError
    pub fn parse_error(input: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::ParseError {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a RenderFailed error
    pub fn render_failed(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::RenderFailed {
            stage: stage.into(),
            reason: reason.into(),
        }
    }

    /// Check if the user can fix this error by changing an input value
    pub fn is_input_error(&self) -> bool {
        matches!(self, CalcError::InvalidInput { .. } | CalcError::ParseError { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::ParseError { .. } => "PARSE_ERROR",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::RenderFailed { .. } => "RENDER_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("num_doors", "0", "At least one door is required");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::file_error("write", "doors.svg", "denied").error_code(), "FILE_ERROR");
        assert_eq!(CalcError::parse_error("1/0", "zero denominator").error_code(), "PARSE_ERROR");
        assert_eq!(CalcError::render_failed("pdf export", "boom").error_code(), "RENDER_FAILED");
    }

    #[test]
    fn test_input_errors_are_user_fixable() {
        assert!(CalcError::parse_error("abc", "not a number").is_input_error());
        assert!(!CalcError::file_error("read", "shop.toml", "not found").is_input_error());
    }
}

//! Error types for dxf-offset

use std::io;
use thiserror::Error;

/// Main error type for reading, editing and writing drawings
#[derive(Debug, Error)]
pub enum DxfError {
    /// IO error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error parsing the group code/value stream
    #[error("Parse error: {0}")]
    Parse(String),

    /// Structurally invalid document (missing ENDSEC, stray pairs, ...)
    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    /// A CIRCLE or ARC record carried a value that could not be interpreted
    #[error("Invalid {entity} entity: {reason}")]
    InvalidEntity {
        entity: &'static str,
        reason: String,
    },

    /// Text could not be represented in the target code page
    #[error("Encoding error: {0}")]
    Encoding(String),
}

/// Result type alias for dxf-offset operations
pub type Result<T> = std::result::Result<T, DxfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DxfError::InvalidFormat("no sections found".to_string());
        assert_eq!(err.to_string(), "Invalid file format: no sections found");
    }

    #[test]
    fn test_invalid_entity_display() {
        let err = DxfError::InvalidEntity {
            entity: "CIRCLE",
            reason: "radius 'abc' is not a number".to_string(),
        };
        assert!(err.to_string().starts_with("Invalid CIRCLE entity"));
        assert!(err.to_string().contains("'abc'"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let dxf_err: DxfError = io_err.into();
        assert!(matches!(dxf_err, DxfError::Io(_)));
    }
}

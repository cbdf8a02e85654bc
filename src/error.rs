//! Error types for the feature pipeline.

use thiserror::Error;

/// Errors raised while loading source tables or assembling feature frames.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A required source table was not found by the data source
    #[error("Missing source table: {0}")]
    MissingTable(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Timestamp rejected under `ParsePolicy::Strict`
    #[error("Invalid timestamp in column '{column}': '{value}'")]
    InvalidTimestamp { column: String, value: String },

    /// Column length does not match the frame's row count
    #[error("Column '{name}' has {actual} rows, frame has {expected}")]
    ColumnLength {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Column name already present in the frame
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_table_message() {
        let error = PipelineError::MissingTable("orders".to_string());
        assert_eq!(error.to_string(), "Missing source table: orders");
    }

    #[test]
    fn test_column_length_message() {
        let error = PipelineError::ColumnLength {
            name: "price".to_string(),
            expected: 3,
            actual: 2,
        };
        assert!(error.to_string().contains("price"));
        assert!(error.to_string().contains("frame has 3"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error: PipelineError = io.into();
        assert!(matches!(error, PipelineError::Io(_)));
    }
}

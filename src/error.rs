//! Error types for CSV parsing

use thiserror::Error;

/// Errors raised while tokenizing a CSV source
///
/// Row-shape errors (`ColumnCountMismatch`, `UnterminatedField`) carry the
/// 1-based physical line number at the time of failure and the raw accumulated
/// row text, so the offending data can be located without re-running the
/// parser.
#[derive(Debug, Error)]
pub enum CsvParseError {
    /// Failed to read a physical line from the underlying source
    #[error("Failed to read from source: {0}")]
    Read(String),

    /// The source yielded no header line
    #[error("Source '{0}' is empty: no header row found")]
    EmptySource(String),

    /// A logical row completed with the wrong number of fields
    #[error(
        "Line {line}: expected {expected} columns but found {actual} in row {buffer:?}"
    )]
    ColumnCountMismatch {
        /// 1-based physical line number of the last line consumed for this row
        line: u64,
        /// Column count established by the header row
        expected: usize,
        /// Column count actually produced
        actual: usize,
        /// Raw accumulated row text, for diagnosis
        buffer: String,
    },

    /// End of source reached while a quoted field was still open
    #[error("Line {line}: unterminated quoted field at end of input in row {buffer:?}")]
    UnterminatedField {
        /// 1-based physical line number of the last line consumed
        line: u64,
        /// Raw accumulated row text, for diagnosis
        buffer: String,
    },
}

/// Result type alias for CSV parsing operations
pub type Result<T> = std::result::Result<T, CsvParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_mismatch_message() {
        let err = CsvParseError::ColumnCountMismatch {
            line: 7,
            expected: 3,
            actual: 2,
            buffer: "a,b".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Line 7"));
        assert!(msg.contains("expected 3"));
        assert!(msg.contains("found 2"));
        assert!(msg.contains("a,b"));
    }

    #[test]
    fn test_unterminated_message() {
        let err = CsvParseError::UnterminatedField {
            line: 4,
            buffer: "\"open".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Line 4"));
        assert!(msg.contains("unterminated"));
    }

    #[test]
    fn test_empty_source_names_source() {
        let err = CsvParseError::EmptySource("fixtures/users.csv".to_string());
        assert!(err.to_string().contains("fixtures/users.csv"));
    }
}

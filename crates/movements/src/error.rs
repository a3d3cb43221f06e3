//! Input validation errors.

use thiserror::Error;

/// Errors raised while reading or validating movement records.
///
/// Any of these aborts the run that triggered the read; no derived state
/// is produced from a batch that failed validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field was absent on a record.
    #[error("record at line {line}: missing required field `{field}`")]
    MissingField { line: usize, field: &'static str },

    /// A movement type value was not one of the known wire values.
    #[error("record at line {line}: unknown movement type `{value}`")]
    UnknownMovementType { line: usize, value: String },

    /// A textual timestamp did not match `YYYY-MM-DD HH:MM:SS`.
    #[error("record at line {line}: timestamp `{value}` does not match YYYY-MM-DD HH:MM:SS")]
    MalformedTimestamp { line: usize, value: String },

    /// The CSV file itself could not be parsed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An I/O error occurred while reading the source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for movement source operations.
pub type Result<T> = std::result::Result<T, ValidationError>;

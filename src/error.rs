use std::io;
use thiserror::Error;

/// Error type for table engine operations.
///
/// Malformed input data never ends up here: short rows, unterminated quotes
/// and blank files are absorbed by the builder. Only I/O failures, output
/// encoding failures and caller contract violations are reported.
#[derive(Error, Debug)]
pub enum EngineError {
    /// IO error while reading input.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration, such as a zero page size.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A column named explicitly by the caller does not exist in the table.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

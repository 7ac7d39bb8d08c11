//! Error types for the calview crates.

use thiserror::Error;

/// Errors that can occur in calview operations.
#[derive(Error, Debug)]
pub enum CalviewError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Calendar not found: {0}")]
    CalendarNotFound(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for calview operations.
pub type CalviewResult<T> = Result<T, CalviewError>;

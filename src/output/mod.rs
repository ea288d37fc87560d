//! Result export.
//!
//! The aggregate is serialized as CSV with a fixed column set, so the
//! header is stable even for an empty run.

mod csv;

pub use csv::{write_rows, COLUMNS};

use thiserror::Error;

/// Output-specific errors
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for output operations
pub type OutputResult<T> = std::result::Result<T, OutputError>;

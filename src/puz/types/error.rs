//! Custom error types for the puz-reader crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
///
/// Decoding is all-or-nothing: any of these aborts the decode and no partial
/// [`Puzzle`](crate::Puzzle) is ever returned.
#[derive(Debug, Error)]
pub enum PuzError {
    /// The buffer ended before a read could be satisfied (truncated or corrupt file).
    #[error("Out of bounds: read of {requested} byte(s) at offset {offset:#06x}, but only {available} byte(s) remain")]
    OutOfBounds {
        offset: usize,
        requested: usize,
        available: usize,
    },

    /// The buffer is not a .puz file, or a persisted value is structurally invalid.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A solution row and its paired user-state row have different lengths.
    #[error("Malformed row {row}: solution has {solution_len} cell(s), user state has {user_len}")]
    MalformedRow {
        row: usize,
        solution_len: usize,
        user_len: usize,
    },

    /// A declared count of items does not match the actual number of items found.
    #[error("Count mismatch for {item_type}: expected {expected}, but found {found}")]
    CountMismatch {
        item_type: &'static str,
        expected: usize,
        found: usize,
    },

    /// A checksum did not match the recomputed value (strict decoding only).
    #[error("Checksum mismatch in {region}: expected {expected:#06x}, got {actual:#06x}")]
    ChecksumMismatch {
        region: &'static str,
        expected: u16,
        actual: u16,
    },

    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// A persisted puzzle record could not be serialized or parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenience `Result` type alias using the crate's `PuzError` type.
pub type Result<T> = std::result::Result<T, PuzError>;

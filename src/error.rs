use thiserror::Error;

use crate::utils::letters::ALPHABET_SIZE;

/// Construction-time precondition failures. Gameplay edge cases never
/// surface here; they are no-ops or events.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("grid must have at least one row and one column, got {rows}x{columns}")]
    InvalidGridSize { rows: usize, columns: usize },

    #[error("letter frequency table must have {expected} entries, got {0}", expected = ALPHABET_SIZE)]
    FrequencyTableLength(usize),

    #[error("letter frequency for {letter} must be a positive finite number, got {value}")]
    InvalidFrequency { letter: &'static str, value: f64 },

    #[error("selection cap must be at least 1")]
    InvalidSelectionCap,

    #[error("dictionary is empty")]
    EmptyDictionary,

    #[error("snapshot grid is {found_rows}x{found_columns}, engine expects {rows}x{columns}")]
    SnapshotMismatch {
        rows: usize,
        columns: usize,
        found_rows: usize,
        found_columns: usize,
    },

    #[error("snapshot is inconsistent: {0}")]
    CorruptSnapshot(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

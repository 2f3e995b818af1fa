pub mod loader;

pub use loader::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Row {row} has {found} fields, header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("No header row")]
    NoHeader,
}

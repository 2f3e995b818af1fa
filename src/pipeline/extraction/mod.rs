pub mod types;
pub mod sanitize;
pub mod pdf;
pub mod patient;

pub use types::*;
pub use sanitize::*;
pub use pdf::*;
pub use patient::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("Document is empty")]
    EmptyDocument,
}

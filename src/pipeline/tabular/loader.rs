//! Tolerant loader for motion-capture exports.
//!
//! Exports come comma- or semicolon-delimited depending on the lab's
//! locale. The comma reading is tried first; a failed or empty result
//! falls back to the semicolon reading, and if that fails too the caller
//! gets an empty dataset instead of an error.

use std::collections::HashMap;

use super::TableError;
use crate::models::{Cell, GaitDataset};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Semicolon,
}

impl Delimiter {
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Semicolon => b';',
        }
    }
}

/// Outcome of one parse attempt.
#[derive(Debug)]
pub enum TableLoad {
    /// At least one row and one column.
    Parsed(GaitDataset),
    /// Parsed, but no rows or no columns. Header-only tables keep their columns.
    Empty(GaitDataset),
    Failed(TableError),
}

/// Parse a delimited table with a header row.
pub fn parse_delimited(bytes: &[u8], delimiter: Delimiter) -> TableLoad {
    match read_table(bytes, delimiter) {
        Ok(dataset) if dataset.is_empty() => TableLoad::Empty(dataset),
        Ok(dataset) => TableLoad::Parsed(dataset),
        Err(e) => TableLoad::Failed(e),
    }
}

/// Load a dataset, degrading to an empty one when nothing parses.
pub fn load_dataset(bytes: &[u8]) -> GaitDataset {
    match parse_delimited(bytes, Delimiter::Comma) {
        TableLoad::Parsed(dataset) => {
            tracing::debug!(
                columns = dataset.column_count(),
                rows = dataset.row_count(),
                "Dataset parsed as comma-delimited"
            );
            return dataset;
        }
        TableLoad::Empty(_) => {
            tracing::debug!("Comma-delimited reading is empty, retrying with semicolons");
        }
        TableLoad::Failed(e) => {
            tracing::debug!(error = %e, "Comma-delimited reading failed, retrying with semicolons");
        }
    }

    match parse_delimited(bytes, Delimiter::Semicolon) {
        TableLoad::Parsed(dataset) | TableLoad::Empty(dataset) => {
            tracing::debug!(
                columns = dataset.column_count(),
                rows = dataset.row_count(),
                "Dataset parsed as semicolon-delimited"
            );
            dataset
        }
        TableLoad::Failed(e) => {
            tracing::warn!(error = %e, "Dataset unreadable, continuing with an empty table");
            GaitDataset::empty()
        }
    }
}

fn read_table(bytes: &[u8], delimiter: Delimiter) -> Result<GaitDataset, TableError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let header = reader.headers()?.clone();
    if header.is_empty() {
        return Err(TableError::NoHeader);
    }
    let width = header.len();
    let header = disambiguate_header(header.iter());

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        if record.len() > width {
            return Err(TableError::RaggedRow {
                row: idx + 1,
                expected: width,
                found: record.len(),
            });
        }
        rows.push(record.iter().map(Cell::parse).collect());
    }

    Ok(GaitDataset::from_rows(header, rows))
}

/// Blank names become `Unnamed: <i>`; repeats get `.1`, `.2`, ... suffixes.
fn disambiguate_header<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    names
        .enumerate()
        .map(|(i, name)| {
            let base = if name.trim().is_empty() {
                format!("Unnamed: {i}")
            } else {
                name.to_string()
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let unique = if *count == 0 {
                base
            } else {
                format!("{base}.{count}")
            };
            *count += 1;
            unique
        })
        .collect()
}

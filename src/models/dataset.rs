use serde::Serialize;

/// Tokens read as a missing value rather than text.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// One cell of a motion-capture table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Missing,
}

impl Cell {
    /// Classify a raw delimited field.
    ///
    /// `inf`/`Infinity` are numbers; they serialize as `null` downstream.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if NA_TOKENS.contains(&trimmed) {
            return Cell::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if !v.is_nan() => Cell::Number(v),
            _ => Cell::Text(raw.to_string()),
        }
    }

    /// Fallible numeric coercion used at the point of aggregation.
    ///
    /// Text that spells a number still coerces; anything else is `None`.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|v| !v.is_nan()),
            Cell::Missing => None,
        }
    }
}

/// A named column of cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

/// Rectangular motion-capture table. Every column has `row_count` cells.
///
/// An empty dataset (no columns, no rows) is a valid value: it is what the
/// tolerant loader hands back when the upload cannot be parsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GaitDataset {
    columns: Vec<Column>,
    row_count: usize,
}

impl GaitDataset {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from a header and rows. Short rows are padded with
    /// [`Cell::Missing`]; callers reject long rows before getting here.
    pub fn from_rows(header: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let row_count = rows.len();
        let mut columns: Vec<Column> = header
            .into_iter()
            .map(|name| Column {
                name,
                cells: Vec::with_capacity(row_count),
            })
            .collect();

        for row in rows {
            let mut cells = row.into_iter();
            for column in columns.iter_mut() {
                column.cells.push(cells.next().unwrap_or(Cell::Missing));
            }
        }

        Self { columns, row_count }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// No rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0 || self.columns.is_empty()
    }

    /// Values of a column that survive numeric coercion, in row order.
    /// `None` when the column does not exist.
    pub fn numeric_values(&self, name: &str) -> Option<Vec<f64>> {
        self.column(name)
            .map(|c| c.cells.iter().filter_map(Cell::to_number).collect())
    }
}

use super::round2;
use crate::models::{GaitDataset, TemporalRow};

/// A tracked temporal/spatial parameter and the column it is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalParameter {
    pub parameter: &'static str,
    pub unit: &'static str,
    pub side: &'static str,
    pub column: &'static str,
}

/// Emitted in this order whether or not the data carries them.
pub const TEMPORAL_PARAMETERS: [TemporalParameter; 4] = [
    TemporalParameter {
        parameter: "Stride Length",
        unit: "m",
        side: "Left",
        column: "Left_Stride_Length",
    },
    TemporalParameter {
        parameter: "Stride Length",
        unit: "m",
        side: "Right",
        column: "Right_Stride_Length",
    },
    TemporalParameter {
        parameter: "Cadence",
        unit: "steps/min",
        side: "-",
        column: "Cadence",
    },
    TemporalParameter {
        parameter: "Speed",
        unit: "m/s",
        side: "-",
        column: "Speed",
    },
];

/// Mean of a column after numeric coercion, rounded to two decimals.
///
/// Values that do not coerce are dropped one by one. `None` when the
/// column is absent or nothing survives; never zero-filled.
pub fn column_mean(dataset: &GaitDataset, column: &str) -> Option<f64> {
    let values = dataset.numeric_values(column)?;
    if values.is_empty() {
        return None;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    Some(round2(mean))
}

/// One row per tracked parameter, in declared order.
pub fn temporal_rows(pre: &GaitDataset, post: &GaitDataset) -> Vec<TemporalRow> {
    TEMPORAL_PARAMETERS
        .iter()
        .map(|p| TemporalRow {
            parameter: p.parameter,
            unit: p.unit,
            side: p.side,
            pre: column_mean(pre, p.column),
            post: column_mean(post, p.column),
        })
        .collect()
}

//! Pre/post comparison of two gait datasets.
//!
//! Temporal/spatial parameters are averaged per side with per-value
//! tolerance; joint-angle channels are reduced to min/max and must be
//! numeric when present in both datasets.

pub mod kinematic;
pub mod temporal;

pub use kinematic::*;
pub use temporal::*;

use thiserror::Error;

use crate::models::{GaitComparison, GaitDataset};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    #[error("Column '{column}' holds non-numeric value '{value}' at row {row}")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },
}

/// Round to two decimals from the exact stored value, ties to even.
///
/// Scaling by 100 first would move values such as 1.115 (stored just
/// below the tie) onto the other side of it.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Compute both result tables for a pre/post pair.
pub fn compare_datasets(
    pre: &GaitDataset,
    post: &GaitDataset,
) -> Result<GaitComparison, MetricsError> {
    let temporal = temporal_rows(pre, post);
    let kinematic = kinematic_rows(pre, post)?;

    tracing::info!(
        pre_rows = pre.row_count(),
        post_rows = post.row_count(),
        kinematic = kinematic.len(),
        "Gait datasets compared"
    );

    Ok(GaitComparison {
        temporal,
        kinematic,
    })
}

//! Gait-cycle chart of one joint-angle channel, pre vs post.
//!
//! Both series are resampled onto a 0..=100 % gait-cycle axis and drawn
//! on one raster: pre as a red dashed curve, post as a blue solid one.

pub mod raster;
pub mod resample;

pub use raster::*;
pub use resample::*;

use base64::Engine;
use serde::Serialize;
use thiserror::Error;

use crate::models::GaitDataset;

/// Channel charted when the caller does not name one.
pub const DEFAULT_CHART_COLUMN: &str = "LHipAngles_Sag_Z";

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Column '{0}' not found in dataset")]
    MissingColumn(String),

    #[error("Column '{0}' has no numeric values")]
    NoData(String),

    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Rendered chart plus the labels that go around it.
#[derive(Debug, Clone, Serialize)]
pub struct GaitChart {
    pub column: String,
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    /// Base64-encoded PNG.
    pub image: String,
}

/// Human title for the usual sagittal channels.
pub fn chart_title(column: &str) -> String {
    let title = if column.starts_with("LHip") || column.starts_with("RHip") {
        "Hip Flexion"
    } else if column.starts_with("LKnee") || column.starts_with("RKnee") {
        "Knee Flexion"
    } else if column.starts_with("LAnkle") || column.starts_with("RAnkle") {
        "Ankle Dorsiflexion"
    } else {
        column
    };
    title.to_string()
}

/// Resample `column` from both datasets and render the comparison.
pub fn render_comparison(
    pre: &GaitDataset,
    post: &GaitDataset,
    column: &str,
) -> Result<GaitChart, ChartError> {
    let pre_curve = resample_cycle(&channel_values(pre, column)?);
    let post_curve = resample_cycle(&channel_values(post, column)?);

    let png = render_png(&pre_curve, &post_curve)?;
    tracing::debug!(column, bytes = png.len(), "Gait chart rendered");

    Ok(GaitChart {
        column: column.to_string(),
        title: chart_title(column),
        x_label: "Gait %",
        y_label: "Angle",
        image: base64::engine::general_purpose::STANDARD.encode(png),
    })
}

fn channel_values(dataset: &GaitDataset, column: &str) -> Result<Vec<f64>, ChartError> {
    let values = dataset
        .numeric_values(column)
        .ok_or_else(|| ChartError::MissingColumn(column.to_string()))?;
    if values.is_empty() {
        return Err(ChartError::NoData(column.to_string()));
    }
    Ok(values)
}

//! Gait-cycle chart endpoint.
//!
//! `POST /chart`: multipart form with `pre_csv`, `post_csv` and an
//! optional `column` text field. Returns a base64 PNG of both curves.

use axum::extract::Multipart;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::FormFields;
use crate::pipeline::chart::{render_comparison, ChartError, GaitChart, DEFAULT_CHART_COLUMN};
use crate::pipeline::tabular::load_dataset;

#[derive(Serialize)]
pub struct ChartResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub chart: GaitChart,
}

/// `POST /chart`: render the pre/post curves of one joint-angle channel.
pub async fn render(multipart: Multipart) -> Result<Json<ChartResponse>, ApiError> {
    let mut form = FormFields::read(multipart).await?;

    if !form.missing(&["pre_csv", "post_csv"]).is_empty() {
        return Err(ApiError::BadRequest("pre_csv and post_csv required".into()));
    }

    let column = form.text("column").unwrap_or(DEFAULT_CHART_COLUMN).to_string();
    let pre_csv = form.take("pre_csv").unwrap_or_default();
    let post_csv = form.take("post_csv").unwrap_or_default();

    let chart = tokio::task::spawn_blocking(move || {
        let pre = load_dataset(&pre_csv);
        let post = load_dataset(&post_csv);
        render_comparison(&pre, &post, &column)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Chart worker failed: {e}")))?
    .map_err(|e| match e {
        ChartError::MissingColumn(_) | ChartError::NoData(_) => ApiError::BadRequest(e.to_string()),
        ChartError::Encode(_) => ApiError::Internal(e.to_string()),
    })?;

    Ok(Json(ChartResponse {
        status: "success",
        chart,
    }))
}

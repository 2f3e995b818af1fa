//! Pre/post study upload endpoint.
//!
//! `POST /upload`: multipart form with two gait reports and two
//! motion-capture datasets. Responds with both patient records and the
//! comparison tables.

use axum::extract::{Multipart, State};
use axum::Json;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, FormFields};
use crate::pipeline::processor::{ComparisonReport, ProcessingError, StudyUpload};

/// Form fields, all required.
pub const UPLOAD_FIELDS: [&str; 4] = ["pre_report", "post_report", "pre_csv", "post_csv"];

/// `POST /upload`: run one pre/post comparison.
///
/// Rejects the request before any processing when a field is missing.
/// Extraction and aggregation run on the blocking pool; any failure there
/// becomes an opaque 500.
pub async fn upload(
    State(ctx): State<ApiContext>,
    multipart: Multipart,
) -> Result<Json<ComparisonReport>, ApiError> {
    let request_id = Uuid::new_v4();
    let mut form = FormFields::read(multipart).await?;

    let missing = form.missing(&UPLOAD_FIELDS);
    if !missing.is_empty() {
        tracing::warn!(%request_id, ?missing, "Upload rejected: missing files");
        return Err(ApiError::BadRequest("All 4 files required".into()));
    }

    let upload = StudyUpload {
        pre_report: form.take("pre_report").unwrap_or_default(),
        post_report: form.take("post_report").unwrap_or_default(),
        pre_csv: form.take("pre_csv").unwrap_or_default(),
        post_csv: form.take("post_csv").unwrap_or_default(),
    };

    tracing::info!(
        %request_id,
        pre_report_bytes = upload.pre_report.len(),
        post_report_bytes = upload.post_report.len(),
        pre_csv_bytes = upload.pre_csv.len(),
        post_csv_bytes = upload.post_csv.len(),
        "Upload received"
    );

    let processor = ctx.processor.clone();
    let result = tokio::task::spawn_blocking(move || processor.process(&upload))
        .await
        .map_err(|e| ProcessingError::Worker(e.to_string()))
        .and_then(|r| r);

    match result {
        Ok(report) => {
            tracing::info!(
                %request_id,
                temporal = report.temporal.len(),
                kinematic = report.kinematic.len(),
                "Upload processed"
            );
            Ok(Json(report))
        }
        Err(source) => Err(ApiError::Processing { request_id, source }),
    }
}

//! Gait comparison API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//!
//! Layers (outermost → innermost): CORS → body limit → handler.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the API router.
///
/// The report UI is served from another origin, so CORS is fully open.
/// Upload size is capped by `ServerConfig::max_upload_bytes`.
pub fn gait_api_router(ctx: ApiContext) -> Router {
    let body_limit = ctx.config.max_upload_bytes;

    Router::new()
        .route("/upload", post(endpoints::upload::upload))
        .route("/chart", post(endpoints::chart::render))
        .route("/health", get(endpoints::health::check))
        .with_state(ctx)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use base64::Engine;
    use tower::ServiceExt;

    use crate::config::ServerConfig;
    use crate::pipeline::processor::tests::{FakePdf, FULL_CSV};

    const BOUNDARY: &str = "gaitcompare-test-boundary";

    fn test_router() -> Router {
        gait_api_router(ApiContext::new(Arc::new(FakePdf), ServerConfig::default()))
    }

    /// Multipart body from (field, file name, content). A `None` file name
    /// makes a plain text field.
    fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, file_name, content) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match file_name {
                Some(f) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                ),
            }
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn multipart_request(uri: &str, parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn full_upload<'a>(post_csv: &'a [u8]) -> Vec<(&'static str, Option<&'static str>, &'a [u8])> {
        vec![
            ("pre_report", Some("pre.pdf"), b"Patient Name: Jane Roe\nPatient ID: A17".as_slice()),
            ("post_report", Some("post.pdf"), b"Patient Name: Jane Roe".as_slice()),
            ("pre_csv", Some("pre.csv"), FULL_CSV),
            ("post_csv", Some("post.csv"), post_csv),
        ]
    }

    #[tokio::test]
    async fn upload_returns_comparison() {
        let response = test_router()
            .oneshot(multipart_request("/upload", &full_upload(FULL_CSV)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "success");
        assert_eq!(json["pre_patient"]["Name"], "Jane Roe");
        assert_eq!(json["pre_patient"]["Patient ID"], "A17");
        assert_eq!(json["post_patient"]["Patient ID"], "N/A");
        assert_eq!(json["temporal"].as_array().unwrap().len(), 4);
        assert_eq!(json["kinematic"].as_array().unwrap().len(), 3);
        assert_eq!(json["temporal"][0][0], "Stride Length");
    }

    #[tokio::test]
    async fn upload_missing_field_is_rejected() {
        let mut parts = full_upload(FULL_CSV);
        parts.pop();
        let response = test_router()
            .oneshot(multipart_request("/upload", &parts))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!({ "error": "All 4 files required" }));
    }

    #[tokio::test]
    async fn upload_with_unselected_file_is_rejected() {
        let mut parts = full_upload(FULL_CSV);
        parts[1] = ("post_report", Some(""), b"".as_slice());
        let response = test_router()
            .oneshot(multipart_request("/upload", &parts))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn upload_processing_failure_is_opaque() {
        let bad_post = b"LHipAngles_Sag_Z\nnot-a-number\n";
        let response = test_router()
            .oneshot(multipart_request("/upload", &full_upload(bad_post)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!({ "error": "Processing failed" }));
    }

    #[tokio::test]
    async fn chart_returns_png() {
        let parts: [(&str, Option<&str>, &[u8]); 3] = [
            ("pre_csv", Some("pre.csv"), FULL_CSV),
            ("post_csv", Some("post.csv"), FULL_CSV),
            ("column", None, b"LKneeAngles_Sag_Z"),
        ];
        let response = test_router()
            .oneshot(multipart_request("/chart", &parts))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "success");
        assert_eq!(json["column"], "LKneeAngles_Sag_Z");
        assert_eq!(json["title"], "Knee Flexion");
        assert_eq!(json["x_label"], "Gait %");
        let png = base64::engine::general_purpose::STANDARD
            .decode(json["image"].as_str().unwrap())
            .unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[tokio::test]
    async fn chart_defaults_to_hip_channel() {
        let parts: [(&str, Option<&str>, &[u8]); 2] = [
            ("pre_csv", Some("pre.csv"), FULL_CSV),
            ("post_csv", Some("post.csv"), FULL_CSV),
        ];
        let response = test_router()
            .oneshot(multipart_request("/chart", &parts))
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["column"], "LHipAngles_Sag_Z");
        assert_eq!(json["title"], "Hip Flexion");
    }

    #[tokio::test]
    async fn chart_unknown_column_is_bad_request() {
        let parts: [(&str, Option<&str>, &[u8]); 3] = [
            ("pre_csv", Some("pre.csv"), FULL_CSV),
            ("post_csv", Some("post.csv"), FULL_CSV),
            ("column", None, b"RPelvisAngles_Cor_Y"),
        ];
        let response = test_router()
            .oneshot(multipart_request("/chart", &parts))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("RPelvisAngles_Cor_Y"));
    }

    #[tokio::test]
    async fn health_reports_version() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = test_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], crate::config::APP_VERSION);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let request = Request::builder()
            .uri("/api/upload")
            .body(Body::empty())
            .unwrap();
        let response = test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let response = test_router().oneshot(request).await.unwrap();
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }
}

//! # ecoscan-server
//!
//! HTTP scan service for EcoScan.
//!
//! ## Endpoints
//!
//! | Route | Method | Description |
//! |-------|--------|-------------|
//! | `/scan` | POST | Classify a base64-encoded photo (`{"imageBase64": "..."}`) |
//! | `/health` | GET | Liveness check |
//!
//! Successful scans return the flattened
//! [`ScanReport`](ecoscan_core::ScanReport). Rejected requests return
//! `{"error": ..., "fallback_result": ...}` so clients always have a usable
//! record to render. CORS is permissive; the service is meant to sit behind
//! whatever gateway does real access control.
//!
//! Payload size is pre-checked from the base64 length (estimated bytes =
//! `len * 0.75`) before the classifier ever runs; the classification core
//! itself performs no size checks.

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use ecoscan_classify::Classifier;
use ecoscan_core::{ClassificationRecord, ScanReport};
use ecoscan_enrich::EnrichmentTable;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Size bounds applied to incoming image payloads.
#[derive(Debug, Clone)]
pub struct ScanLimits {
    /// Minimum estimated image size in bytes
    pub min_image_bytes: u64,
    /// Maximum estimated image size in megabytes
    pub max_image_mb: u64,
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self {
            min_image_bytes: 100,
            max_image_mb: 4,
        }
    }
}

/// Shared state for request handlers.
///
/// Everything here is read-only after startup, so handlers share it without
/// locking.
#[derive(Clone)]
pub struct AppState {
    /// The classification orchestrator
    pub classifier: Arc<Classifier>,
    /// The static enrichment table
    pub enrichment: Arc<EnrichmentTable>,
    /// Payload size bounds
    pub limits: ScanLimits,
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    // Base64 inflates the image ~4/3 and the JSON envelope adds more; the
    // body limit stays above the scan limit so the size check, not the
    // framework, rejects oversized payloads with the fallback body
    let body_limit = (state.limits.max_image_mb as usize * 2 + 1) * 1024 * 1024;

    Router::new()
        .route("/scan", post(scan))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    use anyhow::Context;

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("listening on http://{addr}");
    axum::serve(listener, router(state))
        .await
        .context("server error")?;

    Ok(())
}

#[derive(Serialize)]
struct ScanError {
    error: String,
    fallback_result: ScanReport,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
}

async fn scan(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let started = Instant::now();

    let Some(image_base64) = body.get("imageBase64").and_then(Value::as_str) else {
        return scan_error(&state, "Missing or invalid imageBase64", StatusCode::BAD_REQUEST);
    };

    // Estimate the decoded size from the base64 length; cheap enough to run
    // before touching the payload
    let size_bytes = image_base64.len() as f64 * 0.75;
    if size_bytes < state.limits.min_image_bytes as f64 {
        return scan_error(&state, "Image too small or corrupted", StatusCode::BAD_REQUEST);
    }

    let size_mb = size_bytes / 1_048_576.0;
    if size_mb > state.limits.max_image_mb as f64 {
        let message = format!(
            "Image too large ({size_mb:.1}MB, {}MB max)",
            state.limits.max_image_mb
        );
        return scan_error(&state, &message, StatusCode::BAD_REQUEST);
    }

    let record = state.classifier.classify(image_base64).await;
    let report = state.enrichment.enrich(&record);

    info!(
        duration_ms = started.elapsed().as_millis() as u64,
        material = record.material.as_str(),
        "scan completed"
    );

    (StatusCode::OK, Json(report)).into_response()
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Error response carrying the enriched fallback record.
fn scan_error(state: &AppState, message: &str, status: StatusCode) -> Response {
    let fallback = state.enrichment.enrich(&ClassificationRecord::fallback());
    let body = ScanError {
        error: message.to_string(),
        fallback_result: fallback,
    };

    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use ecoscan_vision::CannedVision;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_state(classifier: Classifier) -> AppState {
        AppState {
            classifier: Arc::new(classifier),
            enrichment: Arc::new(EnrichmentTable::new()),
            limits: ScanLimits::default(),
        }
    }

    fn scan_request(payload: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/scan")
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn valid_image_base64() -> String {
        STANDARD.encode(vec![0u8; 2048])
    }

    #[tokio::test]
    async fn test_scan_returns_enriched_report() {
        let reply = r#"{"item_name":"Soda Can","material":"metal","recyclable":true,"confidence":"high"}"#;
        let classifier = Classifier::with_model(Arc::new(CannedVision::new(reply)));
        let app = router(test_state(classifier));

        let payload = serde_json::json!({ "imageBase64": valid_image_base64() });
        let response = app.oneshot(scan_request(&payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["item_name"], "Soda Can");
        assert_eq!(body["material"], "metal");
        assert_eq!(body["material_code"], "ALU 41");
        assert_eq!(body["points_earned"], 15);
        assert_eq!(body["nearest_center"]["name"], "MBPJ Green Center");
    }

    #[tokio::test]
    async fn test_scan_without_model_returns_fallback_report() {
        let app = router(test_state(Classifier::disabled()));

        let payload = serde_json::json!({ "imageBase64": valid_image_base64() });
        let response = app.oneshot(scan_request(&payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["item_name"], "Unknown Item");
        assert_eq!(body["material"], "composite");
        assert_eq!(body["material_code"], "C/PAP 84");
    }

    #[tokio::test]
    async fn test_scan_missing_field_is_rejected() {
        let app = router(test_state(Classifier::disabled()));

        let response = app
            .oneshot(scan_request(&serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Missing or invalid imageBase64");
        assert_eq!(body["fallback_result"]["material"], "composite");
    }

    #[tokio::test]
    async fn test_scan_undersized_payload_is_rejected() {
        let app = router(test_state(Classifier::disabled()));

        let payload = serde_json::json!({ "imageBase64": "dGlueQ==" });
        let response = app.oneshot(scan_request(&payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Image too small or corrupted");
    }

    #[tokio::test]
    async fn test_scan_oversized_payload_is_rejected() {
        let app = router(test_state(Classifier::disabled()));

        // ~6MB estimated, over the 4MB default
        let payload = serde_json::json!({ "imageBase64": "A".repeat(8_000_000) });
        let response = app.oneshot(scan_request(&payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        let message = body["error"].as_str().unwrap();
        assert!(message.starts_with("Image too large"), "got: {message}");
    }

    #[tokio::test]
    async fn test_scan_rejects_get_method() {
        let app = router(test_state(Classifier::disabled()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/scan")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = router(test_state(Classifier::disabled()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert!(body["timestamp"].is_string());
    }
}

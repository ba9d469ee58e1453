//! HTTP routes and handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::time::Instant;
use tracing::{error, info};

use crowdpulse_core::Error;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/analyze", post(analyze))
        .fallback(fallback)
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn metrics(State(state): State<AppState>) -> String {
    state.metrics_handle.render()
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    video_url: String,
}

/// Main analysis handler
async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Response {
    metrics::counter!("crowdpulse_requests_total").increment(1);
    info!("Received analyze request");

    let start = Instant::now();
    let result = state.analyzer.analyze(&req.video_url).await;
    metrics::histogram!("crowdpulse_analysis_duration_seconds")
        .record(start.elapsed().as_secs_f64());

    match result {
        Ok(report) => {
            metrics::counter!("crowdpulse_analyses_total", "outcome" => "ok").increment(1);
            Json(report).into_response()
        }
        Err(err) if err.is_recoverable() => {
            metrics::counter!("crowdpulse_analyses_total", "outcome" => "rejected").increment(1);
            // Recoverable conditions surface as ordinary payloads with a
            // short, specific message; clients key on the `error` field.
            (StatusCode::OK, Json(json!({ "error": user_message(&err) }))).into_response()
        }
        Err(err) => {
            metrics::counter!("crowdpulse_analyses_total", "outcome" => "failed").increment(1);
            error!(error = %err, "analysis failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal error" })),
            )
                .into_response()
        }
    }
}

/// Short user-facing message for a recoverable error.
fn user_message(err: &Error) -> &'static str {
    match err {
        Error::InvalidReference => "Invalid YouTube URL format",
        Error::CommentsDisabled => "Comments are disabled for this video.",
        Error::NoCommentsFound => "No comments found.",
        _ => "internal error",
    }
}

async fn fallback() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

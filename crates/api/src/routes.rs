use analysis::AnalysisResult;
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;
use crate::metrics::MetricsSnapshot;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub inference: String,
}

pub async fn analyze_text(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!(
        "analyze",
        %request_id,
        chars = req.text.chars().count()
    );

    async move {
        match state.engine.analyze_text_with_stats(&req.text).await {
            Ok((result, stats)) => {
                state.metrics.record_success(&stats);
                Ok(Json(result))
            }
            Err(e) => {
                state.metrics.record_failure(e.is_client_error());
                if e.is_client_error() {
                    tracing::info!(error = %e, "Rejected request");
                } else {
                    tracing::error!(error = %e, "Analysis failed");
                }
                Err(ApiError::from(e))
            }
        }
    }
    .instrument(span)
    .await
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let inference = match &state.inference {
        Some(client) => match client.ping().await {
            Ok(()) => "ok".to_string(),
            Err(e) => format!("error: {:#}", e),
        },
        None => "unchecked".to_string(),
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        inference,
    })
}

pub async fn get_metrics(State(state): State<Arc<AppState>>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}

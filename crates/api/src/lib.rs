pub mod config;
pub mod error;
pub mod metrics;
pub mod routes;

use analysis::AnalysisEngine;
use axum::{
    Router,
    routing::{get, post},
};
use extract::InferenceClient;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use config::AppConfig;
pub use metrics::Metrics;

pub struct AppState {
    pub engine: AnalysisEngine,
    pub metrics: Arc<Metrics>,
    /// Pinged by `/health` when set.
    pub inference: Option<InferenceClient>,
}

impl AppState {
    pub fn new(engine: AnalysisEngine, inference: Option<InferenceClient>) -> Self {
        Self {
            engine,
            metrics: Metrics::new(),
            inference,
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/analyze", post(routes::analyze_text))
        .route("/health", get(routes::health_check))
        .route("/metrics", get(routes::get_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

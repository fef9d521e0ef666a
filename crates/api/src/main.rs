use analysis::{AnalysisEngine, Capabilities};
use anyhow::{Context, Result};
use api::{AppConfig, AppState, build_router};
use extract::{HfEntailmentClassifier, HfSummarizer, InferenceClient, NerAnalyzer};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.server.json_logs {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(
        inference_url = %config.models.inference_url,
        summarizer = %config.models.summarizer,
        entailment = %config.models.entailment,
        ner = %config.models.ner,
        "Initializing model capabilities"
    );

    let client = InferenceClient::new(
        config.models.inference_url.clone(),
        config.models.api_token.clone(),
    );

    let capabilities = Capabilities {
        summarizer: Arc::new(HfSummarizer::new(
            client.clone(),
            config.models.summarizer.clone(),
        )),
        classifier: Arc::new(HfEntailmentClassifier::new(
            client.clone(),
            config.models.entailment.clone(),
        )),
        analyzer: Arc::new(NerAnalyzer::new(client.clone(), config.models.ner.clone())),
    };

    let engine = AnalysisEngine::new(capabilities, config.engine_config());
    let state = Arc::new(AppState::new(engine, Some(client)));

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.server.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_address))?;

    tracing::info!("Server listening on http://{}", config.server.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}

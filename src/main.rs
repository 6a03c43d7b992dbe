use std::sync::Arc;

use hologram::config::AppConfig;
use hologram::llm::{DisabledGenerator, LlmClient, TextGenerator};
use hologram::{routes, services, state};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    let port = config.port;

    // Non-fatal: without a provider every submission takes the fallback path.
    let generator: Arc<dyn TextGenerator> = match LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            Arc::new(client)
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured, answering with fallbacks");
            Arc::new(DisabledGenerator)
        }
    };

    let state = state::AppState::new(generator, config);

    let _reaper = services::session::spawn_session_reaper(state.clone());

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "hologram listening");
    axum::serve(listener, app).await.expect("server failed");
}

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod openai;

use std::sync::Arc;

use axum::Router;
use tracing::info;

use crate::{
    config::AppConfig,
    error::ConfigError,
    openai::{CompletionService, OpenAiClient},
};

#[derive(Clone)]
pub struct AppState {
    pub completions: Arc<dyn CompletionService>,
}

impl AppState {
    pub fn new(completions: Arc<dyn CompletionService>) -> Self {
        Self { completions }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let client = OpenAiClient::new(&config.openai)?;
        Ok(Self::new(Arc::new(client)))
    }
}

pub fn build_app(state: AppState) -> Router {
    api::router(state)
}

pub async fn run_server(app: Router, port: u16) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Server listening on http://localhost:{port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutting down");
}

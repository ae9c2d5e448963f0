use ask_server::{build_app, config::AppConfig, logging::configure_logging, run_server, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loads `.env` first so RUST_LOG and LOG_FORMAT from it apply.
    let config = AppConfig::from_env()?;
    configure_logging()?;

    let state = AppState::from_config(&config)?;
    run_server(build_app(state), config.port).await
}

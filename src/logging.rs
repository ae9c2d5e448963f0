use std::{env, str::FromStr};

use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` filters (default `info`), `LOG_FORMAT=json`
/// switches to JSON lines.
pub fn configure_logging() -> anyhow::Result<()> {
    let filter = EnvFilter::from_str(&env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))?;
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stdout);

    let result = if env::var("LOG_FORMAT").as_deref() == Ok("json") {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };

    if let Err(e) = result {
        warn!("logging already initialized: {e}");
    }
    Ok(())
}

use bysykkel_server::config::Config;
use bysykkel_server::web::{AppState, create_router};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "bysykkel_server=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();

    let config = Config::from_env().map_err(|e| {
        tracing::error!("invalid configuration: {e}");
        e
    })?;

    let feeds = config.feed_source()?;
    tracing::info!("station feeds: {}", feeds.describe());

    let state = AppState::new(feeds);
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(|e| format!("failed to bind to {}: {}", config.bind_addr, e))?;

    tracing::info!("Bysykkel map listening on http://{}", config.bind_addr);
    tracing::info!("  GET  /              - Station map (?mode=bikes|docks)");
    tracing::info!("  GET  /api/stations  - Reconciled stations as JSON");
    tracing::info!("  GET  /health        - Health check");

    axum::serve(listener, app).await?;

    Ok(())
}

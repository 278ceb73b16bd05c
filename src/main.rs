use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tri_column_news::config::Config;
use tri_column_news::fetcher::Fetcher;
use tri_column_news::routes::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tri_column_news=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path = std::env::var("NEWS_CONFIG").unwrap_or_else(|_| "feeds.toml".to_string());
    let config = Config::load_or_default(&config_path)?;
    info!(
        "Loaded {} columns (proxy: {})",
        config.columns.len(),
        config.proxy_base
    );

    let fetcher = Fetcher::new(&config.proxy_base, Duration::from_secs(config.timeout_secs))?;
    let bind = config.bind.clone();
    let state = Arc::new(AppState::new(config, fetcher));

    let app = routes::app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!("Server starting on http://{}", bind);

    axum::serve(listener, app).await?;

    Ok(())
}

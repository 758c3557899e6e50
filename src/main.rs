use anyhow::Result;
use std::sync::Arc;

use sheet_insights::{config, logging, routes, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    logging::init_logging()?;

    // Load configuration
    let config = config::Config::from_env()?;
    let addr = config.addr();

    // The sample dataset is loaded until the first upload
    let state = Arc::new(AppState::new(config));
    let app = routes::app(state);

    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub mod datasets;

/// The full application router.
pub fn app(state: Arc<AppState>) -> Router {
    let max_file_size = state.config.max_file_size;

    Router::new()
        .merge(routes())
        .merge(datasets::routes())
        .layer(DefaultBodyLimit::max(max_file_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
}

async fn health_check() -> &'static str {
    "OK"
}

pub mod fs;
pub mod host;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{any, get};
use tower_http::trace::TraceLayer;

use crate::utils::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let base = state.config.base.as_str();
    Router::new()
        .merge(fs_router(base))
        .route("/host", get(host::host_info))
        .layer(DefaultBodyLimit::max(state.config.body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn fs_router(base: &str) -> Router<Arc<AppState>> {
    Router::new()
        // `{*op}` never matches an empty segment, so `<base>/` needs its own route.
        .route(&format!("{base}/"), any(fs::missing_operation))
        .route(&format!("{base}/{{*op}}"), any(fs::dispatch_handler))
}

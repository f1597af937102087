//! HTTP router configuration

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::api::hosts;
use crate::dashboard;
use crate::state::AppState;

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Page
        .route("/", get(dashboard::index))
        // JSON endpoints
        .route("/api/status/{ip_address}", get(hosts::get_status))
        .route("/api/wake/{mac_address}", post(hosts::wake))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(dashboard::handle_panic))
        // State
        .with_state(state)
}

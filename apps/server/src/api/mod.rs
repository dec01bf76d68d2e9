//! HTTP API surface.

mod auth;
mod wallets;

use std::sync::Arc;

use axum::{middleware, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::main_lib::AppState;

/// Builds the application router: public auth endpoints plus the protected
/// wallet API under `/api/v1`.
pub fn app_router(state: Arc<AppState>) -> Router {
    let protected = wallets::router().layer(middleware::from_fn_with_state(
        state.clone(),
        crate::auth::require_auth,
    ));

    let api = auth::router().merge(protected);

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

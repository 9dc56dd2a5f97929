//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /login`      - Login page (public)
//! - `POST /login`      - Credential submission (public)
//! - `/logout`          - End the session (public)
//! - `GET  /`           - Redirect to dashboard (session required)
//! - `GET  /dashboard`  - Dashboard (session required)
//! - `/static/*`        - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Session gate** - Signed cookie plus identity rehydration on protected routes
//! - **Path normalization** - Trailing slash handling

use crate::state::AppState;
use crate::web;
use crate::web::middleware::{tracing, web_auth};
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Builds the router without path normalization.
///
/// Integration tests drive this directly.
pub fn build_router(state: AppState) -> Router {
    let protected = web::routes::protected_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        web_auth::layer,
    ));

    Router::new()
        .merge(protected)
        .merge(web::routes::public_routes())
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state))
}

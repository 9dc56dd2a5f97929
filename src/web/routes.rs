//! Login flow route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    dashboard_handler, login_handler, login_submit_handler, logout_handler, root_handler,
};
use axum::{Router, routing::get};

/// Routes requiring an authenticated session.
///
/// Protected via [`crate::web::middleware::web_auth`].
///
/// # Endpoints
///
/// - `GET /` - Redirect to the dashboard
/// - `GET /dashboard` - Dashboard for the signed-in user
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/dashboard", get(dashboard_handler))
}

/// Routes available without a session.
///
/// # Endpoints
///
/// - `GET /login` - Login page
/// - `POST /login` - Credential submission
/// - `GET|POST /logout` - End the session
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_handler).post(login_submit_handler))
        .route("/logout", get(logout_handler).post(logout_handler))
}

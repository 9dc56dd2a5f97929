//! Logout handler.

use axum::{
    extract::State,
    http::{HeaderMap, header::COOKIE, header::SET_COOKIE},
    response::{IntoResponse, Redirect},
};

use crate::application::services::session_service::{SESSION_COOKIE, find_cookie};
use crate::state::AppState;

/// Ends the current session.
///
/// # Endpoint
///
/// `GET /logout`, `POST /logout`
///
/// Clears the session cookie and redirects to `/login?logout`. Works without a
/// session as well.
pub async fn logout_handler(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let username = headers
        .get(COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|cookies| find_cookie(cookies, SESSION_COOKIE))
        .and_then(|token| state.sessions.verify(token));

    if let Some(username) = username {
        tracing::info!(username = %username, "Logged out");
    }

    (
        [(SET_COOKIE, state.sessions.clear_cookie())],
        Redirect::to("/login?logout"),
    )
}

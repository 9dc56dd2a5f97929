//! Cookie-based session gate for protected pages.

use axum::{
    extract::{Request, State},
    http::header::{COOKIE, SET_COOKIE},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::application::services::AuthError;
use crate::application::services::session_service::{SESSION_COOKIE, find_cookie};
use crate::error::AppError;
use crate::state::AppState;

/// Admits requests carrying a valid session and attaches the caller's
/// [`crate::domain::entities::Identity`].
///
/// # Cookie Format
///
/// ```text
/// Cookie: SESSION=<token>
/// ```
///
/// # Flow
///
/// 1. Extract the `SESSION` cookie
/// 2. Verify signature and expiry via [`crate::application::services::SessionService::verify`]
/// 3. Rehydrate the identity via [`crate::application::services::Authenticator::resolve_identity`]
/// 4. Insert the identity into request extensions and continue
///
/// # Errors
///
/// - Missing cookie: redirect to `/login`
/// - Invalid or expired token, or the user no longer exists: clear the cookie
///   and redirect to `/login`
/// - Credential store failure: `500 Internal Server Error`
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let token = req
        .headers()
        .get(COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|cookies| find_cookie(cookies, SESSION_COOKIE))
        .map(str::to_string);

    let Some(token) = token else {
        return Redirect::to("/login").into_response();
    };

    let Some(username) = st.sessions.verify(&token) else {
        tracing::debug!("Rejected invalid or expired session cookie");
        return expire_session(&st);
    };

    match st.authenticator.resolve_identity(&username).await {
        Ok(identity) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        Err(AuthError::UnknownUser) => {
            tracing::warn!(username = %username, "Session refers to a user that no longer exists");
            expire_session(&st)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to resolve session identity");
            AppError::from(e).into_response()
        }
    }
}

fn expire_session(st: &AppState) -> Response {
    (
        [(SET_COOKIE, st.sessions.clear_cookie())],
        Redirect::to("/login"),
    )
        .into_response()
}

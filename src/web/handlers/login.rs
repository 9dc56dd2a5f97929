//! Login page and form submission handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect, Response},
};
use validator::Validate;

use crate::application::services::AuthError;
use crate::state::AppState;
use crate::web::dto::{LoginForm, LoginQuery};

/// Template for the login page.
///
/// Renders `templates/login.html` with:
/// - Username / password form with a remember-me checkbox
/// - A generic error banner after a failed attempt
/// - A confirmation banner after logout
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<&'static str>,
    pub logged_out: bool,
}

/// Renders the login page.
///
/// # Endpoint
///
/// `GET /login`
///
/// # Query Flags
///
/// - `error=credentials` - show "Invalid username or password"
/// - `error=input` - show "Please check your input"
/// - `logout` - show the logged-out confirmation
pub async fn login_handler(Query(query): Query<LoginQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error_message(),
        logged_out: query.logged_out(),
    }
}

/// Processes a submitted login form.
///
/// # Endpoint
///
/// `POST /login`
///
/// # Flow
///
/// 1. Validate that username and password are present
/// 2. Verify credentials via [`crate::application::services::Authenticator::authenticate`]
/// 3. On success, issue a signed session cookie and redirect to `/dashboard`
/// 4. On any failure, redirect back to `/login` with a generic error flag
///
/// Unknown usernames and wrong passwords produce the same redirect.
pub async fn login_submit_handler(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Response {
    if form.validate().is_err() {
        return Redirect::to("/login?error=input").into_response();
    }

    let remember_me = form.remember_me();

    match state.authenticator.authenticate(form.into_credentials()).await {
        Ok(user) => {
            let session = state.sessions.issue(&user.username, remember_me);
            let cookie = state.sessions.cookie(&session);

            tracing::info!(username = %user.username, remember_me, "Session established");

            ([(SET_COOKIE, cookie)], Redirect::to("/dashboard")).into_response()
        }
        Err(AuthError::Store(e)) => {
            tracing::error!(error = %e, "Credential store failed during login");
            Redirect::to("/login?error=credentials").into_response()
        }
        Err(_) => Redirect::to("/login?error=credentials").into_response(),
    }
}

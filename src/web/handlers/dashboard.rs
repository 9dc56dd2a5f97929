//! Dashboard page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    response::{IntoResponse, Redirect},
};

use crate::domain::entities::Identity;

/// Template for the dashboard page.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub username: String,
    pub role: String,
    pub authority: String,
}

/// Renders the dashboard for the signed-in user.
///
/// # Endpoint
///
/// `GET /dashboard`
///
/// The [`Identity`] is placed in request extensions by
/// [`crate::web::middleware::web_auth::layer`].
pub async fn dashboard_handler(Extension(identity): Extension<Identity>) -> impl IntoResponse {
    DashboardTemplate {
        username: identity.username,
        role: identity.role.to_string(),
        authority: identity.authority,
    }
}

/// `GET /` sends signed-in users to the dashboard.
pub async fn root_handler() -> Redirect {
    Redirect::to("/dashboard")
}

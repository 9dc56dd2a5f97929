#![allow(dead_code)]

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::http::header::SET_COOKIE;
use axum_test::{TestResponse, TestServer};
use form_login::application::services::password_service::MIN_COST;
use form_login::application::services::{Authenticator, PasswordService, SessionService};
use form_login::domain::entities::{Role, User};
use form_login::domain::repositories::UserRepository;
use form_login::infrastructure::persistence::InMemoryUserRepository;
use form_login::routes::build_router;
use form_login::state::AppState;

pub const SIGNING_SECRET: &str = "integration-test-signing-secret-0123456789";
pub const ALICE_PASSWORD: &str = "alice-password";
pub const BOB_PASSWORD: &str = "bob-password";

pub fn passwords() -> PasswordService {
    PasswordService::new(MIN_COST).unwrap()
}

pub fn create_test_user(username: &str, password: &str, role: Role) -> User {
    User::new(username, passwords().hash(password).unwrap(), role)
}

/// `alice` (ADMIN) and `bob` (USER).
pub fn default_users() -> Vec<User> {
    vec![
        create_test_user("alice", ALICE_PASSWORD, Role::Admin),
        create_test_user("bob", BOB_PASSWORD, Role::User),
    ]
}

pub fn create_authenticator(users: Vec<User>) -> Authenticator<dyn UserRepository> {
    let repo: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new(users));
    Authenticator::new(repo, passwords()).unwrap()
}

pub fn create_sessions() -> SessionService {
    SessionService::new(SIGNING_SECRET.to_string(), 1800, 86400, false)
}

pub fn create_test_state(users: Vec<User>) -> AppState {
    AppState::new(
        Arc::new(create_authenticator(users)),
        Arc::new(create_sessions()),
    )
}

pub fn create_test_server(users: Vec<User>) -> TestServer {
    TestServer::new(build_router(create_test_state(users))).unwrap()
}

/// `name=value` pair of the first `Set-Cookie` header, suitable for a `Cookie` header.
pub fn session_cookie(response: &TestResponse) -> HeaderValue {
    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("response sets a cookie")
        .to_str()
        .unwrap()
        .to_string();
    let pair = set_cookie.split(';').next().unwrap().to_string();
    HeaderValue::from_str(&pair).unwrap()
}

pub fn location(response: &TestResponse) -> String {
    response
        .headers()
        .get(axum::http::header::LOCATION)
        .expect("response has a Location header")
        .to_str()
        .unwrap()
        .to_string()
}

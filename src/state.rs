//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{Authenticator, SessionService};
use crate::domain::repositories::UserRepository;

/// Services shared by every request.
///
/// The authenticator is type-erased over its credential store so tests can
/// swap PostgreSQL for an in-memory store.
#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<Authenticator<dyn UserRepository>>,
    pub sessions: Arc<SessionService>,
}

impl AppState {
    pub fn new(
        authenticator: Arc<Authenticator<dyn UserRepository>>,
        sessions: Arc<SessionService>,
    ) -> Self {
        Self {
            authenticator,
            sessions,
        }
    }
}

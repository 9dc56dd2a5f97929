//! Business logic services for the application layer.

pub mod auth_service;
pub mod password_service;
pub mod session_service;

pub use auth_service::{AuthError, Authenticator};
pub use password_service::{PasswordError, PasswordService};
pub use session_service::{IssuedSession, SessionService};

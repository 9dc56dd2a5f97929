//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::auth_service::Authenticator`] - Credential verification and identity resolution
//! - [`services::password_service::PasswordService`] - bcrypt hashing and verification
//! - [`services::session_service::SessionService`] - Signed session cookies

pub mod services;

//! Core domain entities.
//!
//! - [`User`] - A stored account with its password hash and role
//! - [`Role`] - Closed set of roles
//! - [`Credentials`] - Transient login input, never persisted or logged
//! - [`Identity`] - Authorization data handed to the web layer

pub mod user;

pub use user::{AUTHORITY_PREFIX, Credentials, Identity, Role, UnknownRole, User};

//! Form payloads accepted by the web layer.

pub mod login;

pub use login::{LoginForm, LoginQuery};

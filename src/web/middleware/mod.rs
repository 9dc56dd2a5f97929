//! HTTP middleware for the web layer.

pub mod tracing;
pub mod web_auth;

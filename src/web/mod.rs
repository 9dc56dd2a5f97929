//! Browser-facing login flow.
//!
//! Provides the login form, logout, and the session-gated dashboard.
//! Uses Askama templates for server-side rendering.
//!
//! # Modules
//!
//! - [`dto`] - Form and query payloads
//! - [`handlers`] - Template rendering and form handlers
//! - [`middleware`] - Session gate and request tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

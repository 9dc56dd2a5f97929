//! Credential store implementations.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - PostgreSQL-backed user storage
//! - [`InMemoryUserRepository`] - Fixed user set held in memory

pub mod memory_user_repository;
pub mod pg_user_repository;

pub use memory_user_repository::InMemoryUserRepository;
pub use pg_user_repository::PgUserRepository;

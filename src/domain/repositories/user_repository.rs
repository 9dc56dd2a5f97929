//! Repository trait for the credential store.

use crate::domain::entities::User;
use crate::error::AppError;
use async_trait::async_trait;

/// Read-only lookup contract for stored users.
///
/// Absence is a normal outcome and is reported as `Ok(None)`. The `Err` arm is
/// reserved for infrastructure failures such as an unreachable database.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUserRepository`] - fixed in-memory set
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by exact username.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
}

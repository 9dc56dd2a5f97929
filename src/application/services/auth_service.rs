//! Credential verification and identity resolution.

use std::sync::Arc;

use crate::application::services::password_service::{PasswordError, PasswordService};
use crate::domain::entities::{Credentials, Identity, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use serde_json::json;

/// Failures reported by [`Authenticator`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unknown username or wrong password. Deliberately carries no detail.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No stored user backs an already-established session.
    #[error("Unknown user")]
    UnknownUser,

    /// The credential store itself failed.
    #[error("Credential store unavailable: {0}")]
    Store(#[from] AppError),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => {
                AppError::unauthorized("Invalid username or password", json!({}))
            }
            AuthError::UnknownUser => AppError::unauthorized("Unauthorized", json!({})),
            AuthError::Store(inner) => inner,
        }
    }
}

/// Decides whether submitted credentials are valid and resolves identities
/// for established sessions.
///
/// Holds only immutable data, so a single instance is shared across request
/// tasks behind an `Arc`.
pub struct Authenticator<R: UserRepository + ?Sized> {
    repository: Arc<R>,
    passwords: PasswordService,
    dummy_hash: String,
}

impl<R: UserRepository + ?Sized> Authenticator<R> {
    /// Creates a new authenticator.
    ///
    /// Precomputes a throwaway hash at the service's cost so that lookups of
    /// unknown usernames perform the same bcrypt work as wrong passwords.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError`] if the dummy hash cannot be produced.
    pub fn new(repository: Arc<R>, passwords: PasswordService) -> Result<Self, PasswordError> {
        let dummy_hash = passwords.dummy_hash()?;
        Ok(Self {
            repository,
            passwords,
            dummy_hash,
        })
    }

    /// Verifies a username/password pair.
    ///
    /// Returns the stored [`User`] unchanged on success.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the username is unknown
    /// or the password does not match; the two cases are indistinguishable.
    /// Returns [`AuthError::Store`] when the repository fails.
    pub async fn authenticate(&self, credentials: Credentials) -> Result<User, AuthError> {
        let Credentials {
            username, password, ..
        } = credentials;

        let user = self.repository.find_by_username(&username).await?;

        let hash = match &user {
            Some(user) => user.password_hash.clone(),
            None => self.dummy_hash.clone(),
        };

        let verified = self.verify(password, hash).await;

        match user {
            Some(user) if verified => {
                tracing::info!(username = %user.username, role = %user.role, "Authentication succeeded");
                Ok(user)
            }
            _ => {
                // Submitted usernames stay out of failure events.
                tracing::warn!("Authentication failed");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Produces the authoritative identity for a username taken from an
    /// established session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UnknownUser`] if no stored user matches.
    /// Returns [`AuthError::Store`] when the repository fails.
    pub async fn resolve_identity(&self, username: &str) -> Result<Identity, AuthError> {
        let user = self
            .repository
            .find_by_username(username)
            .await?
            .ok_or(AuthError::UnknownUser)?;

        Ok(Identity::from(&user))
    }

    /// Runs bcrypt verification on the blocking pool.
    async fn verify(&self, password: String, hash: String) -> bool {
        let passwords = self.passwords;
        match tokio::task::spawn_blocking(move || passwords.matches(&password, &hash)).await {
            Ok(verified) => verified,
            Err(e) => {
                tracing::error!(error = %e, "Password verification task failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::password_service::MIN_COST;
    use crate::domain::entities::Role;
    use crate::domain::repositories::MockUserRepository;

    fn passwords() -> PasswordService {
        PasswordService::new(MIN_COST).unwrap()
    }

    fn stored_user(username: &str, password: &str, role: Role) -> User {
        User::new(username, passwords().hash(password).unwrap(), role)
    }

    fn service(mock_repo: MockUserRepository) -> Authenticator<MockUserRepository> {
        Authenticator::new(Arc::new(mock_repo), passwords()).unwrap()
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut mock_repo = MockUserRepository::new();
        let user = stored_user("alice", "s3cret", Role::Admin);
        let expected = user.clone();

        mock_repo
            .expect_find_by_username()
            .withf(|username| username == "alice")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let result = service(mock_repo)
            .authenticate(Credentials::new("alice", "s3cret", false))
            .await;

        assert_eq!(result.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let mut mock_repo = MockUserRepository::new();
        let user = stored_user("alice", "s3cret", Role::User);

        mock_repo
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let result = service(mock_repo)
            .authenticate(Credentials::new("alice", "wrong", false))
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(mock_repo)
            .authenticate(Credentials::new("ghost", "anything", false))
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_failures_are_indistinguishable() {
        let mut unknown_repo = MockUserRepository::new();
        unknown_repo.expect_find_by_username().returning(|_| Ok(None));

        let mut known_repo = MockUserRepository::new();
        let user = stored_user("alice", "s3cret", Role::User);
        known_repo
            .expect_find_by_username()
            .returning(move |_| Ok(Some(user.clone())));

        let unknown = service(unknown_repo)
            .authenticate(Credentials::new("ghost", "s3cret", false))
            .await
            .unwrap_err();
        let wrong = service(known_repo)
            .authenticate(Credentials::new("alice", "nope", false))
            .await
            .unwrap_err();

        assert_eq!(unknown.to_string(), wrong.to_string());
        assert_eq!(format!("{unknown:?}"), format!("{wrong:?}"));
    }

    #[tokio::test]
    async fn test_authenticate_corrupted_hash_fails() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_username()
            .returning(|_| Ok(Some(User::new("alice", "corrupted", Role::User))));

        let result = service(mock_repo)
            .authenticate(Credentials::new("alice", "corrupted", false))
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_store_failure() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_username()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let result = service(mock_repo)
            .authenticate(Credentials::new("alice", "s3cret", false))
            .await;

        assert!(matches!(result, Err(AuthError::Store(_))));
    }

    #[tokio::test]
    async fn test_remember_me_does_not_affect_outcome() {
        let mut mock_repo = MockUserRepository::new();
        let user = stored_user("alice", "s3cret", Role::User);

        mock_repo
            .expect_find_by_username()
            .times(2)
            .returning(move |_| Ok(Some(user.clone())));

        let svc = service(mock_repo);

        assert!(svc.authenticate(Credentials::new("alice", "s3cret", true)).await.is_ok());
        assert!(svc.authenticate(Credentials::new("alice", "s3cret", false)).await.is_ok());
    }

    #[tokio::test]
    async fn test_resolve_identity_success() {
        let mut mock_repo = MockUserRepository::new();
        let user = stored_user("alice", "s3cret", Role::Admin);

        mock_repo
            .expect_find_by_username()
            .withf(|username| username == "alice")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let identity = service(mock_repo).resolve_identity("alice").await.unwrap();

        assert_eq!(
            identity,
            Identity {
                username: "alice".to_string(),
                role: Role::Admin,
                authority: "ROLE_ADMIN".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_resolve_identity_unknown_user() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(mock_repo).resolve_identity("ghost").await;

        assert!(matches!(result, Err(AuthError::UnknownUser)));
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_failed_attempt_does_not_log_submitted_username() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_username().returning(|_| Ok(None));

        let result = service(mock_repo)
            .authenticate(Credentials::new("hunter2-typed-here", "anything", false))
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Authentication failed"));
        assert!(!output.contains("hunter2-typed-here"));
        assert!(!output.contains("anything"));
    }

    #[test]
    fn test_invalid_credentials_maps_to_unauthorized() {
        let err: AppError = AuthError::InvalidCredentials.into();
        assert!(matches!(err, AppError::Unauthorized { .. }));
    }
}

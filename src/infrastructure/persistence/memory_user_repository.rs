//! Fixed in-memory user repository.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Immutable user set keyed by username.
///
/// Built once and never mutated, so concurrent lookups need no locking. Later
/// entries with a duplicate username replace earlier ones.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: HashMap<String, User>,
}

impl InMemoryUserRepository {
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|user| (user.username.clone(), user))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.get(username).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Role;

    #[tokio::test]
    async fn test_find_existing_user() {
        let repo = InMemoryUserRepository::new([User::new("alice", "hash", Role::Admin)]);

        let user = repo.find_by_username("alice").await.unwrap().unwrap();

        assert_eq!(user.username, "alice");
        assert_eq!(user.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_missing_user_is_none() {
        let repo = InMemoryUserRepository::new([User::new("alice", "hash", Role::User)]);

        assert!(repo.find_by_username("ghost").await.unwrap().is_none());
        assert!(repo.find_by_username("Alice").await.unwrap().is_none());
    }

    #[test]
    fn test_duplicate_usernames_collapse() {
        let repo = InMemoryUserRepository::new([
            User::new("alice", "old", Role::User),
            User::new("alice", "new", Role::Admin),
        ]);

        assert_eq!(repo.len(), 1);
        assert!(!repo.is_empty());
    }
}

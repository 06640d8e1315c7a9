//! User persistence.
//!
//! The repository trait keeps handlers independent of the storage
//! wiring; the store-backed implementation keys users by lowercased
//! username so logins are case-insensitive on the username.

use crate::error::{AuthError, AuthResult};
use async_trait::async_trait;
use rolodex_commons::User;
use rolodex_store::{EntityStore, Partition, StorageBackend};
use std::sync::Arc;

const USERS_PARTITION: &str = "users";

/// Abstraction over user persistence for authentication flows.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Looks up a user by username. `Ok(None)` when absent.
    async fn get_by_username(&self, username: &str) -> AuthResult<Option<User>>;

    /// Inserts a new user; fails with `UserExists` on a taken username.
    async fn insert(&self, user: &User) -> AuthResult<()>;

    /// Number of stored users. Used by bootstrap to decide whether to
    /// seed the initial admin.
    async fn count(&self) -> AuthResult<usize>;
}

struct UserStore {
    backend: Arc<dyn StorageBackend>,
}

impl EntityStore<String, User> for UserStore {
    fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    fn partition(&self) -> &str {
        USERS_PARTITION
    }
}

/// Store-backed repository.
pub struct StoreUserRepo {
    store: Arc<UserStore>,
}

impl StoreUserRepo {
    pub fn open(backend: Arc<dyn StorageBackend>) -> AuthResult<Self> {
        backend
            .create_partition(&Partition::new(USERS_PARTITION))
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;
        Ok(Self { store: Arc::new(UserStore { backend }) })
    }

    fn key(username: &str) -> String {
        username.trim().to_lowercase()
    }
}

#[async_trait]
impl UserRepository for StoreUserRepo {
    async fn get_by_username(&self, username: &str) -> AuthResult<Option<User>> {
        let store = self.store.clone();
        let key = Self::key(username);
        // Store calls are sync; run them off the async runtime.
        tokio::task::spawn_blocking(move || {
            store.get(&key).map_err(|e| AuthError::DatabaseError(e.to_string()))
        })
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?
    }

    async fn insert(&self, user: &User) -> AuthResult<()> {
        let store = self.store.clone();
        let key = Self::key(&user.username);
        let user = user.clone();
        tokio::task::spawn_blocking(move || {
            let existing = store
                .get(&key)
                .map_err(|e| AuthError::DatabaseError(e.to_string()))?;
            if existing.is_some() {
                return Err(AuthError::UserExists);
            }
            store.put(&key, &user).map_err(|e| AuthError::DatabaseError(e.to_string()))
        })
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?
    }

    async fn count(&self) -> AuthResult<usize> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || {
            store
                .scan_all()
                .map(|users| users.len())
                .map_err(|e| AuthError::DatabaseError(e.to_string()))
        })
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rolodex_commons::{Role, UserId};
    use rolodex_store::InMemoryBackend;

    fn repo() -> StoreUserRepo {
        StoreUserRepo::open(Arc::new(InMemoryBackend::new())).unwrap()
    }

    fn user(username: &str) -> User {
        User {
            id: UserId::generate(),
            username: username.into(),
            password_hash: "hash".into(),
            role: Role::User,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let repo = repo();
        repo.insert(&user("Alice")).await.unwrap();

        // Lookup is case-insensitive on the username
        let found = repo.get_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.username, "Alice");
        assert!(repo.get_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let repo = repo();
        repo.insert(&user("alice")).await.unwrap();
        let err = repo.insert(&user("ALICE")).await.unwrap_err();
        assert!(matches!(err, AuthError::UserExists));
    }

    #[tokio::test]
    async fn test_count() {
        let repo = repo();
        assert_eq!(repo.count().await.unwrap(), 0);
        repo.insert(&user("a")).await.unwrap();
        repo.insert(&user("b")).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 2);
    }
}

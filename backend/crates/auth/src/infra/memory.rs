//! In-Memory Stores
//!
//! Process-local implementations of the repository traits. Clones share
//! state, so a test can keep a handle to inspect what the router wrote.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::domain::entity::user::User;
use crate::domain::repository::{RefreshTokenStore, UserRepository};
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::{AuthError, AuthResult};

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;
        // Same contract as the unique index on users.email
        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::UserAlreadyExists);
        }
        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.users.read().await.values().any(|u| &u.email == email))
    }
}

struct StoredToken {
    token: String,
    expires_at: Instant,
}

#[derive(Clone, Default)]
pub struct InMemoryRefreshTokenStore {
    tokens: Arc<RwLock<HashMap<UserId, StoredToken>>>,
}

impl InMemoryRefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current token for `user_id`, ignoring expired entries
    pub async fn get(&self, user_id: &UserId) -> Option<String> {
        let tokens = self.tokens.read().await;
        tokens
            .get(user_id)
            .filter(|stored| stored.expires_at > Instant::now())
            .map(|stored| stored.token.clone())
    }

    /// Number of stored tokens, expired ones included
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }
}

impl RefreshTokenStore for InMemoryRefreshTokenStore {
    async fn store(&self, user_id: &UserId, token: &str, ttl: Duration) -> AuthResult<()> {
        let stored = StoredToken {
            token: token.to_string(),
            expires_at: Instant::now() + ttl,
        };
        self.tokens.write().await.insert(*user_id, stored);
        Ok(())
    }

    async fn find(&self, user_id: &UserId) -> AuthResult<Option<String>> {
        let mut tokens = self.tokens.write().await;
        match tokens.get(user_id) {
            Some(stored) if stored.expires_at > Instant::now() => Ok(Some(stored.token.clone())),
            Some(_) => {
                tokens.remove(user_id);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn revoke(&self, user_id: &UserId) -> AuthResult<()> {
        self.tokens.write().await.remove(user_id);
        Ok(())
    }
}

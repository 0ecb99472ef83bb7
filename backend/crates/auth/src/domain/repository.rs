//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use std::time::Duration;

use crate::domain::entity::user::User;
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user
    ///
    /// A duplicate email must fail with `AuthError::UserAlreadyExists`.
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by (normalized) email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if email is registered
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;
}

/// Refresh token store trait
///
/// Holds at most one refresh token per user. Storing overwrites.
#[trait_variant::make(RefreshTokenStore: Send)]
pub trait LocalRefreshTokenStore {
    /// Save the user's current refresh token, expiring after `ttl`
    async fn store(&self, user_id: &UserId, token: &str, ttl: Duration) -> AuthResult<()>;

    /// Current refresh token, if any and not expired
    async fn find(&self, user_id: &UserId) -> AuthResult<Option<String>>;

    /// Delete the user's refresh token (no-op when absent)
    async fn revoke(&self, user_id: &UserId) -> AuthResult<()>;
}

/// Key under which a user's refresh token is stored
pub fn refresh_token_key(user_id: &UserId) -> String {
    format!("refresh_token:{}", user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_token_key() {
        let uuid = uuid::Uuid::parse_str("2f1c7a0e-8d44-4c47-9a37-0b3a4b0d5e11").unwrap();
        let user_id = UserId::from_uuid(uuid);
        assert_eq!(
            refresh_token_key(&user_id),
            "refresh_token:2f1c7a0e-8d44-4c47-9a37-0b3a4b0d5e11"
        );
    }
}

//! Refresh Access Token Use Case
//!
//! Exchanges a valid, currently stored refresh token for a new access
//! token. The refresh token itself is not rotated.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use platform::crypto::constant_time_eq;

use crate::application::token::{TokenError, TokenService};
use crate::domain::repository::RefreshTokenStore;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

pub struct RefreshOutput {
    pub user_id: UserId,
    pub access_token: String,
    pub access_expires_at: DateTime<Utc>,
}

pub struct RefreshAccessTokenUseCase<S>
where
    S: RefreshTokenStore,
{
    refresh_store: Arc<S>,
    tokens: Arc<TokenService>,
}

impl<S> RefreshAccessTokenUseCase<S>
where
    S: RefreshTokenStore,
{
    pub fn new(refresh_store: Arc<S>, tokens: Arc<TokenService>) -> Self {
        Self {
            refresh_store,
            tokens,
        }
    }

    pub async fn execute(&self, refresh_token: Option<&str>) -> AuthResult<RefreshOutput> {
        let token = refresh_token.ok_or(AuthError::RefreshTokenMissing)?;

        let claims = self.tokens.verify_refresh(token).map_err(|e| match e {
            TokenError::Expired | TokenError::Invalid(_) => AuthError::RefreshTokenInvalid,
            other => AuthError::Token(other),
        })?;
        let user_id = claims.user_id();

        let stored = self.refresh_store.find(&user_id).await?;
        let matches = stored
            .as_deref()
            .is_some_and(|stored| constant_time_eq(stored.as_bytes(), token.as_bytes()));
        if !matches {
            return Err(AuthError::RefreshTokenRevoked);
        }

        let (access_token, access_expires_at) = self.tokens.issue_access(&user_id)?;

        tracing::debug!(user_id = %user_id, "Access token refreshed");

        Ok(RefreshOutput {
            user_id,
            access_token,
            access_expires_at,
        })
    }
}

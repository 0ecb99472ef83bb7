//! Sign In Use Case
//!
//! Checks credentials and opens a new session. The new refresh token
//! replaces whatever was stored for the user.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::{TokenPair, TokenService};
use crate::domain::entity::user::User;
use crate::domain::repository::{RefreshTokenStore, UserRepository};
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    pub user: User,
    pub tokens: TokenPair,
}

/// Sign in use case
pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: RefreshTokenStore,
{
    user_repo: Arc<U>,
    refresh_store: Arc<S>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignInUseCase<U, S>
where
    U: UserRepository,
    S: RefreshTokenStore,
{
    pub fn new(
        user_repo: Arc<U>,
        refresh_store: Arc<S>,
        tokens: Arc<TokenService>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            refresh_store,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        // Malformed input is reported the same way as a wrong password
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;
        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.password.verify(&raw_password, self.config.pepper()) {
            tracing::warn!(user_id = %user.user_id, "Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        if user.password.needs_rehash() {
            tracing::info!(user_id = %user.user_id, "Password hash uses outdated parameters");
        }

        let tokens = self.tokens.issue_pair(&user.user_id)?;
        self.refresh_store
            .store(
                &user.user_id,
                &tokens.refresh_token,
                self.config.refresh_token_ttl,
            )
            .await?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutput { user, tokens })
    }
}

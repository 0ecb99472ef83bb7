//! Authenticate Use Case
//!
//! Resolves the user behind an access token. Backs the auth middleware
//! and therefore the profile endpoint.

use std::sync::Arc;

use crate::application::token::{TokenError, TokenService};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct AuthenticateUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenService>,
}

impl<U> AuthenticateUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenService>) -> Self {
        Self { user_repo, tokens }
    }

    pub async fn execute(&self, access_token: Option<&str>) -> AuthResult<User> {
        let token = access_token.ok_or(AuthError::AccessTokenMissing)?;

        let claims = self.tokens.verify_access(token).map_err(|e| match e {
            TokenError::Expired => AuthError::AccessTokenExpired,
            TokenError::Invalid(_) => AuthError::AccessTokenInvalid,
            other => AuthError::Token(other),
        })?;

        self.user_repo
            .find_by_id(&claims.user_id())
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

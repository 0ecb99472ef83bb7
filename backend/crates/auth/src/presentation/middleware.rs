//! Auth Middleware
//!
//! `require_access_token` guards routes with the `accessToken` cookie and
//! stores the resolved [`CurrentUser`] in request extensions.
//! `require_admin` must run after it.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::application::AuthenticateUseCase;
use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_id::UserId, user_role::UserRole,
};
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<U>
where
    U: UserRepository + Clone + Send + Sync + 'static,
{
    pub user_repo: Arc<U>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<AuthConfig>,
}

/// Authenticated user, without credentials
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub name: DisplayName,
    pub email: Email,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Middleware that requires a valid access token
pub async fn require_access_token<U>(
    State(state): State<AuthMiddlewareState<U>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError>
where
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(req.headers(), &state.config.access_cookie_name);

    let use_case = AuthenticateUseCase::new(state.user_repo.clone(), state.tokens.clone());
    let user = use_case.execute(token.as_deref()).await?;

    req.extensions_mut().insert(CurrentUser::from(user));

    Ok(next.run(req).await)
}

/// Middleware that lets only admins through
pub async fn require_admin(req: Request<Body>, next: Next) -> Result<Response, AuthError> {
    let is_admin = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AuthError::AccessTokenMissing)?
        .role
        .is_admin();

    if !is_admin {
        return Err(AuthError::AdminOnly);
    }

    Ok(next.run(req).await)
}

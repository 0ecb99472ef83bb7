//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::repository::{RefreshTokenStore, UserRepository};
use crate::infra::{postgres::PgUserRepository, redis::RedisRefreshTokenStore};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_access_token};

/// Create the Auth router backed by PostgreSQL and Redis
pub fn auth_router(
    user_repo: PgUserRepository,
    refresh_store: RedisRefreshTokenStore,
    config: AuthConfig,
) -> Router {
    auth_router_generic(user_repo, refresh_store, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<U, S>(user_repo: U, refresh_store: S, config: AuthConfig) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: RefreshTokenStore + Clone + Send + Sync + 'static,
{
    let config = Arc::new(config);
    let tokens = Arc::new(TokenService::new(&config));
    let user_repo = Arc::new(user_repo);

    let guard = AuthMiddlewareState {
        user_repo: user_repo.clone(),
        tokens: tokens.clone(),
        config: config.clone(),
    };

    let state = AuthAppState {
        user_repo,
        refresh_store: Arc::new(refresh_store),
        tokens,
        config,
    };

    Router::new()
        .route("/signup", post(handlers::sign_up::<U, S>))
        .route("/login", post(handlers::sign_in::<U, S>))
        .route("/logout", post(handlers::sign_out::<U, S>))
        .route("/refresh-token", post(handlers::refresh_token::<U, S>))
        .route(
            "/profile",
            get(handlers::profile).route_layer(middleware::from_fn_with_state(
                guard,
                require_access_token::<U>,
            )),
        )
        .with_state(state)
}

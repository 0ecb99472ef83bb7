//! HTTP Handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use std::sync::Arc;

use platform::cookie::{CookieConfig, delete_cookie_header, extract_cookie, set_cookie_header};

use crate::application::config::AuthConfig;
use crate::application::token::{TokenPair, TokenService};
use crate::application::{
    RefreshAccessTokenUseCase, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput,
    SignUpUseCase,
};
use crate::domain::repository::{RefreshTokenStore, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    MessageResponse, ProfileResponse, SignInRequest, SignUpRequest, SignUpResponse,
    UserSummaryResponse,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<U, S>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: RefreshTokenStore + Clone + Send + Sync + 'static,
{
    pub user_repo: Arc<U>,
    pub refresh_store: Arc<S>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/signup
pub async fn sign_up<U, S>(
    State(state): State<AuthAppState<U, S>>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: RefreshTokenStore + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let use_case = SignUpUseCase::new(
        state.user_repo.clone(),
        state.refresh_store.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignUpInput {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        token_cookies(&state.config, &output.tokens)?,
        Json(SignUpResponse {
            user: UserSummaryResponse::from(&output.user),
            message: "User created successfully".to_string(),
        }),
    ))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/auth/login
pub async fn sign_in<U, S>(
    State(state): State<AuthAppState<U, S>>,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: RefreshTokenStore + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let use_case = SignInUseCase::new(
        state.user_repo.clone(),
        state.refresh_store.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::OK,
        token_cookies(&state.config, &output.tokens)?,
        Json(UserSummaryResponse::from(&output.user)),
    ))
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /api/auth/logout
pub async fn sign_out<U, S>(
    State(state): State<AuthAppState<U, S>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: RefreshTokenStore + Clone + Send + Sync + 'static,
{
    let refresh_token = extract_cookie(&headers, &state.config.refresh_cookie_name);

    let use_case = SignOutUseCase::new(state.refresh_store.clone(), state.tokens.clone());
    use_case.execute(refresh_token.as_deref()).await?;

    let cleared = AppendHeaders([
        (header::SET_COOKIE, delete_cookie(&state.config.access_cookie())?),
        (header::SET_COOKIE, delete_cookie(&state.config.refresh_cookie())?),
    ]);

    Ok((
        StatusCode::OK,
        cleared,
        Json(MessageResponse::new("Logged out successfully")),
    ))
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /api/auth/refresh-token
pub async fn refresh_token<U, S>(
    State(state): State<AuthAppState<U, S>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: RefreshTokenStore + Clone + Send + Sync + 'static,
{
    let refresh_token = extract_cookie(&headers, &state.config.refresh_cookie_name);

    let use_case =
        RefreshAccessTokenUseCase::new(state.refresh_store.clone(), state.tokens.clone());
    let output = use_case.execute(refresh_token.as_deref()).await?;

    let cookie = set_cookie(&state.config.access_cookie(), &output.access_token)?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse::new("Tokens refreshed successfully")),
    ))
}

// ============================================================================
// Profile
// ============================================================================

/// GET /api/auth/profile (behind `require_access_token`)
pub async fn profile(Extension(user): Extension<CurrentUser>) -> Json<ProfileResponse> {
    Json(ProfileResponse::from(&user))
}

// ============================================================================
// Helpers
// ============================================================================

/// `Set-Cookie` headers for both tokens
fn token_cookies(
    config: &AuthConfig,
    tokens: &TokenPair,
) -> AuthResult<AppendHeaders<[(header::HeaderName, HeaderValue); 2]>> {
    Ok(AppendHeaders([
        (
            header::SET_COOKIE,
            set_cookie(&config.access_cookie(), &tokens.access_token)?,
        ),
        (
            header::SET_COOKIE,
            set_cookie(&config.refresh_cookie(), &tokens.refresh_token)?,
        ),
    ]))
}

fn set_cookie(cookie: &CookieConfig, value: &str) -> AuthResult<HeaderValue> {
    set_cookie_header(cookie, value)
        .map_err(|e| AuthError::Internal(format!("Invalid cookie value: {}", e)))
}

fn delete_cookie(cookie: &CookieConfig) -> AuthResult<HeaderValue> {
    delete_cookie_header(cookie)
        .map_err(|e| AuthError::Internal(format!("Invalid cookie value: {}", e)))
}

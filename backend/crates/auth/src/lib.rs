//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, token service, configuration
//! - `infra/` - PostgreSQL, Redis and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, middleware, router
//!
//! ## Features
//! - Customer signup and login with email + password
//! - Short-lived access token and long-lived refresh token, both JWTs in
//!   HttpOnly cookies
//! - One stored refresh token per user; login replaces it, logout deletes it
//! - Role-based access (Customer, Admin)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Access and refresh tokens signed with separate secrets
//! - A refresh token is honoured only while it is the stored one

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::{AuthConfig, AuthConfigError};
pub use error::{AuthError, AuthResult};
pub use infra::{
    InMemoryRefreshTokenStore, InMemoryUserRepository, PgUserRepository, RedisRefreshTokenStore,
};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

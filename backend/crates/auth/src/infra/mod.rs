//! Infrastructure Layer
//!
//! Storage implementations of the domain repository traits.

pub mod memory;
pub mod postgres;
pub mod redis;

pub use memory::{InMemoryRefreshTokenStore, InMemoryUserRepository};
pub use postgres::PgUserRepository;
pub use self::redis::RedisRefreshTokenStore;

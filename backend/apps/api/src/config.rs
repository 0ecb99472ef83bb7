//! Server Configuration
//!
//! Process-level settings read from the environment. Auth secrets live in
//! `auth::AuthConfig`.

use anyhow::{Context, bail};
use std::env;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
const DEFAULT_CLIENT_URL: &str = "http://localhost:5173";

/// Maximum accepted request body (JSON)
pub const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: String,
    pub redis_url: String,
    /// Frontend origin allowed by CORS, with credentials
    pub client_url: String,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("PORT must be a port number, got {:?}", raw))?,
            Err(_) => DEFAULT_PORT,
        };

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        if database_url.trim().is_empty() {
            bail!("DATABASE_URL must not be empty");
        }

        let redis_url = env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string());

        let client_url = env::var("CLIENT_URL").unwrap_or_else(|_| {
            tracing::warn!(
                default = DEFAULT_CLIENT_URL,
                "CLIENT_URL not set, allowing the default frontend origin"
            );
            DEFAULT_CLIENT_URL.to_string()
        });

        Ok(Self {
            port,
            database_url,
            redis_url,
            client_url,
        })
    }
}

//! Application Configuration
//!
//! Token secrets, lifetimes and cookie settings for the Auth module.

use std::fmt;
use std::time::Duration;

use platform::cookie::CookieConfig;
/// Re-export SameSite from platform
pub use platform::cookie::SameSite;
use thiserror::Error;

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Bytes of randomness for secrets generated in debug builds
const GENERATED_SECRET_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum AuthConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 key for access tokens
    pub access_token_secret: Vec<u8>,
    /// HS256 key for refresh tokens, distinct from the access key
    pub refresh_token_secret: Vec<u8>,
    /// Access token lifetime (15 minutes)
    pub access_token_ttl: Duration,
    /// Refresh token lifetime and store TTL (7 days)
    pub refresh_token_ttl: Duration,
    pub access_cookie_name: String,
    pub refresh_cookie_name: String,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy (`None` so a separately hosted frontend can send them)
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl AuthConfig {
    pub fn new(
        access_token_secret: impl Into<Vec<u8>>,
        refresh_token_secret: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            access_token_secret: access_token_secret.into(),
            refresh_token_secret: refresh_token_secret.into(),
            access_token_ttl: Duration::from_secs(15 * 60),
            refresh_token_ttl: Duration::from_secs(7 * 24 * 3600),
            access_cookie_name: ACCESS_TOKEN_COOKIE.to_string(),
            refresh_cookie_name: REFRESH_TOKEN_COOKIE.to_string(),
            cookie_secure: true,
            cookie_same_site: SameSite::None,
            password_pepper: None,
        }
    }

    /// Create config with random secrets (for development and tests)
    pub fn with_random_secrets() -> Self {
        Self::new(
            platform::crypto::random_bytes(GENERATED_SECRET_LEN),
            platform::crypto::random_bytes(GENERATED_SECRET_LEN),
        )
    }

    /// Load from the process environment
    ///
    /// `ACCESS_TOKEN_SECRET` and `REFRESH_TOKEN_SECRET` are required in
    /// release builds. Debug builds fall back to random secrets, which
    /// invalidates every issued token on restart.
    /// `PASSWORD_PEPPER` and `COOKIE_SECURE` are optional.
    pub fn from_env() -> Result<Self, AuthConfigError> {
        let access = secret_from_env("ACCESS_TOKEN_SECRET")?;
        let refresh = secret_from_env("REFRESH_TOKEN_SECRET")?;
        let mut config = Self::new(access, refresh);

        config.password_pepper = std::env::var("PASSWORD_PEPPER")
            .ok()
            .filter(|p| !p.is_empty())
            .map(String::into_bytes);

        if let Ok(value) = std::env::var("COOKIE_SECURE") {
            let secure = match value.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(AuthConfigError::InvalidValue {
                        name: "COOKIE_SECURE",
                        value,
                    });
                }
            };
            config.set_cookie_secure(secure);
        }

        Ok(config)
    }

    /// Toggle the `Secure` cookie attribute
    ///
    /// Browsers drop `SameSite=None` cookies that are not `Secure`, so
    /// insecure cookies fall back to `Lax`.
    pub fn set_cookie_secure(&mut self, secure: bool) {
        self.cookie_secure = secure;
        self.cookie_same_site = if secure {
            SameSite::None
        } else {
            SameSite::Lax
        };
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    pub fn access_cookie(&self) -> CookieConfig {
        self.cookie(&self.access_cookie_name, self.access_token_ttl)
    }

    pub fn refresh_cookie(&self) -> CookieConfig {
        self.cookie(&self.refresh_cookie_name, self.refresh_token_ttl)
    }

    fn cookie(&self, name: &str, ttl: Duration) -> CookieConfig {
        CookieConfig {
            name: name.to_string(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(ttl.as_secs() as i64),
        }
    }
}

fn secret_from_env(name: &'static str) -> Result<Vec<u8>, AuthConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value.into_bytes()),
        _ if cfg!(debug_assertions) => {
            tracing::warn!(
                variable = name,
                "Secret not set, using a random one for this process"
            );
            Ok(platform::crypto::random_bytes(GENERATED_SECRET_LEN))
        }
        _ => Err(AuthConfigError::MissingVar(name)),
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_token_secret", &"[REDACTED]")
            .field("refresh_token_secret", &"[REDACTED]")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("access_cookie_name", &self.access_cookie_name)
            .field("refresh_cookie_name", &self.refresh_cookie_name)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field(
                "password_pepper",
                &self.password_pepper.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

//! Token Service
//!
//! Issues and verifies the HS256 JWTs behind the `accessToken` and
//! `refreshToken` cookies. Access and refresh tokens are signed with
//! different secrets, so one can never be accepted as the other.

use std::fmt;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::value_object::user_id::UserId;

/// Seconds of clock skew tolerated on `exp`
const LEEWAY_SECS: u64 = 5;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,

    #[error("Invalid token: {0}")]
    Invalid(String),

    #[error("Failed to sign token: {0}")]
    Signing(String),
}

/// JWT payload shared by both token kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub iat: i64,
    pub exp: i64,
    /// Unique per token, so two tokens minted in the same second differ
    pub jti: Uuid,
}

impl TokenClaims {
    fn new(user_id: &UserId, now: DateTime<Utc>, exp: DateTime<Utc>) -> Self {
        Self {
            user_id: *user_id.as_uuid(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4(),
        }
    }

    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.user_id)
    }
}

/// Freshly issued access + refresh tokens
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct TokenService {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl: chrono::Duration,
    refresh_ttl: chrono::Duration,
    validation: Validation,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = LEEWAY_SECS;
        validation.set_required_spec_claims(&["exp", "iat"]);

        Self {
            access_encoding: EncodingKey::from_secret(&config.access_token_secret),
            access_decoding: DecodingKey::from_secret(&config.access_token_secret),
            refresh_encoding: EncodingKey::from_secret(&config.refresh_token_secret),
            refresh_decoding: DecodingKey::from_secret(&config.refresh_token_secret),
            access_ttl: to_chrono(config.access_token_ttl),
            refresh_ttl: to_chrono(config.refresh_token_ttl),
            validation,
        }
    }

    /// Issue an access token and a refresh token for `user_id`
    pub fn issue_pair(&self, user_id: &UserId) -> Result<TokenPair, TokenError> {
        let now = Utc::now();
        let access_expires_at = now + self.access_ttl;
        let refresh_expires_at = now + self.refresh_ttl;

        let access_token = sign(
            &TokenClaims::new(user_id, now, access_expires_at),
            &self.access_encoding,
        )?;
        let refresh_token = sign(
            &TokenClaims::new(user_id, now, refresh_expires_at),
            &self.refresh_encoding,
        )?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        })
    }

    /// Issue a standalone access token (after refresh)
    pub fn issue_access(&self, user_id: &UserId) -> Result<(String, DateTime<Utc>), TokenError> {
        let now = Utc::now();
        let expires_at = now + self.access_ttl;
        let token = sign(
            &TokenClaims::new(user_id, now, expires_at),
            &self.access_encoding,
        )?;
        Ok((token, expires_at))
    }

    pub fn verify_access(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.verify(token, &self.access_decoding)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.verify(token, &self.refresh_decoding)
    }

    fn verify(&self, token: &str, key: &DecodingKey) -> Result<TokenClaims, TokenError> {
        decode::<TokenClaims>(token, key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}

fn sign(claims: &TokenClaims, key: &EncodingKey) -> Result<String, TokenError> {
    encode(&Header::new(Algorithm::HS256), claims, key)
        .map_err(|e| TokenError::Signing(e.to_string()))
}

fn to_chrono(ttl: std::time::Duration) -> chrono::Duration {
    chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(&AuthConfig::new("access-secret", "refresh-secret"))
    }

    #[test]
    fn test_issue_and_verify_pair() {
        let service = service();
        let user_id = UserId::new();

        let pair = service.issue_pair(&user_id).unwrap();
        let access = service.verify_access(&pair.access_token).unwrap();
        let refresh = service.verify_refresh(&pair.refresh_token).unwrap();

        assert_eq!(access.user_id(), user_id);
        assert_eq!(refresh.user_id(), user_id);
        assert_eq!(access.exp - access.iat, 15 * 60);
        assert_eq!(refresh.exp - refresh.iat, 7 * 24 * 3600);
        assert!(pair.refresh_expires_at > pair.access_expires_at);
    }

    #[test]
    fn test_tokens_are_not_interchangeable() {
        let service = service();
        let pair = service.issue_pair(&UserId::new()).unwrap();

        assert!(matches!(
            service.verify_access(&pair.refresh_token),
            Err(TokenError::Invalid(_))
        ));
        assert!(matches!(
            service.verify_refresh(&pair.access_token),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_same_second_tokens_differ() {
        let service = service();
        let user_id = UserId::new();

        let first = service.issue_pair(&user_id).unwrap();
        let second = service.issue_pair(&user_id).unwrap();
        assert_ne!(first.refresh_token, second.refresh_token);
    }

    #[test]
    fn test_claims_use_user_id_field() {
        let service = service();
        let user_id = UserId::new();
        let (token, _) = service.issue_access(&user_id).unwrap();

        let decoded =
            decode::<serde_json::Value>(&token, &service.access_decoding, &service.validation)
                .unwrap()
                .claims;
        assert_eq!(decoded["userId"], user_id.to_string());
    }

    #[test]
    fn test_expired_token() {
        let service = service();
        let now = Utc::now();
        let claims = TokenClaims {
            user_id: Uuid::new_v4(),
            iat: (now - chrono::Duration::hours(2)).timestamp(),
            exp: (now - chrono::Duration::hours(1)).timestamp(),
            jti: Uuid::new_v4(),
        };
        let token = sign(&claims, &service.access_encoding).unwrap();

        assert!(matches!(
            service.verify_access(&token),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_garbage_token() {
        assert!(matches!(
            service().verify_refresh("not.a.jwt"),
            Err(TokenError::Invalid(_))
        ));
    }
}

//! User Password Value Object
//!
//! Wraps `platform::password` with the auth error vocabulary.
//! `RawPassword` is the submitted clear text (zeroized on drop),
//! `UserPassword` the Argon2id hash kept in the user store.

use kernel::error::{
    app_error::{AppError, AppResult, ResultExt},
    kind::ErrorKind,
};
use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};
use std::fmt;

/// Password as submitted by the client
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate a submitted password
    ///
    /// 6 to 128 code points after NFKC normalization, no control characters.
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::EmptyOrWhitespace => AppError::bad_request("Password is required"),
            other => AppError::bad_request(other.to_string()),
        })?;

        Ok(Self(clear_text))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Hashed password in PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a validated password
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        raw.inner()
            .hash(pepper)
            .map(Self)
            .map_app_err(ErrorKind::InternalServerError, "Password hashing failed")
    }

    /// Rebuild from a stored PHC string
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        HashedPassword::from_phc_string(phc_string)
            .map(Self)
            .map_app_err(
                ErrorKind::InternalServerError,
                "Invalid password hash in database",
            )
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// `pepper` must be the one used when hashing
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }

    pub fn needs_rehash(&self) -> bool {
        self.0.needs_rehash()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

    #[test]
    fn test_raw_password_validation() {
        assert!(RawPassword::new("secret1".to_string()).is_ok());
        assert!(RawPassword::new("a".repeat(MIN_PASSWORD_LENGTH)).is_ok());
        assert!(RawPassword::new("a".repeat(MAX_PASSWORD_LENGTH)).is_ok());

        let err = RawPassword::new("a".repeat(MIN_PASSWORD_LENGTH - 1)).unwrap_err();
        assert_eq!(err.message(), "Password must be at least 6 characters long");

        assert!(RawPassword::new("a".repeat(MAX_PASSWORD_LENGTH + 1)).is_err());

        let err = RawPassword::new(String::new()).unwrap_err();
        assert_eq!(err.message(), "Password is required");
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("correct horse".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        assert!(hashed.verify(&raw, None));

        let wrong = RawPassword::new("battery staple".to_string()).unwrap();
        assert!(!hashed.verify(&wrong, None));
    }

    #[test]
    fn test_pepper_must_match() {
        let raw = RawPassword::new("correct horse".to_string()).unwrap();
        let pepper = b"storefront";
        let hashed = UserPassword::from_raw(&raw, Some(pepper)).unwrap();

        assert!(hashed.verify(&raw, Some(pepper)));
        assert!(!hashed.verify(&raw, None));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let raw = RawPassword::new("correct horse".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();

        let restored = UserPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&raw, None));
        assert!(!restored.needs_rehash());
    }

    #[test]
    fn test_corrupt_hash_is_server_error() {
        let err = UserPassword::from_phc_string("plaintext-oops").unwrap_err();
        assert!(err.is_server_error());
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("topsecret".to_string()).unwrap();
        let debug = format!("{:?}", raw);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("topsecret"));
    }
}

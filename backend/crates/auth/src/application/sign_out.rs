//! Sign Out Use Case
//!
//! Revokes the stored refresh token of the user the cookie belongs to.

use std::sync::Arc;

use crate::application::token::TokenService;
use crate::domain::repository::RefreshTokenStore;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: RefreshTokenStore,
{
    refresh_store: Arc<S>,
    tokens: Arc<TokenService>,
}

impl<S> SignOutUseCase<S>
where
    S: RefreshTokenStore,
{
    pub fn new(refresh_store: Arc<S>, tokens: Arc<TokenService>) -> Self {
        Self {
            refresh_store,
            tokens,
        }
    }

    /// Sign out; missing or unverifiable tokens are not an error
    pub async fn execute(&self, refresh_token: Option<&str>) -> AuthResult<()> {
        let Some(token) = refresh_token else {
            tracing::debug!("Sign out without refresh token");
            return Ok(());
        };

        match self.tokens.verify_refresh(token) {
            Ok(claims) => {
                let user_id = claims.user_id();
                self.refresh_store.revoke(&user_id).await?;
                tracing::info!(user_id = %user_id, "User signed out");
            }
            Err(e) => {
                tracing::debug!(error = %e, "Sign out with unverifiable refresh token");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::AuthConfig;
    use crate::domain::value_object::user_id::UserId;
    use crate::infra::memory::InMemoryRefreshTokenStore;
    use std::time::Duration;

    fn use_case() -> (
        SignOutUseCase<InMemoryRefreshTokenStore>,
        InMemoryRefreshTokenStore,
        Arc<TokenService>,
    ) {
        let store = InMemoryRefreshTokenStore::new();
        let tokens = Arc::new(TokenService::new(&AuthConfig::with_random_secrets()));
        (
            SignOutUseCase::new(Arc::new(store.clone()), tokens.clone()),
            store,
            tokens,
        )
    }

    #[tokio::test]
    async fn test_sign_out_revokes_stored_token() {
        let (use_case, store, tokens) = use_case();
        let user_id = UserId::new();
        let pair = tokens.issue_pair(&user_id).unwrap();
        store
            .store(&user_id, &pair.refresh_token, Duration::from_secs(60))
            .await
            .unwrap();

        use_case.execute(Some(&pair.refresh_token)).await.unwrap();

        assert_eq!(store.get(&user_id).await, None);
    }

    #[tokio::test]
    async fn test_sign_out_tolerates_missing_or_bad_token() {
        let (use_case, _, _) = use_case();
        assert!(use_case.execute(None).await.is_ok());
        assert!(use_case.execute(Some("garbage")).await.is_ok());
    }
}

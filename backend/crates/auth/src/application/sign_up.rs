//! Sign Up Use Case
//!
//! Creates a customer account and opens its first session.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::{TokenPair, TokenService};
use crate::domain::entity::user::User;
use crate::domain::repository::{RefreshTokenStore, UserRepository};
use crate::domain::value_object::{
    display_name::DisplayName,
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Sign up output
pub struct SignUpOutput {
    pub user: User,
    pub tokens: TokenPair,
}

/// Sign up use case
pub struct SignUpUseCase<U, S>
where
    U: UserRepository,
    S: RefreshTokenStore,
{
    user_repo: Arc<U>,
    refresh_store: Arc<S>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignUpUseCase<U, S>
where
    U: UserRepository,
    S: RefreshTokenStore,
{
    pub fn new(
        user_repo: Arc<U>,
        refresh_store: Arc<S>,
        tokens: Arc<TokenService>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            refresh_store,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let email = Email::new(&input.email)?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::UserAlreadyExists);
        }

        let name = DisplayName::new(&input.name)?;
        let raw_password = RawPassword::new(input.password)?;
        let password = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let user = User::new(name, email, password);

        // Stored before the user row: a store failure must leave no account behind
        let tokens = self.tokens.issue_pair(&user.user_id)?;
        self.refresh_store
            .store(
                &user.user_id,
                &tokens.refresh_token,
                self.config.refresh_token_ttl,
            )
            .await?;

        // A concurrent signup with the same email loses here with UserAlreadyExists
        if let Err(e) = self.user_repo.create(&user).await {
            if let Err(revoke_err) = self.refresh_store.revoke(&user.user_id).await {
                tracing::warn!(
                    user_id = %user.user_id,
                    error = %revoke_err,
                    "Failed to drop refresh token of an aborted signup"
                );
            }
            return Err(e);
        }

        tracing::info!(user_id = %user.user_id, email = %user.email, "User signed up");

        Ok(SignUpOutput { user, tokens })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{user_id::UserId, user_role::UserRole};
    use crate::infra::memory::{InMemoryRefreshTokenStore, InMemoryUserRepository};

    fn use_case() -> (
        SignUpUseCase<InMemoryUserRepository, InMemoryRefreshTokenStore>,
        InMemoryUserRepository,
        InMemoryRefreshTokenStore,
    ) {
        let users = InMemoryUserRepository::new();
        let store = InMemoryRefreshTokenStore::new();
        let config = Arc::new(AuthConfig::with_random_secrets());
        let use_case = SignUpUseCase::new(
            Arc::new(users.clone()),
            Arc::new(store.clone()),
            Arc::new(TokenService::new(&config)),
            config,
        );
        (use_case, users, store)
    }

    fn input(email: &str) -> SignUpInput {
        SignUpInput {
            name: " Jane Doe ".to_string(),
            email: email.to_string(),
            password: "secret1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_creates_customer_and_stores_refresh_token() {
        let (use_case, users, store) = use_case();

        let output = use_case.execute(input("Jane@Example.com")).await.unwrap();

        assert_eq!(output.user.name.as_str(), "Jane Doe");
        assert_eq!(output.user.email.as_str(), "jane@example.com");
        assert_eq!(output.user.role, UserRole::Customer);
        assert_eq!(users.len().await, 1);
        assert_eq!(
            store.get(&output.user.user_id).await,
            Some(output.tokens.refresh_token)
        );
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_email() {
        let (use_case, users, _) = use_case();

        use_case.execute(input("jane@example.com")).await.unwrap();
        let err = use_case
            .execute(input("JANE@example.com"))
            .await
            .err()
            .unwrap();

        assert!(matches!(err, AuthError::UserAlreadyExists));
        assert_eq!(users.len().await, 1);
    }

    #[tokio::test]
    async fn test_sign_up_rejects_invalid_input() {
        let (use_case, users, _) = use_case();

        let mut bad_password = input("jane@example.com");
        bad_password.password = "12345".to_string();
        let err = use_case.execute(bad_password).await.err().unwrap();
        assert!(matches!(err, AuthError::Validation(_)));

        let mut bad_name = input("jane@example.com");
        bad_name.name = "   ".to_string();
        let err = use_case.execute(bad_name).await.err().unwrap();
        assert!(matches!(err, AuthError::Validation(ref m) if m == "Name is required"));

        let err = use_case.execute(input("not-an-email")).await.err().unwrap();
        assert!(matches!(err, AuthError::Validation(_)));

        assert_eq!(users.len().await, 0);
    }

    /// Passes the existence check, then loses the insert on the unique index
    struct LosingRaceRepository;

    impl UserRepository for LosingRaceRepository {
        async fn create(&self, _: &User) -> AuthResult<()> {
            Err(AuthError::UserAlreadyExists)
        }

        async fn find_by_id(&self, _: &UserId) -> AuthResult<Option<User>> {
            Ok(None)
        }

        async fn find_by_email(&self, _: &Email) -> AuthResult<Option<User>> {
            Ok(None)
        }

        async fn exists_by_email(&self, _: &Email) -> AuthResult<bool> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn test_sign_up_lost_race_drops_stored_token() {
        let store = InMemoryRefreshTokenStore::new();
        let config = Arc::new(AuthConfig::with_random_secrets());
        let use_case = SignUpUseCase::new(
            Arc::new(LosingRaceRepository),
            Arc::new(store.clone()),
            Arc::new(TokenService::new(&config)),
            config,
        );

        let err = use_case
            .execute(input("jane@example.com"))
            .await
            .err()
            .unwrap();

        assert!(matches!(err, AuthError::UserAlreadyExists));
        assert_eq!(store.len().await, 0);
    }
}

//! Sign Up Use Case
//!
//! Validates a registration payload and creates the customer account.

use crate::application::account::AccountService;
use crate::application::validation::{RegistrationInput, validate_registration};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Sign up use case
pub struct SignUpUseCase<R>
where
    R: UserRepository,
{
    accounts: AccountService<R>,
}

impl<R> SignUpUseCase<R>
where
    R: UserRepository,
{
    pub fn new(accounts: AccountService<R>) -> Self {
        Self { accounts }
    }

    pub async fn execute(&self, input: RegistrationInput) -> AuthResult<User> {
        let registration = validate_registration(input).map_err(|errors| {
            tracing::debug!(fields = %errors, "Registration input rejected");
            AuthError::Validation(errors)
        })?;

        self.accounts.register(registration).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use platform::password::{HashingParams, PasswordHasher};

    use super::*;
    use crate::application::validation::fixtures;
    use crate::infra::memory::InMemoryUserRepository;

    fn use_case() -> (SignUpUseCase<InMemoryUserRepository>, Arc<InMemoryUserRepository>) {
        let repo = Arc::new(InMemoryUserRepository::new());
        let hasher = Arc::new(PasswordHasher::new(HashingParams::default(), None).unwrap());
        let accounts = AccountService::new(Arc::clone(&repo), hasher);
        (SignUpUseCase::new(accounts), repo)
    }

    #[tokio::test]
    async fn test_short_password_not_persisted() {
        let (use_case, repo) = use_case();
        let input = RegistrationInput {
            password: "short".to_string(),
            ..fixtures::valid_input("jan@example.com")
        };

        match use_case.execute(input).await {
            Err(AuthError::Validation(errors)) => assert_eq!(errors.fields(), vec!["password"]),
            other => panic!("expected validation error, got {:?}", other.map(|u| u.user_id)),
        }
        assert_eq!(repo.len().await, 0);
    }

    #[tokio::test]
    async fn test_valid_input_creates_user() {
        let (use_case, repo) = use_case();
        let user = use_case
            .execute(fixtures::valid_input("jan@example.com"))
            .await
            .unwrap();

        assert_eq!(user.email.as_str(), "jan@example.com");
        assert_eq!(repo.len().await, 1);
    }
}

//! Sign In Use Case
//!
//! Checks credentials and issues a session token.

use platform::password::ClearTextPassword;

use crate::application::account::AccountService;
use crate::application::session_token::SessionTokenIssuer;
use crate::domain::entity::session::Session;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    /// Session token for cookie
    pub session_token: String,
    pub session: Session,
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: UserRepository,
{
    accounts: AccountService<R>,
    issuer: SessionTokenIssuer,
}

impl<R> SignInUseCase<R>
where
    R: UserRepository,
{
    pub fn new(accounts: AccountService<R>, issuer: SessionTokenIssuer) -> Self {
        Self { accounts, issuer }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        if input.email.is_empty() || input.password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let password = ClearTextPassword::new(input.password);
        let user = self
            .accounts
            .validate_credentials(&input.email, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let session_token = self.issuer.issue(&user);

        tracing::info!(user_id = %user.user_id, role = %user.user_role, "User signed in");

        Ok(SignInOutput {
            session_token,
            session: Session::from(&user),
        })
    }
}

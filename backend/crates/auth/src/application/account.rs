//! Account Service
//!
//! Registration and credential checks on top of the credential store and
//! the password hasher. Argon2 runs on the blocking pool so request tasks
//! never stall the runtime.

use std::sync::Arc;

use platform::password::{ClearTextPassword, HashedPassword, PasswordHasher};

use crate::application::validation::ValidatedRegistration;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct AccountService<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    hasher: Arc<PasswordHasher>,
}

impl<R> Clone for AccountService<R>
where
    R: UserRepository,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            hasher: Arc::clone(&self.hasher),
        }
    }
}

impl<R> AccountService<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, hasher: Arc<PasswordHasher>) -> Self {
        Self { repo, hasher }
    }

    /// Create a customer account from validated input.
    ///
    /// Fails with `DuplicateEmail` when a non-deleted user already owns the
    /// email, whether that is seen by the lookup or by the store's unique
    /// constraint on insert.
    pub async fn register(&self, registration: ValidatedRegistration) -> AuthResult<User> {
        let ValidatedRegistration {
            email,
            password,
            profile,
        } = registration;

        if self.repo.find_by_email(email.as_str()).await?.is_some() {
            tracing::debug!("Registration rejected: email already in use");
            return Err(AuthError::DuplicateEmail);
        }

        let hasher = Arc::clone(&self.hasher);
        let hashed = run_blocking(move || hasher.hash(&password)).await??;

        let user = self
            .repo
            .insert(NewUser::customer(email, hashed.into(), profile))
            .await?;

        tracing::info!(user_id = %user.user_id, "User registered");

        Ok(user)
    }

    /// Check an email/password pair.
    ///
    /// - unknown email or wrong password: `Ok(None)`
    /// - banned account: `Err(AccountBanned)`, whatever the password
    /// - otherwise the user
    ///
    /// The password is always run through Argon2 (against a dummy digest
    /// when the email is unknown) before any outcome is returned.
    pub async fn validate_credentials(
        &self,
        email: &str,
        password: ClearTextPassword,
    ) -> AuthResult<Option<User>> {
        let Some(mut user) = self.repo.find_by_email(email).await? else {
            let hasher = Arc::clone(&self.hasher);
            run_blocking(move || hasher.verify_dummy(&password)).await?;
            return Ok(None);
        };

        let hasher = Arc::clone(&self.hasher);
        let stored = user.password.as_hashed().clone();
        let (valid, rehashed) = run_blocking(move || verify_and_rehash(&hasher, &password, &stored))
            .await?;

        if user.banned {
            tracing::warn!(user_id = %user.user_id, "Credential check on banned account");
            return Err(AuthError::AccountBanned);
        }

        if !valid {
            return Ok(None);
        }

        if let Some(hashed) = rehashed {
            user.password = hashed.into();
            if let Err(e) = self.repo.update(&user).await {
                tracing::warn!(user_id = %user.user_id, error = %e, "Failed to store upgraded password hash");
            }
        }

        Ok(Some(user))
    }
}

/// Verify, and produce a fresh digest if the stored one uses a weaker work factor
fn verify_and_rehash(
    hasher: &PasswordHasher,
    password: &ClearTextPassword,
    stored: &HashedPassword,
) -> (bool, Option<HashedPassword>) {
    if !hasher.verify(password, stored) {
        return (false, None);
    }
    if !hasher.needs_rehash(stored) {
        return (true, None);
    }
    (true, hasher.hash(password).ok())
}

async fn run_blocking<F, T>(f: F) -> AuthResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AuthError::Internal(format!("Password task failed: {}", e)))
}

//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//!
//! Absence is `Ok(None)`, never an error. Soft-deleted users are invisible
//! to both lookups.

use crate::domain::entity::user::{NewUser, User};
use crate::error::AuthResult;

/// Credential store
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Non-deleted user with exactly this email
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>>;

    /// Non-deleted user with this id. A malformed id is `None`.
    async fn find_by_id(&self, user_id: &str) -> AuthResult<Option<User>>;

    /// Persist a new user and return it with its generated id.
    /// Fails with `DuplicateEmail` if a non-deleted user already has the email.
    async fn insert(&self, user: NewUser) -> AuthResult<User>;

    /// Persist administrative changes (flags, role) to an existing user
    async fn update(&self, user: &User) -> AuthResult<()>;
}

//! User Password Value Object
//!
//! Stored password digest. Hashing and verification live in
//! `platform::password`; this type only carries the digest between the
//! store and the account service.

use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
use platform::password::HashedPassword;
use std::fmt;

/// Hashed user password for database storage
///
/// Argon2id PHC string. Never equal to the plaintext.
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Create from PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string).map_err(|_| {
            AppError::new(
                ErrorKind::InternalServerError,
                "Invalid password hash in database",
            )
        })?;

        Ok(Self(hashed))
    }

    /// Get PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn as_hashed(&self) -> &HashedPassword {
        &self.0
    }
}

impl From<HashedPassword> for UserPassword {
    fn from(hashed: HashedPassword) -> Self {
        Self(hashed)
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
    use platform::password::{ClearTextPassword, HashingParams, PasswordHasher};

    #[test]
    fn test_from_phc_string() {
        let hasher = PasswordHasher::new(HashingParams::default(), None).unwrap();
        let hashed = hasher
            .hash(&ClearTextPassword::new("password123".to_string()))
            .unwrap();

        let stored = UserPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert_eq!(stored.as_phc_string(), hashed.as_phc_string());
        assert_eq!(stored, UserPassword::from(hashed));
    }

    #[test]
    fn test_corrupt_hash_is_server_error() {
        let err = UserPassword::from_phc_string("password123").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InternalServerError);
    }

    #[test]
    fn test_debug_hides_hash() {
        let hasher = PasswordHasher::new(HashingParams::default(), None).unwrap();
        let hashed = hasher
            .hash(&ClearTextPassword::new("password123".to_string()))
            .unwrap();
        let debug = format!("{:?}", UserPassword::from(hashed));
        assert!(!debug.contains("argon2"));
    }
}

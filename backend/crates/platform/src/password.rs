//! Password Hashing and Verification
//!
//! Argon2id in PHC string format:
//! - Fresh random salt per hash, so hashing the same password twice
//!   yields two different digests
//! - Verification through `argon2`'s constant-time comparison
//! - Work factor is configurable but never below [`HashingParams::FLOOR`]
//! - Clear text is NFKC-normalized and zeroized on drop
//!
//! Input policy (length rules and so on) is not enforced here; that is the
//! registration validator's job. This module only turns secrets into digests.

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier as _, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::random_bytes;

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,

    #[error(
        "Hashing parameters below the secure floor (m={memory_kib} KiB, t={iterations}, p={parallelism})"
    )]
    WeakParameters {
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    },
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password
///
/// Not `Clone`, `Debug` is redacted, memory is wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Wrap user input. The text is NFKC-normalized so visually identical
    /// input (full-width digits, composed accents) verifies the same way.
    pub fn new(mut raw: String) -> Self {
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();
        Self(normalized)
    }

    /// Length in Unicode scalar values
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    fn with_pepper(&self, pepper: Option<&[u8]>) -> Vec<u8> {
        let mut bytes = self.as_bytes().to_vec();
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Argon2id digest in PHC format (algorithm, version, params, salt, hash)
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Load a digest read back from storage
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Work factor
// ============================================================================

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingParams {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl HashingParams {
    /// OWASP minimum for Argon2id: m=19456 (19 MiB), t=2, p=1
    pub const FLOOR: Self = Self {
        memory_kib: 19_456,
        iterations: 2,
        parallelism: 1,
    };

    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, PasswordHashError> {
        let params = Self {
            memory_kib,
            iterations,
            parallelism,
        };
        if !params.meets_floor() {
            return Err(PasswordHashError::WeakParameters {
                memory_kib,
                iterations,
                parallelism,
            });
        }
        Ok(params)
    }

    pub fn meets_floor(&self) -> bool {
        self.memory_kib >= Self::FLOOR.memory_kib
            && self.iterations >= Self::FLOOR.iterations
            && self.parallelism >= Self::FLOOR.parallelism
    }
}

impl Default for HashingParams {
    fn default() -> Self {
        Self::FLOOR
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// One-way salted password hashing
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    params: HashingParams,
    pepper: Option<Vec<u8>>,
    /// Digest of random bytes, verified against when no real digest exists
    dummy: HashedPassword,
}

impl PasswordHasher {
    /// Build a hasher. Fails if `params` is below [`HashingParams::FLOOR`].
    ///
    /// ## Arguments
    /// * `params` - Argon2id work factor
    /// * `pepper` - Optional application-wide secret appended before hashing
    pub fn new(params: HashingParams, pepper: Option<Vec<u8>>) -> Result<Self, PasswordHashError> {
        let params = HashingParams::new(params.memory_kib, params.iterations, params.parallelism)?;
        let argon2_params = Params::new(params.memory_kib, params.iterations, params.parallelism, None)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        let mut hasher = Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params),
            params,
            pepper,
            dummy: HashedPassword {
                hash: String::new(),
            },
        };

        let filler = ClearTextPassword(crate::crypto::to_base64url(&random_bytes(24)));
        hasher.dummy = hasher.hash(&filler)?;
        Ok(hasher)
    }

    /// Hash with a freshly generated 128-bit salt
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let mut bytes = password.with_pepper(self.pepper.as_deref());
        let salt = SaltString::generate(OsRng);

        let result = self
            .argon2
            .hash_password(&bytes, &salt)
            .map(|hash| HashedPassword {
                hash: hash.to_string(),
            })
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()));

        bytes.zeroize();
        result
    }

    /// `true` iff `password` reproduces `hashed` with the salt and parameters
    /// embedded in it. The comparison is constant-time.
    pub fn verify(&self, password: &ClearTextPassword, hashed: &HashedPassword) -> bool {
        let parsed = match PasswordHash::new(&hashed.hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        let mut bytes = password.with_pepper(self.pepper.as_deref());
        let valid = self.argon2.verify_password(&bytes, &parsed).is_ok();
        bytes.zeroize();
        valid
    }

    /// Burn the same work as a real verification and return `false`.
    /// Used when there is no stored digest to compare against.
    pub fn verify_dummy(&self, password: &ClearTextPassword) -> bool {
        let _ = self.verify(password, &self.dummy);
        false
    }

    /// `true` when the digest is not Argon2id or uses weaker parameters
    /// than this hasher
    pub fn needs_rehash(&self, hashed: &HashedPassword) -> bool {
        let parsed = match PasswordHash::new(&hashed.hash) {
            Ok(h) => h,
            Err(_) => return true,
        };

        if parsed.algorithm != Algorithm::Argon2id.ident() {
            return true;
        }

        match Params::try_from(&parsed) {
            Ok(stored) => {
                stored.m_cost() < self.params.memory_kib
                    || stored.t_cost() < self.params.iterations
                    || stored.p_cost() < self.params.parallelism
            }
            Err(_) => true,
        }
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("params", &self.params)
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

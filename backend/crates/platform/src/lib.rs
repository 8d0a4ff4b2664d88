//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations used by the domain crates:
//! - Environment configuration validation
//! - Cryptographic utilities (SHA-256, HMAC, base64url)
//! - Password hashing (Argon2id with an enforced work-factor floor)
//! - Cookie building and parsing
//! - Locale resolution from request paths

pub mod config;
pub mod cookie;
pub mod crypto;
pub mod locale;
pub mod password;

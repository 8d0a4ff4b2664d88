//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, extractors, router, route guard
//!
//! ## Features
//! - Customer self-registration with field validation
//! - Email + password sign in with a signed, stateless session cookie
//! - Role-based access (Customer, Admin) for the `cms` admin area
//! - Locale-aware redirects (`/{locale}/...`)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, work factor never below the OWASP floor
//! - Unknown email and wrong password are indistinguishable
//! - Banned accounts are refused only after the password check has run
//! - Session tokens are HMAC-SHA256 signed and expire after 30 days

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{memory::InMemoryUserRepository, postgres::PgUserRepository};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::session::*;
    pub use crate::domain::entity::user::*;
    pub use crate::domain::value_object::{email::*, user_id::*, user_role::*};
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::extract::*;
    pub use crate::presentation::middleware::*;
}

//! Application Layer
//!
//! Use cases and application services.

pub mod account;
pub mod config;
pub mod session_token;
pub mod sign_in;
pub mod sign_up;
pub mod validation;

// Re-exports
pub use account::AccountService;
pub use config::AuthConfig;
pub use session_token::SessionTokenIssuer;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::SignUpUseCase;
pub use validation::{
    FieldError, RegistrationInput, ValidatedRegistration, ValidationErrors, validate_registration,
};

//! Registration Validation
//!
//! Pure checks over the registration payload. Every rule runs, so the
//! caller gets the full list of failing fields in one response.

use std::fmt;

use platform::password::ClearTextPassword;
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::UserProfile;
use crate::domain::value_object::email::Email;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MIN_NAME_LENGTH: usize = 2;
pub const MIN_PHONE_LENGTH: usize = 9;
pub const MIN_ADDRESS_LENGTH: usize = 5;
pub const MIN_CITY_LENGTH: usize = 2;
pub const MIN_COUNTRY_LENGTH: usize = 2;
pub const MIN_POSTAL_LENGTH: usize = 5;

/// Registration payload as received. Missing fields deserialize to `""`,
/// unknown fields (including `role`) are ignored.
#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrationInput {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal: String,
    pub country: String,
}

impl fmt::Debug for RegistrationInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationInput")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("phone", &self.phone)
            .field("address", &self.address)
            .field("city", &self.city)
            .field("postal", &self.postal)
            .field("country", &self.country)
            .finish()
    }
}

/// One failing field, named as on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Failing fields in check order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Failing field names in order
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|e| e.field).collect()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.fields().join(", ");
        write!(f, "invalid fields: {}", fields)
    }
}

/// Input that passed every check
#[derive(Debug)]
pub struct ValidatedRegistration {
    pub email: Email,
    pub password: ClearTextPassword,
    pub profile: UserProfile,
}

/// Run every registration rule, in order:
/// email, password, firstName, lastName, phone, address, city, country, postal.
pub fn validate_registration(
    input: RegistrationInput,
) -> Result<ValidatedRegistration, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let email = match Email::new(input.email) {
        Ok(email) => Some(email),
        Err(_) => {
            errors.push(FieldError::new("email", "Invalid email address"));
            None
        }
    };

    // Length is checked on the normalized form, which is what gets hashed
    let password = ClearTextPassword::new(input.password);
    if password.char_count() < MIN_PASSWORD_LENGTH {
        errors.push(FieldError::new(
            "password",
            format!("Must be at least {} characters", MIN_PASSWORD_LENGTH),
        ));
    }

    let checks: [(&'static str, &str, usize); 7] = [
        ("firstName", &input.first_name, MIN_NAME_LENGTH),
        ("lastName", &input.last_name, MIN_NAME_LENGTH),
        ("phone", &input.phone, MIN_PHONE_LENGTH),
        ("address", &input.address, MIN_ADDRESS_LENGTH),
        ("city", &input.city, MIN_CITY_LENGTH),
        ("country", &input.country, MIN_COUNTRY_LENGTH),
        ("postal", &input.postal, MIN_POSTAL_LENGTH),
    ];

    for (field, value, min) in checks {
        if value.chars().count() < min {
            errors.push(FieldError::new(
                field,
                format!("Must be at least {} characters", min),
            ));
        }
    }

    let Some(email) = email.filter(|_| errors.is_empty()) else {
        return Err(errors);
    };

    Ok(ValidatedRegistration {
        email,
        password,
        profile: UserProfile {
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            address: input.address,
            city: input.city,
            postal: input.postal,
            country: input.country,
        },
    })
}

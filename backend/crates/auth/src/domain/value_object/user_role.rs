use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Account role. Self-registration always yields `Customer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum UserRole {
    #[default]
    #[display("customer")]
    Customer = 0,
    #[display("admin")]
    Admin = 1,
}

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(UserRole::Customer),
            1 => Some(UserRole::Admin),
            _ => None,
        }
    }
}

//! Session
//!
//! Identity carried by a signed token. Rebuilt from the token on every
//! request and never stored.

use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;
use crate::domain::value_object::{user_id::UserId, user_role::UserRole};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub email: String,
    /// `"{first} {last}"` at the time the token was issued
    pub name: String,
    pub role: UserRole,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<&User> for Session {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            email: user.email.as_str().to_string(),
            name: user.display_name(),
            role: user.user_role,
        }
    }
}

/// Public view of a session (`{id, email, name, role}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

impl From<&Session> for SessionUser {
    fn from(session: &Session) -> Self {
        Self {
            id: session.user_id.to_string(),
            email: session.email.clone(),
            name: session.name.clone(),
            role: session.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::user::fixtures;

    #[test]
    fn test_session_from_user() {
        let mut user =
            fixtures::new_user("jan@example.com", "password123").into_user(UserId::new());
        user.set_role(UserRole::Admin);

        let session = Session::from(&user);
        assert_eq!(session.user_id, user.user_id);
        assert_eq!(session.email, "jan@example.com");
        assert_eq!(session.name, "Jan Kowalski");
        assert!(session.is_admin());
    }

    #[test]
    fn test_session_user_json_shape() {
        let session = Session {
            user_id: UserId::new(),
            email: "a@example.com".to_string(),
            name: "Ada Nowak".to_string(),
            role: UserRole::Customer,
        };
        let json = serde_json::to_value(SessionUser::from(&session)).unwrap();
        assert_eq!(json["role"], "customer");
        assert_eq!(json["name"], "Ada Nowak");
        assert_eq!(json["id"], session.user_id.to_string());
    }
}

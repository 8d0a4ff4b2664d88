//! User Entity
//!
//! A registered account: credentials, contact profile, role and the
//! administrative flags. Records are never physically removed; `deleted`
//! hides them from every lookup.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, user_id::UserId, user_password::UserPassword, user_role::UserRole,
};

/// Contact and shipping details collected at registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal: String,
    pub country: String,
}

impl UserProfile {
    /// `"{first} {last}"`
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Persisted user
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub email: Email,
    pub password: UserPassword,
    pub profile: UserProfile,
    pub user_role: UserRole,
    /// Set by an administrator; self-registered accounts start inactive
    pub activated: bool,
    pub deleted: bool,
    pub banned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User record before the store has assigned it an id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub password: UserPassword,
    pub profile: UserProfile,
    pub user_role: UserRole,
    pub activated: bool,
    pub deleted: bool,
    pub banned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewUser {
    /// Self-registered customer: inactive, not banned, not deleted
    pub fn customer(email: Email, password: UserPassword, profile: UserProfile) -> Self {
        let now = Utc::now();
        Self {
            email,
            password,
            profile,
            user_role: UserRole::Customer,
            activated: false,
            deleted: false,
            banned: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach the id generated by the store
    pub fn into_user(self, user_id: UserId) -> User {
        User {
            user_id,
            email: self.email,
            password: self.password,
            profile: self.profile,
            user_role: self.user_role,
            activated: self.activated,
            deleted: self.deleted,
            banned: self.banned,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl User {
    pub fn display_name(&self) -> String {
        self.profile.display_name()
    }

    pub fn is_admin(&self) -> bool {
        self.user_role.is_admin()
    }

    pub fn activate(&mut self) {
        self.activated = true;
        self.touch();
    }

    pub fn ban(&mut self) {
        self.banned = true;
        self.touch();
    }

    pub fn unban(&mut self) {
        self.banned = false;
        self.touch();
    }

    /// Hide the account from every lookup. The record stays in storage.
    pub fn soft_delete(&mut self) {
        self.deleted = true;
        self.touch();
    }

    pub fn set_role(&mut self, role: UserRole) {
        self.user_role = role;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_defaults() {
        let new_user = fixtures::new_user("jan@example.com", "password123");
        assert_eq!(new_user.user_role, UserRole::Customer);
        assert!(!new_user.activated);
        assert!(!new_user.deleted);
        assert!(!new_user.banned);
        assert_eq!(new_user.created_at, new_user.updated_at);
    }

    #[test]
    fn test_display_name() {
        let user = fixtures::new_user("jan@example.com", "password123").into_user(UserId::new());
        assert_eq!(user.display_name(), "Jan Kowalski");
    }

    #[test]
    fn test_administrative_mutations() {
        let mut user =
            fixtures::new_user("jan@example.com", "password123").into_user(UserId::new());
        let created = user.updated_at;

        user.activate();
        user.ban();
        user.set_role(UserRole::Admin);
        assert!(user.activated);
        assert!(user.banned);
        assert!(user.is_admin());
        assert!(user.updated_at >= created);

        user.unban();
        user.soft_delete();
        assert!(!user.banned);
        assert!(user.deleted);
    }
}

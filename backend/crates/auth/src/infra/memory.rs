//! In-Memory Repository Implementation
//!
//! Same contract as the PostgreSQL store, including the "one non-deleted
//! user per email" rule. Used by tests and local wiring without a database.

use tokio::sync::RwLock;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, deleted ones included
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| !u.deleted && u.email.as_str() == email)
            .cloned())
    }

    async fn find_by_id(&self, user_id: &str) -> AuthResult<Option<User>> {
        let Some(user_id) = UserId::parse(user_id) else {
            return Ok(None);
        };

        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| !u.deleted && u.user_id == user_id)
            .cloned())
    }

    async fn insert(&self, user: NewUser) -> AuthResult<User> {
        // Check and push under one write lock
        let mut users = self.users.write().await;

        if !user.deleted
            && users
                .iter()
                .any(|u| !u.deleted && u.email.as_str() == user.email.as_str())
        {
            return Err(AuthError::DuplicateEmail);
        }

        let user = user.into_user(UserId::new());
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;

        if !user.deleted
            && users.iter().any(|u| {
                u.user_id != user.user_id && !u.deleted && u.email.as_str() == user.email.as_str()
            })
        {
            return Err(AuthError::DuplicateEmail);
        }

        if let Some(stored) = users.iter_mut().find(|u| u.user_id == user.user_id) {
            *stored = user.clone();
        }
        Ok(())
    }
}

//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::{NewUser, User, UserProfile};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, user_id::UserId, user_password::UserPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

const USER_COLUMNS: &str = r#"
    user_id,
    email,
    password_hash,
    first_name,
    last_name,
    phone,
    address,
    city,
    postal,
    country,
    user_role,
    activated,
    deleted,
    banned,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND deleted = FALSE"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_id(&self, user_id: &str) -> AuthResult<Option<User>> {
        let Some(user_id) = UserId::parse(user_id) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1 AND deleted = FALSE"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn insert(&self, user: NewUser) -> AuthResult<User> {
        let user_id = UserId::new();

        let result = sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                password_hash,
                first_name,
                last_name,
                phone,
                address,
                city,
                postal,
                country,
                user_role,
                activated,
                deleted,
                banned,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.password.as_phc_string())
        .bind(&user.profile.first_name)
        .bind(&user.profile.last_name)
        .bind(&user.profile.phone)
        .bind(&user.profile.address)
        .bind(&user.profile.city)
        .bind(&user.profile.postal)
        .bind(&user.profile.country)
        .bind(user.user_role.id())
        .bind(user.activated)
        .bind(user.deleted)
        .bind(user.banned)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(user.into_user(user_id)),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                tracing::debug!(constraint = ?e.constraint(), "Insert hit unique email index");
                Err(AuthError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                password_hash = $2,
                user_role = $3,
                activated = $4,
                deleted = $5,
                banned = $6,
                updated_at = $7
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.password.as_phc_string())
        .bind(user.user_role.id())
        .bind(user.activated)
        .bind(user.deleted)
        .bind(user.banned)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            // Un-deleting a user whose email has since been taken
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AuthError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    phone: String,
    address: String,
    city: String,
    postal: String,
    country: String,
    user_role: i16,
    activated: bool,
    deleted: bool,
    banned: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let user_role = UserRole::from_id(self.user_role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid user_role: {}", self.user_role)))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            password: UserPassword::from_phc_string(self.password_hash)
                .map_err(|e| AuthError::Internal(e.to_string()))?,
            profile: UserProfile {
                first_name: self.first_name,
                last_name: self.last_name,
                phone: self.phone,
                address: self.address,
                city: self.city,
                postal: self.postal,
                country: self.country,
            },
            user_role,
            activated: self.activated,
            deleted: self.deleted,
            banned: self.banned,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

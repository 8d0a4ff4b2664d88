//! Session Tokens
//!
//! Stateless signed tokens carried in the session cookie:
//!
//! ```text
//! base64url(json claims) "." base64url(HMAC-SHA256(key, first part))
//! ```
//!
//! Nothing is stored server-side. A token is valid until `exp`; there is no
//! revocation list.

use std::time::Duration;

use chrono::Utc;
use platform::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{session::Session, user::User};
use crate::domain::value_object::{user_id::UserId, user_role::UserRole};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    name: String,
    role: UserRole,
    iat: i64,
    exp: i64,
}

/// Issues and resolves session tokens
#[derive(Clone)]
pub struct SessionTokenIssuer {
    key: [u8; 32],
    ttl: Duration,
}

impl SessionTokenIssuer {
    pub fn new(key: [u8; 32], ttl: Duration) -> Self {
        Self { key, ttl }
    }

    /// Token for `user`, valid from now until now + TTL
    pub fn issue(&self, user: &User) -> String {
        self.issue_at(&Session::from(user), Utc::now().timestamp())
    }

    /// Token for `session` issued at `now` (unix seconds)
    pub fn issue_at(&self, session: &Session, now: i64) -> String {
        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims {
            sub: session.user_id.to_string(),
            email: session.email.clone(),
            name: session.name.clone(),
            role: session.role,
            iat: now,
            exp: now.saturating_add(ttl),
        };

        // Claims hold only strings and integers
        let payload = to_base64url(&serde_json::to_vec(&claims).unwrap_or_default());
        let tag = hmac_sha256(&self.key, payload.as_bytes());

        format!("{}.{}", payload, to_base64url(&tag))
    }

    /// Session carried by a valid, unexpired token
    pub fn resolve(&self, token: &str) -> Option<Session> {
        self.resolve_at(token, Utc::now().timestamp())
    }

    /// Like [`resolve`](Self::resolve), with an explicit clock
    pub fn resolve_at(&self, token: &str, now: i64) -> Option<Session> {
        let (payload, signature) = token.split_once('.')?;
        let tag = from_base64url(signature).ok()?;

        if !verify_hmac_sha256(&self.key, payload.as_bytes(), &tag) {
            tracing::debug!("Session token signature mismatch");
            return None;
        }

        let claims: Claims = serde_json::from_slice(&from_base64url(payload).ok()?).ok()?;

        if now >= claims.exp {
            tracing::debug!("Session token expired");
            return None;
        }

        Some(Session {
            user_id: UserId::parse(&claims.sub)?,
            email: claims.email,
            name: claims.name,
            role: claims.role,
        })
    }
}

impl std::fmt::Debug for SessionTokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenIssuer")
            .field("key", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::SESSION_TTL;

    const NOW: i64 = 1_760_000_000;

    fn issuer() -> SessionTokenIssuer {
        SessionTokenIssuer::new([42u8; 32], SESSION_TTL)
    }

    fn session(role: UserRole) -> Session {
        Session {
            user_id: UserId::new(),
            email: "jan@example.com".to_string(),
            name: "Jan Kowalski".to_string(),
            role,
        }
    }

    #[test]
    fn test_issue_and_resolve() {
        let session = session(UserRole::Admin);
        let token = issuer().issue_at(&session, NOW);

        assert_eq!(token.matches('.').count(), 1);
        assert_eq!(issuer().resolve_at(&token, NOW + 60), Some(session));
    }

    #[test]
    fn test_expires_after_thirty_days() {
        let token = issuer().issue_at(&session(UserRole::Customer), NOW);
        let thirty_days = 30 * 24 * 3600;

        assert!(issuer().resolve_at(&token, NOW + thirty_days - 1).is_some());
        assert!(issuer().resolve_at(&token, NOW + thirty_days).is_none());
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let token = issuer().issue_at(&session(UserRole::Customer), NOW);
        let (_, signature) = token.split_once('.').unwrap();

        // Forge a payload that claims the admin role
        let forged_claims = Claims {
            sub: UserId::new().to_string(),
            email: "jan@example.com".to_string(),
            name: "Jan Kowalski".to_string(),
            role: UserRole::Admin,
            iat: NOW,
            exp: NOW + 3600,
        };
        let forged_payload = to_base64url(&serde_json::to_vec(&forged_claims).unwrap());
        let forged = format!("{}.{}", forged_payload, signature);

        assert!(issuer().resolve_at(&forged, NOW).is_none());
    }

    #[test]
    fn test_other_key_rejected() {
        let token = issuer().issue_at(&session(UserRole::Customer), NOW);
        let other = SessionTokenIssuer::new([7u8; 32], SESSION_TTL);
        assert!(other.resolve_at(&token, NOW).is_none());
    }

    #[test]
    fn test_garbage_rejected() {
        let issuer = issuer();
        for token in ["", ".", "abc", "abc.def", "***.***", "a.b.c"] {
            assert!(issuer.resolve_at(token, NOW).is_none(), "{token}");
        }
    }

    #[test]
    fn test_issue_from_user() {
        use crate::domain::entity::user::fixtures;

        let user = fixtures::new_user("jan@example.com", "password123").into_user(UserId::new());
        let token = issuer().issue(&user);
        let session = issuer().resolve(&token).unwrap();

        assert_eq!(session.user_id, user.user_id);
        assert_eq!(session.name, "Jan Kowalski");
        assert_eq!(session.role, UserRole::Customer);
    }
}

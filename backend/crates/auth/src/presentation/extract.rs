//! Session extractors for route handlers.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use kernel::error::app_error::AppError;
use platform::locale::RequestLocale;

use crate::domain::entity::session::Session;
use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthError;
use crate::presentation::handlers::SessionContext;
use crate::presentation::middleware::ResolvedSession;

/// Current session, if any. Never rejects.
///
/// Reuses the session resolved by the route guard when present, otherwise
/// reads the cookie itself (API routes bypass the guard).
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<Session>);

impl CurrentUser {
    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }

    pub fn has_role(&self, role: UserRole) -> bool {
        self.0.as_ref().is_some_and(|s| s.role == role)
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    SessionContext: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(current_session(parts, state)))
    }
}

/// Signed-in user required.
///
/// Pages redirect to `/{locale}/login`; `/api/` routes get 401.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub Session);

/// Signed-in admin required.
///
/// Anonymous: as [`RequireAuth`]. Non-admin pages redirect to `/{locale}`;
/// `/api/` routes get 403.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Session);

/// Rejection for [`RequireAuth`] and [`RequireAdmin`]
#[derive(Debug, PartialEq, Eq)]
pub enum AuthRejection {
    /// Redirect to a page (for HTML requests)
    Redirect(String),
    /// Unauthorized response (for API requests)
    Unauthorized,
    /// Forbidden response (for API requests)
    Forbidden,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(target) => Redirect::to(&target).into_response(),
            Self::Unauthorized => AuthError::SessionInvalid.into_response(),
            Self::Forbidden => {
                AppError::forbidden("Administrator access required").into_response()
            }
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    SessionContext: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        current_session(parts, state)
            .map(Self)
            .ok_or_else(|| login_rejection(parts, state))
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    SessionContext: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = current_session(parts, state).ok_or_else(|| login_rejection(parts, state))?;

        if !session.is_admin() {
            return Err(if is_api(parts) {
                AuthRejection::Forbidden
            } else {
                AuthRejection::Redirect(format!("/{}", locale(parts, state)))
            });
        }

        Ok(Self(session))
    }
}

fn current_session<S>(parts: &Parts, state: &S) -> Option<Session>
where
    SessionContext: FromRef<S>,
{
    if let Some(ResolvedSession(session)) = parts.extensions.get::<ResolvedSession>() {
        return session.clone();
    }
    SessionContext::from_ref(state).session_from_headers(&parts.headers)
}

fn login_rejection<S>(parts: &Parts, state: &S) -> AuthRejection
where
    SessionContext: FromRef<S>,
{
    if is_api(parts) {
        AuthRejection::Unauthorized
    } else {
        AuthRejection::Redirect(format!("/{}/login", locale(parts, state)))
    }
}

fn locale<S>(parts: &Parts, state: &S) -> String
where
    SessionContext: FromRef<S>,
{
    match parts.extensions.get::<RequestLocale>() {
        Some(locale) => locale.as_str().to_string(),
        None => SessionContext::from_ref(state).locale_for(parts.uri.path()),
    }
}

fn is_api(parts: &Parts) -> bool {
    parts.uri.path().starts_with("/api/")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::routing::get;
    use tower::ServiceExt;

    use super::*;
    use crate::application::config::AuthConfig;
    use crate::domain::value_object::user_id::UserId;

    fn context() -> SessionContext {
        SessionContext::new(Arc::new(AuthConfig::development()))
    }

    fn cookie(context: &SessionContext, role: UserRole) -> String {
        let session = Session {
            user_id: UserId::new(),
            email: "jan@example.com".to_string(),
            name: "Jan Kowalski".to_string(),
            role,
        };
        let token = context
            .issuer
            .issue_at(&session, chrono::Utc::now().timestamp());
        format!("session_token={}", token)
    }

    fn app(context: SessionContext) -> Router {
        Router::new()
            .route(
                "/{locale}/account",
                get(|RequireAuth(s): RequireAuth| async move { s.name }),
            )
            .route(
                "/{locale}/cms/reports",
                get(|RequireAdmin(s): RequireAdmin| async move { s.email }),
            )
            .route(
                "/api/me",
                get(|RequireAuth(s): RequireAuth| async move { s.name }),
            )
            .route(
                "/api/admin/stats",
                get(|RequireAdmin(_): RequireAdmin| async { "ok" }),
            )
            .route(
                "/{locale}/whoami",
                get(|user: CurrentUser| async move {
                    format!(
                        "{}:{}",
                        user.is_authenticated(),
                        user.has_role(UserRole::Admin)
                    )
                }),
            )
            .with_state(context)
    }

    async fn send(app: Router, path: &str, cookie: Option<String>) -> Response {
        let mut builder = Request::builder().uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap()
    }

    #[tokio::test]
    async fn test_require_auth_redirects_to_localized_login() {
        let response = send(app(context()), "/pl/account", None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/pl/login");

        let response = send(app(context()), "/xx/account", None).await;
        assert_eq!(response.headers()[header::LOCATION], "/en/login");
    }

    #[tokio::test]
    async fn test_require_auth_api_is_401() {
        let response = send(app(context()), "/api/me", None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], 401);
        assert_eq!(body["detail"], "Session not found or expired");
    }

    #[tokio::test]
    async fn test_require_auth_passes() {
        let context = context();
        let cookie = cookie(&context, UserRole::Customer);
        let response = send(app(context), "/en/account", Some(cookie)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_require_admin_rejects_customer() {
        let context = context();
        let customer = cookie(&context, UserRole::Customer);

        let page = send(app(context.clone()), "/pl/cms/reports", Some(customer.clone())).await;
        assert_eq!(page.headers()[header::LOCATION], "/pl");

        let api = send(app(context), "/api/admin/stats", Some(customer)).await;
        assert_eq!(api.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_require_admin_passes_admin() {
        let context = context();
        let admin = cookie(&context, UserRole::Admin);
        let response = send(app(context), "/en/cms/reports", Some(admin)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_current_user_never_rejects() {
        let context = context();
        let admin = cookie(&context, UserRole::Admin);

        let anonymous = send(app(context.clone()), "/en/whoami", None).await;
        assert_eq!(anonymous.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(anonymous.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"false:false");

        let signed_in = send(app(context), "/en/whoami", Some(admin)).await;
        let bytes = axum::body::to_bytes(signed_in.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"true:true");
    }
}

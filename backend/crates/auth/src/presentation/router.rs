//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Auth API routes, meant to be nested under `/api`:
///
/// - `POST /register`
/// - `POST /auth/login`
/// - `POST /auth/logout`
/// - `GET  /auth/session`
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/auth/login", post(handlers::sign_in::<R>))
        .route("/auth/logout", post(handlers::sign_out))
        .route("/auth/session", get(handlers::session_status))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use platform::password::{HashingParams, PasswordHasher};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::application::config::AuthConfig;
    use crate::domain::value_object::user_role::UserRole;
    use crate::infra::memory::InMemoryUserRepository;

    struct TestApp {
        router: Router,
        repo: Arc<InMemoryUserRepository>,
    }

    fn test_app() -> TestApp {
        let repo = Arc::new(InMemoryUserRepository::new());
        let hasher = Arc::new(PasswordHasher::new(HashingParams::default(), None).unwrap());
        let config = Arc::new(AuthConfig::from_secret("test-secret-test-secret-test-secret"));
        let state = AuthAppState::new(Arc::clone(&repo), hasher, config);

        TestApp {
            router: Router::new().nest("/api", auth_router(state)),
            repo,
        }
    }

    fn registration(email: &str) -> Value {
        json!({
            "email": email,
            "password": "password123",
            "firstName": "Jan",
            "lastName": "Kowalski",
            "phone": "123456789",
            "address": "ul. Długa 1",
            "city": "Kraków",
            "postal": "30-001",
            "country": "PL"
        })
    }

    async fn post_json(router: &Router, uri: &str, body: &Value) -> Response {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        router.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn set_cookie(response: &Response) -> String {
        response.headers()[header::SET_COOKIE]
            .to_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_register_created() {
        let app = test_app();
        let response = post_json(&app.router, "/api/register", &registration("jan@example.com")).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Registration successful");
        assert_eq!(body["user"]["email"], "jan@example.com");
        assert_eq!(body["user"]["firstName"], "Jan");
        assert_eq!(body["user"]["lastName"], "Kowalski");
        assert_eq!(body["user"]["role"], "customer");
        assert!(body["user"]["id"].as_str().is_some());
        assert!(body["user"].get("password").is_none());
        assert!(body["user"].get("hash").is_none());
    }

    #[tokio::test]
    async fn test_register_ignores_role() {
        let app = test_app();
        let mut payload = registration("eve@example.com");
        payload["role"] = json!("admin");

        let response = post_json(&app.router, "/api/register", &payload).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(json_body(response).await["user"]["role"], "customer");
    }

    #[tokio::test]
    async fn test_register_validation_errors() {
        let app = test_app();
        let mut payload = registration("not-an-email");
        payload["password"] = json!("short");

        let response = post_json(&app.router, "/api/register", &payload).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["errors"][0]["field"], "email");
        assert_eq!(body["errors"][1]["field"], "password");
        assert_eq!(app.repo.len().await, 0);
    }

    #[tokio::test]
    async fn test_register_malformed_json() {
        let app = test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"email\":"))
            .unwrap();

        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(app.repo.len().await, 0);
    }

    #[tokio::test]
    async fn test_register_duplicate_conflict() {
        let app = test_app();
        let payload = registration("jan@example.com");

        let first = post_json(&app.router, "/api/register", &payload).await;
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = post_json(&app.router, "/api/register", &payload).await;
        assert_eq!(second.status(), StatusCode::CONFLICT);
        assert_eq!(app.repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_login_sets_cookie_and_session_resolves() {
        let app = test_app();
        post_json(&app.router, "/api/register", &registration("jan@example.com")).await;

        let response = post_json(
            &app.router,
            "/api/auth/login",
            &json!({"email": "jan@example.com", "password": "password123"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let cookie = set_cookie(&response);
        assert!(cookie.starts_with("session_token="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=2592000"));

        let body = json_body(response).await;
        assert_eq!(body["user"]["name"], "Jan Kowalski");
        assert_eq!(body["user"]["role"], "customer");

        let token_pair = cookie.split(';').next().unwrap().to_string();
        let request = Request::builder()
            .uri("/api/auth/session")
            .header(header::COOKIE, token_pair)
            .body(Body::empty())
            .unwrap();
        let status = json_body(app.router.clone().oneshot(request).await.unwrap()).await;

        assert_eq!(status["authenticated"], true);
        assert_eq!(status["user"]["email"], "jan@example.com");
    }

    #[tokio::test]
    async fn test_login_wrong_password_unauthorized() {
        let app = test_app();
        post_json(&app.router, "/api/register", &registration("jan@example.com")).await;

        let response = post_json(
            &app.router,
            "/api/auth/login",
            &json!({"email": "jan@example.com", "password": "wrongpassword"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_login_banned_forbidden() {
        use crate::domain::repository::UserRepository;

        let app = test_app();
        post_json(&app.router, "/api/register", &registration("jan@example.com")).await;
        let mut user = app
            .repo
            .find_by_email("jan@example.com")
            .await
            .unwrap()
            .unwrap();
        user.ban();
        app.repo.update(&user).await.unwrap();

        let response = post_json(
            &app.router,
            "/api/auth/login",
            &json!({"email": "jan@example.com", "password": "password123"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_role_in_session() {
        use crate::domain::repository::UserRepository;

        let app = test_app();
        post_json(&app.router, "/api/register", &registration("admin@example.com")).await;
        let mut user = app
            .repo
            .find_by_email("admin@example.com")
            .await
            .unwrap()
            .unwrap();
        user.set_role(UserRole::Admin);
        app.repo.update(&user).await.unwrap();

        let response = post_json(
            &app.router,
            "/api/auth/login",
            &json!({"email": "admin@example.com", "password": "password123"}),
        )
        .await;
        assert_eq!(json_body(response).await["user"]["role"], "admin");
    }

    #[tokio::test]
    async fn test_logout_expires_cookie() {
        let app = test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/logout")
            .body(Body::empty())
            .unwrap();

        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let cookie = set_cookie(&response);
        assert!(cookie.starts_with("session_token=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_session_anonymous() {
        let app = test_app();
        let request = Request::builder()
            .uri("/api/auth/session")
            .body(Body::empty())
            .unwrap();

        let body = json_body(app.router.clone().oneshot(request).await.unwrap()).await;
        assert_eq!(body["authenticated"], false);
        assert!(body["user"].is_null());
    }
}

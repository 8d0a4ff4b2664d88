//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRef, OriginalUri, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::cookie::{extract_cookie, header_value};
use platform::password::PasswordHasher;

use crate::application::config::AuthConfig;
use crate::application::{
    AccountService, RegistrationInput, SessionTokenIssuer, SignInInput, SignInUseCase,
    SignUpUseCase,
};
use crate::domain::entity::session::{Session, SessionUser};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    RegisterResponse, RegisteredUser, SessionStatusResponse, SignInRequest, SignInResponse,
};
use crate::presentation::extract::CurrentUser;

/// Everything needed to read and write the session cookie
#[derive(Clone)]
pub struct SessionContext {
    pub issuer: SessionTokenIssuer,
    pub config: Arc<AuthConfig>,
}

impl SessionContext {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self {
            issuer: SessionTokenIssuer::new(config.session_secret, config.session_ttl),
            config,
        }
    }

    /// Session carried by the request's cookie, if valid
    pub fn session_from_headers(&self, headers: &HeaderMap) -> Option<Session> {
        let token = extract_cookie(headers, &self.config.session_cookie_name)?;
        self.issuer.resolve(&token)
    }

    /// Resolved locale for a request path
    pub fn locale_for(&self, path: &str) -> String {
        self.config.locales.from_path(path).to_string()
    }
}

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub accounts: AccountService<R>,
    pub session: SessionContext,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, hasher: Arc<PasswordHasher>, config: Arc<AuthConfig>) -> Self {
        Self {
            accounts: AccountService::new(repo, hasher),
            session: SessionContext::new(config),
        }
    }
}

impl<R> Clone for AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            accounts: self.accounts.clone(),
            session: self.session.clone(),
        }
    }
}

impl<R> FromRef<AuthAppState<R>> for SessionContext
where
    R: UserRepository + Send + Sync + 'static,
{
    fn from_ref(state: &AuthAppState<R>) -> Self {
        state.session.clone()
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/register (also mounted as /{locale}/api/register)
///
/// The success message follows the locale of the request path.
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<RegistrationInput>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
{
    let Json(input) = payload.map_err(|e| AuthError::MalformedBody(e.body_text()))?;

    let use_case = SignUpUseCase::new(state.accounts.clone());
    let user = use_case.execute(input).await?;

    let locale = state.session.locale_for(uri.path());

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: registration_message(&locale).to_string(),
            user: RegisteredUser::from(&user),
        }),
    ))
}

fn registration_message(locale: &str) -> &'static str {
    match locale {
        "pl" => "Rejestracja zakończona pomyślnie",
        _ => "Registration successful",
    }
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/auth/login
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|e| AuthError::MalformedBody(e.body_text()))?;

    let use_case = SignInUseCase::new(state.accounts.clone(), state.session.issuer.clone());
    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let cookie = state
        .session
        .config
        .session_cookie()
        .build_set_cookie(&output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, header_value(&cookie))],
        Json(SignInResponse {
            user: SessionUser::from(&output.session),
        }),
    ))
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /api/auth/logout
///
/// Tokens are stateless, so signing out only drops the cookie.
pub async fn sign_out(State(session): State<SessionContext>) -> impl IntoResponse {
    let cookie = session.config.session_cookie().build_delete_cookie();

    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, header_value(&cookie))],
    )
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/session
pub async fn session_status(CurrentUser(session): CurrentUser) -> Json<SessionStatusResponse> {
    Json(SessionStatusResponse {
        authenticated: session.is_some(),
        user: session.as_ref().map(SessionUser::from),
    })
}

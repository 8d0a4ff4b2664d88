//! HTTP application assembly.

use axum::{
    Router,
    http::{HeaderValue, Method, Uri, header},
    middleware::from_fn_with_state,
};
use auth::domain::repository::UserRepository;
use auth::middleware::route_guard;
use auth::presentation::AuthAppState;
use auth::auth_router;
use kernel::error::app_error::AppError;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

/// Full router: auth API under `/api` and under `/{locale}/api`, the route
/// guard in front of everything else, then tracing and CORS.
///
/// The locale-prefixed mount serves localized responses (the registration
/// message); plain `/api` answers in the default locale.
pub fn build_app<R>(state: AuthAppState<R>, frontend_origins: &[String]) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    let session = state.session.clone();

    Router::new()
        .nest("/api", auth_router(state.clone()))
        .nest("/{locale}/api", auth_router(state))
        .fallback(not_found)
        .layer(from_fn_with_state(session, route_guard))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(frontend_origins))
}

fn cors_layer(frontend_origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = frontend_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::not_found(format!("No route for {}", uri.path()))
}

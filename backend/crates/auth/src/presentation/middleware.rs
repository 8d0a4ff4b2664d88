//! Route Guard
//!
//! Runs before page handlers:
//! 1. resolves the locale from the first path segment (never blocks)
//! 2. keeps anonymous users and non-admins out of the `cms` admin area
//! 3. attaches [`RequestLocale`] and [`ResolvedSession`] for downstream handlers
//!
//! API routes and static assets bypass the guard entirely.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use platform::locale::RequestLocale;

use crate::domain::entity::session::Session;
use crate::presentation::handlers::SessionContext;

const ADMIN_SEGMENT: &str = "cms";
const ADMIN_LOGIN_SEGMENT: &str = "login";

/// Session resolved by the guard, `None` for anonymous requests
#[derive(Debug, Clone)]
pub struct ResolvedSession(pub Option<Session>);

/// Where a path sits relative to the admin area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminArea {
    Outside,
    /// `cms/login` and below, always public
    Login,
    Protected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Pass,
    Redirect(String),
}

/// Paths the guard never touches: `/api/...` and anything outside the
/// protected admin area whose last segment looks like a file
/// (`/favicon.ico`, `/_next/app.js`). Protected admin paths are never
/// excluded, dotted or not.
pub fn is_excluded(path: &str) -> bool {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    if segments.clone().next() == Some("api") {
        return true;
    }
    if admin_area(path) == AdminArea::Protected {
        return false;
    }
    segments.next_back().is_some_and(|last| last.contains('.'))
}

/// `cms` as the first segment, or as the second one after a locale segment
pub fn admin_area(path: &str) -> AdminArea {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let admin_index = match segments.as_slice() {
        [first, ..] if *first == ADMIN_SEGMENT => 0,
        [_, second, ..] if *second == ADMIN_SEGMENT => 1,
        _ => return AdminArea::Outside,
    };

    if segments.get(admin_index + 1) == Some(&ADMIN_LOGIN_SEGMENT) {
        AdminArea::Login
    } else {
        AdminArea::Protected
    }
}

/// Redirect target, if any, for a request to `path`
pub fn decide(path: &str, locale: &str, session: Option<&Session>) -> GuardDecision {
    if admin_area(path) != AdminArea::Protected {
        return GuardDecision::Pass;
    }

    match session {
        None => GuardDecision::Redirect(format!("/{}/{}/{}", locale, ADMIN_SEGMENT, ADMIN_LOGIN_SEGMENT)),
        Some(session) if !session.is_admin() => GuardDecision::Redirect(format!("/{}", locale)),
        Some(_) => GuardDecision::Pass,
    }
}

/// Route guard middleware. Install with
/// `axum::middleware::from_fn_with_state(session_context, route_guard)`.
pub async fn route_guard(
    State(context): State<SessionContext>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();

    if is_excluded(&path) {
        return next.run(req).await;
    }

    let locale = context.locale_for(&path);
    let session = context.session_from_headers(req.headers());

    if let GuardDecision::Redirect(target) = decide(&path, &locale, session.as_ref()) {
        tracing::debug!(
            path = %path,
            target = %target,
            authenticated = session.is_some(),
            "Admin area redirect"
        );
        return Redirect::temporary(&target).into_response();
    }

    req.extensions_mut().insert(RequestLocale(locale));
    req.extensions_mut().insert(ResolvedSession(session));

    next.run(req).await
}

//! Presentation Layer
//!
//! HTTP handlers, DTOs, extractors, router, and the route guard.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use extract::{AuthRejection, CurrentUser, RequireAdmin, RequireAuth};
pub use handlers::{AuthAppState, SessionContext};
pub use middleware::{ResolvedSession, route_guard};
pub use router::auth_router;

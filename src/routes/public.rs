use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Defines endpoints that are **unauthenticated** and accessible to any client
/// (anonymous or logged-in): the landing view, the session gateway, and a
/// health probe.
///
/// Security Mandate:
/// Nothing in this module may leak guarded data. The session endpoints mutate
/// or report only the caller's own session; all record access lives behind the
/// guarded portal router.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // A simple, unauthenticated endpoint used for monitoring and load
        // balancer checks. Returns "ok" immediately.
        .route("/health", get(|| async { "ok" }))
        // GET /
        // The landing view: role choices and their login/dashboard paths.
        .route("/", get(handlers::landing))
        // POST /login/{role}
        // Runs one authentication attempt for the role-scoped login view.
        // The {role} segment must resolve to admin/teacher/student.
        .route("/login/{role}", post(handlers::login))
        // POST /logout
        // Clears the session. Idempotent; also wins over any pending login.
        .route("/logout", post(handlers::logout))
        // GET /session
        // Reports loading / anonymous / active, so clients never mistake a
        // store that has not finished its startup load for a logged-out one.
        .route("/session", get(handlers::get_session))
}

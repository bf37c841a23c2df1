use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Portal Router Module
///
/// Defines the role-scoped module views under `/{role}/…`. Every route here
/// must sit behind the Route Guard middleware (layered on in `create_router`):
/// the guard resolves the `{role}` segment, consults the Session Store, and
/// either allows the request, renders the loading placeholder, or redirects
/// (to the role-scoped login, or to the caller's own dashboard when the role
/// scope does not match).
///
/// Access Control Strategy:
/// The guard guarantees that any request reaching a handler carries a session
/// whose role equals the path's role scope. Handlers still apply per-role data
/// filtering (students see only their own records) and the roster endpoints
/// add explicit RBAC checks on top.
pub fn portal_routes() -> Router<AppState> {
    Router::new()
        // GET /{role}/dashboard
        // The role-dispatched dashboard (admin stats / teacher summary /
        // student summary). Dispatch is on the session role, defaulting to
        // the least-privileged view.
        .route("/{role}/dashboard", get(handlers::dashboard))
        // GET /{role}/attendance
        // Attendance records: own rows for students, roster for staff.
        .route("/{role}/attendance", get(handlers::get_attendance))
        // GET /{role}/schedule
        // The weekly timetable.
        .route("/{role}/schedule", get(handlers::get_schedule))
        // GET /{role}/result
        // Result sheets: own sheet for students, all sheets for staff.
        .route("/{role}/result", get(handlers::get_results))
        // GET /{role}/fees
        // Fee lines: own lines for students, full ledger for staff.
        .route("/{role}/fees", get(handlers::get_fees))
        // GET /{role}/course
        // The course catalogue.
        .route("/{role}/course", get(handlers::get_courses))
        // GET /{role}/notices
        // Published announcements.
        .route("/{role}/notices", get(handlers::get_notices))
        // GET/PUT /{role}/settings
        // The profile slice of the session; updates are echoed, not persisted.
        .route(
            "/{role}/settings",
            get(handlers::get_settings).put(handlers::update_settings),
        )
        // --- Oversight rosters (supplementary, RBAC-checked in handlers) ---
        // GET /{role}/students
        .route("/{role}/students", get(handlers::get_students))
        // GET /{role}/teachers
        .route("/{role}/teachers", get(handlers::get_teachers))
}

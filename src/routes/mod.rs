/// Router Module Index
///
/// Organizes the application's routing logic into security-segregated modules.
/// Access control is applied explicitly at the module level (via Axum layers),
/// so no guarded endpoint can be exposed by accident.
///
/// The split mirrors the navigation model: an open surface (landing, login,
/// session introspection) and a role-scoped portal surface behind the Route
/// Guard.

/// Routes accessible to all clients (landing, health, login, logout, session).
pub mod public;

/// Role-scoped portal routes under `/{role}/…`, protected by the Route Guard
/// middleware layered on in `create_router`.
pub mod portal;

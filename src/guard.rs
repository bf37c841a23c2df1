use crate::models::Role;
use crate::session::SessionState;

/// Module
///
/// The portal's view modules: one per routable page under `/{role}/…`. This is
/// the single authoritative mapping from subpaths to views, replacing the
/// scattered per-page route wiring of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Module {
    Dashboard,
    Attendance,
    Schedule,
    Results,
    Fees,
    Courses,
    Notices,
    Settings,
}

impl Module {
    pub const ALL: [Module; 8] = [
        Module::Dashboard,
        Module::Attendance,
        Module::Schedule,
        Module::Results,
        Module::Fees,
        Module::Courses,
        Module::Notices,
        Module::Settings,
    ];

    /// The path segment each module answers under. `Results` and `Courses`
    /// keep the source's singular segments.
    pub fn subpath(&self) -> &'static str {
        match self {
            Module::Dashboard => "dashboard",
            Module::Attendance => "attendance",
            Module::Schedule => "schedule",
            Module::Results => "result",
            Module::Fees => "fees",
            Module::Courses => "course",
            Module::Notices => "notices",
            Module::Settings => "settings",
        }
    }

    pub fn from_subpath(segment: &str) -> Option<Module> {
        Module::ALL.iter().copied().find(|m| m.subpath() == segment)
    }
}

/// RouteDescriptor
///
/// A protected route: the module it serves and the non-empty set of roles
/// allowed to view it. Descriptors are built at dispatch time from the static
/// role/module tables; they are never user-supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDescriptor {
    pub module: Module,
    pub allowed: Vec<Role>,
}

impl RouteDescriptor {
    /// role_scoped
    ///
    /// The portal's standard descriptor: a route under `/{role}/…` admits
    /// exactly the role named in its path. Every role can reach every module
    /// under its own prefix; crossing prefixes is what the guard redirects.
    pub fn role_scoped(role: Role, module: Module) -> Self {
        Self {
            module,
            allowed: vec![role],
        }
    }
}

/// GuardDecision
///
/// The Route Guard's decision for one navigation.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardDecision {
    /// Session state is not known yet; render a neutral placeholder and do
    /// not redirect (prevents a redirect flash while the store loads).
    Loading,
    Allow,
    /// Unauthenticated request for a protected route; send to the
    /// role-scoped login view.
    RedirectToLogin,
    /// Authenticated, but the route's allowed set excludes the session role.
    /// The target is always the session role's own dashboard, never the
    /// requested path.
    RedirectToOwnDashboard(Role),
}

/// authorize
///
/// The guard's pure decision function over (session state, route). The guard
/// only reads the session; all mutation stays inside the Session Store.
pub fn authorize(state: &SessionState, route: &RouteDescriptor) -> GuardDecision {
    match state {
        SessionState::Unknown => GuardDecision::Loading,
        SessionState::Unauthenticated => GuardDecision::RedirectToLogin,
        SessionState::Authenticated(session) => {
            if route.allowed.contains(&session.role) {
                GuardDecision::Allow
            } else {
                GuardDecision::RedirectToOwnDashboard(session.role)
            }
        }
    }
}

/// The default landing path for a role after login or a cross-role redirect.
pub fn dashboard_path(role: Role) -> String {
    format!("/{}/dashboard", role.as_str())
}

/// The role-scoped login view a guarded redirect targets.
pub fn login_path(role: Role) -> String {
    format!("/login/{}", role.as_str())
}

/// module_path
///
/// Forward mapping of the View Router: (role, module) to the concrete path.
pub fn module_path(role: Role, module: Module) -> String {
    format!("/{}/{}", role.as_str(), module.subpath())
}

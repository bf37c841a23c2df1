use axum::{
    Json,
    Router,
    extract::{FromRef, Path, Request, State},
    http::{HeaderName, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod data;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod session;
pub mod vault;

// Module for routing segregation (Public, Guarded Portal).
pub mod routes;
use routes::{portal, public};

// --- Public Re-exports ---

// Makes core state types easily accessible to the main application entry point (main.rs).
pub use config::AppConfig;
pub use repository::{DirectoryState, SeedDirectory};
pub use session::{SessionStore, SessionStoreState};
pub use vault::{FileSessionVault, VaultState};

/// ApiDoc
///
/// This struct auto-generates the OpenAPI documentation (Swagger JSON) for the
/// application. It aggregates all API paths and data schemas decorated with the
/// `#[utoipa::path]` and `#[derive(utoipa::ToSchema)]` macros.
/// The resulting JSON is served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    // List all public handler functions here for documentation generation.
    paths(
        handlers::landing, handlers::login, handlers::logout, handlers::get_session,
        handlers::dashboard, handlers::get_attendance, handlers::get_schedule,
        handlers::get_results, handlers::get_fees, handlers::get_courses,
        handlers::get_notices, handlers::get_settings, handlers::update_settings,
        handlers::get_students, handlers::get_teachers
    ),
    // List all models (schemas) used in the request/response bodies.
    components(
        schemas(
            models::Role, models::Session, models::SessionEnvelope,
            models::LoginRequest, models::UpdateSettingsRequest,
            models::SettingsProfile, models::DashboardView,
            models::AdminDashboardStats, models::TeacherDashboard,
            models::StudentDashboard, models::AttendanceRecord,
            models::AttendanceStatus, models::ScheduleSlot, models::ResultSheet,
            models::SubjectResult, models::PerformancePoint, models::FeeRecord,
            models::FeeKind, models::FeeStatus, models::Course,
            models::CourseStatus, models::Notice, models::NoticeCategory,
            models::NoticePriority, models::StudentRecord, models::TeacherRecord,
        )
    ),
    tags(
        (name = "eduerp-portal", description = "EduERP role-based portal API")
    )
)]
struct ApiDoc;

/// AppState
///
/// Implements the **Unified State Pattern**. This is the single, thread-safe,
/// and immutable container holding all essential application services and
/// configuration, shared across all incoming requests.
#[derive(Clone)]
pub struct AppState {
    /// Session layer: the single source of truth for "who is logged in".
    pub sessions: SessionStoreState,
    /// Directory layer: identity lookup plus the mock record provider.
    pub directory: DirectoryState,
    /// Configuration: the loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// These implementations allow handlers and middleware to selectively pull
// components from the shared AppState.

impl FromRef<AppState> for SessionStoreState {
    fn from_ref(app_state: &AppState) -> SessionStoreState {
        app_state.sessions.clone()
    }
}

impl FromRef<AppState> for DirectoryState {
    fn from_ref(app_state: &AppState) -> DirectoryState {
        app_state.directory.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// guard_middleware
///
/// The Route Guard, enforced on every `/{role}/…` portal route.
///
/// *Mechanism*: resolves the `{role}` path segment (a segment outside the
/// closed role set blocks navigation immediately with the InvalidRole error),
/// derives the route descriptor for the addressed module, and evaluates the
/// guard's decision function against the Session Store:
/// - `Loading`: the store has not finished its startup load; a neutral
///   placeholder is returned instead of a redirect so clients never see a
///   redirect flash during the load.
/// - `Allow`: the request proceeds to the handler.
/// - `RedirectToLogin`: unauthenticated request for a protected route.
/// - `RedirectToOwnDashboard`: authenticated, but the route's role scope does
///   not include the session role. The target is always the session role's
///   own dashboard, never the requested path.
async fn guard_middleware(
    State(state): State<AppState>,
    Path(params): Path<Vec<(String, String)>>,
    request: Request,
    next: Next,
) -> Response {
    // The portal router binds {role} as its first path parameter.
    let scope = match params
        .iter()
        .find(|(name, _)| name == "role")
        .map(|(_, value)| models::Role::resolve(value))
    {
        Some(Ok(role)) => role,
        Some(Err(e)) => return e.into_response(),
        None => return StatusCode::NOT_FOUND.into_response(),
    };

    // Map the trailing segment back to its module; the dashboard is the
    // default for any scoped path the table does not name.
    let module = request
        .uri()
        .path()
        .rsplit('/')
        .next()
        .and_then(guard::Module::from_subpath)
        .unwrap_or(guard::Module::Dashboard);

    let descriptor = guard::RouteDescriptor::role_scoped(scope, module);

    match guard::authorize(&state.sessions.current(), &descriptor) {
        guard::GuardDecision::Allow => next.run(request).await,
        guard::GuardDecision::Loading => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "loading" })),
        )
            .into_response(),
        guard::GuardDecision::RedirectToLogin => {
            Redirect::temporary(&guard::login_path(scope)).into_response()
        }
        guard::GuardDecision::RedirectToOwnDashboard(role) => {
            Redirect::temporary(&guard::dashboard_path(role)).into_response()
        }
    }
}

/// create_router
///
/// Assembles the application's entire routing structure, applies global and
/// scoped middleware, and registers the application state.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        // Documentation: Serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public Routes: No middleware applied.
        .merge(public::public_routes())
        // Portal Routes: protected by the Route Guard. Every `/{role}/…`
        // navigation is re-evaluated here against the current session.
        .merge(
            portal::portal_routes()
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    guard_middleware,
                )),
        )
        // Apply the Unified State to all routes.
        .with_state(state);

    // 3. Observability and Correlation Layers (Applied outermost/first)
    base_router
        .layer(
            ServiceBuilder::new()
                // 3a. Request ID Generation: a unique UUID per incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 3b. Request Tracing: wraps the request/response lifecycle in a
                // tracing span carrying the generated request ID.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 3c. Request ID Propagation: returns x-request-id to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS Layer (Applied last)
        .layer(cors)
}

/// trace_span_logger
///
/// Helper function used by `TraceLayer` to customize tracing span creation.
/// It extracts the `x-request-id` header (if present) and includes it in the
/// structured logging metadata alongside the HTTP method and URI, so every log
/// line for a single request is correlated by a unique ID.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}

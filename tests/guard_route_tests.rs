use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use eduerp_portal::{
    AppState,
    auth::MockAuthenticator,
    config::AppConfig,
    data,
    error::PortalError,
    guard::{GuardDecision, Module, RouteDescriptor, authorize, dashboard_path, login_path},
    models::{Role, Session},
    repository::{DirectoryState, SeedDirectory},
    session::{SessionState, SessionStore},
    vault::MemorySessionVault,
};
use std::sync::Arc;
use tower::ServiceExt;

// --- Helpers ---

fn sample_session(role: Role) -> Session {
    Session {
        subject_id: data::STUDENT_MIKE_ID,
        display_name: "Mike Johnson".to_string(),
        role,
        contact_email: "student@eduerp.com".to_string(),
        avatar_ref: None,
        joined_at: chrono::Utc::now(),
    }
}

/// Builds the full application router over in-memory state. When
/// `initialized` is false the Session Store stays in its pre-load Unknown
/// state so the Loading path can be exercised.
async fn test_app(initialized: bool) -> Router {
    let directory: DirectoryState = Arc::new(SeedDirectory::new());
    let authenticator = Arc::new(MockAuthenticator::new(
        directory.clone(),
        std::time::Duration::ZERO,
    ));
    let sessions = Arc::new(SessionStore::new(
        Arc::new(MemorySessionVault::new()),
        authenticator,
    ));
    if initialized {
        sessions.initialize().await;
    }

    eduerp_portal::create_router(AppState {
        sessions,
        directory,
        config: AppConfig::default(),
    })
}

fn get(path: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .body(Body::empty())
        .expect("request builds")
}

fn post_login(role: &str, email: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/login/{role}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(format!(
            r#"{{"email":"{email}","password":"whatever"}}"#
        )))
        .expect("request builds")
}

// --- Role Resolver properties ---

#[test]
fn resolve_accepts_exactly_the_three_roles() {
    assert_eq!(Role::resolve("admin").unwrap(), Role::Admin);
    assert_eq!(Role::resolve("teacher").unwrap(), Role::Teacher);
    assert_eq!(Role::resolve("student").unwrap(), Role::Student);
}

#[test]
fn resolve_rejects_everything_else() {
    // Case-sensitive, no trimming, no coercion.
    for candidate in ["Admin", "ADMIN", " student", "root", "", "teacher ", "superuser"] {
        let err = Role::resolve(candidate).expect_err("must be rejected");
        assert!(matches!(err, PortalError::InvalidRole(_)), "{candidate:?}");
    }
}

#[test]
fn effective_role_defaults_to_least_privilege() {
    // Absent role never falls back to admin.
    assert_eq!(Role::effective(None), Role::Student);
    assert_eq!(Role::effective(Some(Role::Admin)), Role::Admin);
}

// --- authorize decision matrix ---

#[test]
fn unknown_state_yields_loading_for_every_route() {
    for module in Module::ALL {
        for role in Role::ALL {
            let route = RouteDescriptor::role_scoped(role, module);
            assert_eq!(
                authorize(&SessionState::Unknown, &route),
                GuardDecision::Loading
            );
        }
    }
}

#[test]
fn unauthenticated_state_redirects_every_protected_route_to_login() {
    for module in Module::ALL {
        for role in Role::ALL {
            let route = RouteDescriptor::role_scoped(role, module);
            assert_eq!(
                authorize(&SessionState::Unauthenticated, &route),
                GuardDecision::RedirectToLogin
            );
        }
    }
}

#[test]
fn matching_role_is_allowed() {
    let state = SessionState::Authenticated(sample_session(Role::Teacher));
    let route = RouteDescriptor::role_scoped(Role::Teacher, Module::Fees);
    assert_eq!(authorize(&state, &route), GuardDecision::Allow);
}

#[test]
fn mismatched_role_redirects_to_own_dashboard_regardless_of_path() {
    let state = SessionState::Authenticated(sample_session(Role::Student));
    for module in Module::ALL {
        for scope in [Role::Admin, Role::Teacher] {
            let route = RouteDescriptor::role_scoped(scope, module);
            // The target is derived from the session role, never the request.
            assert_eq!(
                authorize(&state, &route),
                GuardDecision::RedirectToOwnDashboard(Role::Student)
            );
        }
    }
}

#[test]
fn redirect_paths_are_role_scoped() {
    assert_eq!(dashboard_path(Role::Admin), "/admin/dashboard");
    assert_eq!(login_path(Role::Teacher), "/login/teacher");
}

// --- Guard over the real router ---

#[tokio::test]
async fn unauthenticated_portal_request_redirects_to_role_login() {
    let app = test_app(true).await;

    let response = app.oneshot(get("/admin/dashboard")).await.expect("response");
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/login/admin"
    );
}

#[tokio::test]
async fn unresolvable_role_segment_is_rejected() {
    let app = test_app(true).await;

    let response = app.oneshot(get("/wizard/dashboard")).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn uninitialized_store_renders_loading_placeholder_not_a_redirect() {
    let app = test_app(false).await;

    let response = app
        .oneshot(get("/student/dashboard"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(response.headers().get(header::LOCATION).is_none());
}

#[tokio::test]
async fn admin_login_then_teacher_dashboard_redirects_to_admin_dashboard() {
    let app = test_app(true).await;

    // Scenario from the session design: any password is accepted for a
    // known (email, role) pair.
    let response = app
        .clone()
        .oneshot(post_login("admin", "admin@eduerp.com"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    // Cross-role navigation bounces to the session role's own dashboard.
    let response = app
        .clone()
        .oneshot(get("/teacher/dashboard"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/admin/dashboard"
    );

    // The own dashboard itself is allowed.
    let response = app.oneshot(get("/admin/dashboard")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_with_unknown_identity_returns_unauthorized() {
    let app = test_app(true).await;

    let response = app
        .clone()
        .oneshot(post_login("student", "nope@x.com"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The failed attempt did not create a session.
    let response = app
        .oneshot(get("/student/dashboard"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn login_with_invalid_role_segment_is_rejected() {
    let app = test_app(true).await;

    let response = app
        .oneshot(post_login("principal", "admin@eduerp.com"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn logout_endpoint_is_idempotent() {
    let app = test_app(true).await;

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/logout")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}

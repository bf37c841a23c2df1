use crate::{
    AppState,
    error::PortalError,
    guard,
    models::{
        AttendanceRecord, Course, DashboardView, FeeRecord, FeeStatus, LoginRequest, Notice,
        ResultSheet, Role, ScheduleSlot, Session, SessionEnvelope, SettingsProfile,
        StudentDashboard, StudentRecord, TeacherDashboard, TeacherRecord, UpdateSettingsRequest,
    },
    session::SessionState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};

// --- Helpers ---

/// Resolves the current session or fails with the taxonomy's authentication
/// error. Handlers behind the guard can rely on this never firing, but the
/// check keeps them safe if wired up without the guard layer.
fn require_session(state: &AppState) -> Result<Session, PortalError> {
    match state.sessions.current() {
        SessionState::Authenticated(session) => Ok(session),
        _ => Err(PortalError::Authentication),
    }
}

// --- Session Handlers ---

/// login
///
/// [Public Route] Runs one authentication attempt for the role-scoped login
/// view. The `{role}` path segment must resolve to a known role; the password
/// is accepted but not verified by the mock authenticator (demo stub).
///
/// Failure semantics: an unknown (email, role) pair returns 401 and leaves any
/// pre-existing session untouched; a second attempt while one is pending
/// returns 409.
#[utoipa::path(
    post,
    path = "/login/{role}",
    params(("role" = String, Path, description = "Requested role: admin | teacher | student")),
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session created", body = Session),
        (status = 400, description = "Unrecognized role"),
        (status = 401, description = "No matching identity"),
        (status = 409, description = "Another login attempt is pending")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Path(role): Path<String>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Session>, PortalError> {
    let role = Role::resolve(&role)?;
    let session = state
        .sessions
        .login(&payload.email, &payload.password, role)
        .await?;
    Ok(Json(session))
}

/// logout
///
/// [Public Route] Clears the live session and its persisted copy. Idempotent:
/// logging out twice (or while logged out) succeeds both times.
#[utoipa::path(
    post,
    path = "/logout",
    responses((status = 204, description = "Session cleared"))
)]
pub async fn logout(State(state): State<AppState>) -> StatusCode {
    state.sessions.logout().await;
    StatusCode::NO_CONTENT
}

/// get_session
///
/// [Public Route] Reports the store's current state. The `loading` variant is
/// distinct from `anonymous`: before the startup load resolves, the caller
/// must not assume "logged out".
#[utoipa::path(
    get,
    path = "/session",
    responses((status = 200, description = "Current session state", body = SessionEnvelope))
)]
pub async fn get_session(State(state): State<AppState>) -> Json<SessionEnvelope> {
    let envelope = match state.sessions.current() {
        SessionState::Unknown => SessionEnvelope::Loading,
        SessionState::Unauthenticated => SessionEnvelope::Anonymous,
        SessionState::Authenticated(session) => SessionEnvelope::Active(session),
    };
    Json(envelope)
}

/// landing
///
/// [Public Route] The landing view: the role choices and their login paths.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Role choices with their login and dashboard paths"))
)]
pub async fn landing() -> Json<Value> {
    let roles: Vec<Value> = Role::ALL
        .iter()
        .map(|role| {
            json!({
                "role": role.as_str(),
                "login": guard::login_path(*role),
                "dashboard": guard::dashboard_path(*role),
            })
        })
        .collect();
    Json(json!({ "name": "EduERP", "roles": roles }))
}

// --- Dashboard Handler ---

/// dashboard
///
/// [Guarded Route] The role-dispatched dashboard. Dispatch is purely on the
/// session role via exhaustive match; if the session is somehow absent the
/// fallback is the least-privileged (student) view, never admin.
#[utoipa::path(
    get,
    path = "/{role}/dashboard",
    params(("role" = String, Path, description = "Role scope of the route")),
    responses((status = 200, description = "Role dashboard", body = DashboardView))
)]
pub async fn dashboard(State(state): State<AppState>) -> Json<DashboardView> {
    let session = state.sessions.current().session().cloned();
    let role = Role::effective(session.as_ref().map(|s| s.role));

    let view = match role {
        Role::Admin => DashboardView::Admin(state.directory.stats().await),
        Role::Teacher => {
            let teachers = state.directory.teachers().await;
            let me = session
                .as_ref()
                .and_then(|s| teachers.iter().find(|t| t.id == s.subject_id))
                .cloned();
            let roster_size = state.directory.students().await.len();
            let next_class = state.directory.schedule().await.into_iter().next();
            DashboardView::Teacher(TeacherDashboard {
                department: me.as_ref().map(|t| t.department.clone()),
                subjects: me.map(|t| t.subjects).unwrap_or_default(),
                roster_size,
                next_class,
            })
        }
        Role::Student => {
            let subject_id = session.as_ref().map(|s| s.subject_id).unwrap_or_default();
            let attendance = state.directory.attendance_for_student(subject_id).await;
            let present = attendance
                .iter()
                .filter(|r| r.status == crate::models::AttendanceStatus::Present)
                .count();
            let attendance_rate = if attendance.is_empty() {
                0.0
            } else {
                present as f64 / attendance.len() as f64
            };
            let fees_due = state
                .directory
                .fees_for_student(subject_id)
                .await
                .iter()
                .filter(|f| f.status != FeeStatus::Paid)
                .map(|f| f.amount)
                .sum();
            let next_class = state.directory.schedule().await.into_iter().next();
            DashboardView::Student(StudentDashboard {
                attendance_rate,
                fees_due,
                next_class,
            })
        }
    };

    Json(view)
}

// --- Module Handlers ---

/// get_attendance
///
/// [Guarded Route] Students receive only their own attendance rows (filtered
/// by subject_id); teachers and admins receive the full roster.
#[utoipa::path(
    get,
    path = "/{role}/attendance",
    params(("role" = String, Path, description = "Role scope of the route")),
    responses((status = 200, description = "Attendance records", body = [AttendanceRecord]))
)]
pub async fn get_attendance(
    State(state): State<AppState>,
) -> Result<Json<Vec<AttendanceRecord>>, PortalError> {
    let session = require_session(&state)?;
    let records = match session.role {
        Role::Student => {
            state
                .directory
                .attendance_for_student(session.subject_id)
                .await
        }
        Role::Teacher | Role::Admin => state.directory.attendance_roster().await,
    };
    Ok(Json(records))
}

/// get_schedule
///
/// [Guarded Route] The weekly timetable; identical for every role.
#[utoipa::path(
    get,
    path = "/{role}/schedule",
    params(("role" = String, Path, description = "Role scope of the route")),
    responses((status = 200, description = "Timetable", body = [ScheduleSlot]))
)]
pub async fn get_schedule(State(state): State<AppState>) -> Json<Vec<ScheduleSlot>> {
    Json(state.directory.schedule().await)
}

/// get_results
///
/// [Guarded Route] Students receive their own result sheet; teachers and
/// admins receive every sheet.
#[utoipa::path(
    get,
    path = "/{role}/result",
    params(("role" = String, Path, description = "Role scope of the route")),
    responses((status = 200, description = "Result sheets", body = [ResultSheet]))
)]
pub async fn get_results(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResultSheet>>, PortalError> {
    let session = require_session(&state)?;
    let sheets = match session.role {
        Role::Student => state
            .directory
            .results_for_student(session.subject_id)
            .await
            .into_iter()
            .collect(),
        Role::Teacher | Role::Admin => state.directory.all_results().await,
    };
    Ok(Json(sheets))
}

/// get_fees
///
/// [Guarded Route] Students receive only their own fee lines; teachers and
/// admins receive the full ledger.
#[utoipa::path(
    get,
    path = "/{role}/fees",
    params(("role" = String, Path, description = "Role scope of the route")),
    responses((status = 200, description = "Fee records", body = [FeeRecord]))
)]
pub async fn get_fees(State(state): State<AppState>) -> Result<Json<Vec<FeeRecord>>, PortalError> {
    let session = require_session(&state)?;
    let fees = match session.role {
        Role::Student => state.directory.fees_for_student(session.subject_id).await,
        Role::Teacher | Role::Admin => state.directory.all_fees().await,
    };
    Ok(Json(fees))
}

/// get_courses
///
/// [Guarded Route] The course catalogue; identical for every role.
#[utoipa::path(
    get,
    path = "/{role}/course",
    params(("role" = String, Path, description = "Role scope of the route")),
    responses((status = 200, description = "Courses", body = [Course]))
)]
pub async fn get_courses(State(state): State<AppState>) -> Json<Vec<Course>> {
    Json(state.directory.courses().await)
}

/// get_notices
///
/// [Guarded Route] Published announcements; identical for every role.
#[utoipa::path(
    get,
    path = "/{role}/notices",
    params(("role" = String, Path, description = "Role scope of the route")),
    responses((status = 200, description = "Notices", body = [Notice]))
)]
pub async fn get_notices(State(state): State<AppState>) -> Json<Vec<Notice>> {
    Json(state.directory.notices().await)
}

/// get_settings
///
/// [Guarded Route] The editable profile slice of the current session.
#[utoipa::path(
    get,
    path = "/{role}/settings",
    params(("role" = String, Path, description = "Role scope of the route")),
    responses((status = 200, description = "Profile", body = SettingsProfile))
)]
pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<SettingsProfile>, PortalError> {
    let session = require_session(&state)?;
    Ok(Json(SettingsProfile::from_session(&session)))
}

/// update_settings
///
/// [Guarded Route] Applies a partial profile update and echoes the result.
/// Matches the source behaviour exactly: the change lives only in the
/// response, nothing is persisted.
#[utoipa::path(
    put,
    path = "/{role}/settings",
    params(("role" = String, Path, description = "Role scope of the route")),
    request_body = UpdateSettingsRequest,
    responses((status = 200, description = "Updated profile (not persisted)", body = SettingsProfile))
)]
pub async fn update_settings(
    State(state): State<AppState>,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Result<Json<SettingsProfile>, PortalError> {
    let session = require_session(&state)?;
    let profile = SettingsProfile::from_session(&session).apply(payload);
    Ok(Json(profile))
}

// --- Roster Handlers (admin oversight, teacher rosters) ---

/// get_students
///
/// [Guarded Route] The student roster, for teacher and admin oversight views.
///
/// *RBAC*: Explicitly rejects the student role; the roster exposes guardian
/// contact data that students have no business reading.
#[utoipa::path(
    get,
    path = "/{role}/students",
    params(("role" = String, Path, description = "Role scope of the route")),
    responses(
        (status = 200, description = "Students", body = [StudentRecord]),
        (status = 403, description = "Student role may not read the roster")
    )
)]
pub async fn get_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentRecord>>, StatusCode> {
    let session = require_session(&state).map_err(|_| StatusCode::UNAUTHORIZED)?;
    if session.role == Role::Student {
        return Err(StatusCode::FORBIDDEN);
    }
    Ok(Json(state.directory.students().await))
}

/// get_teachers
///
/// [Guarded Route] The teaching staff roster.
///
/// *RBAC*: Admin only, matching the source's admin oversight page.
#[utoipa::path(
    get,
    path = "/{role}/teachers",
    params(("role" = String, Path, description = "Role scope of the route")),
    responses(
        (status = 200, description = "Teachers", body = [TeacherRecord]),
        (status = 403, description = "Admin only")
    )
)]
pub async fn get_teachers(
    State(state): State<AppState>,
) -> Result<Json<Vec<TeacherRecord>>, StatusCode> {
    let session = require_session(&state).map_err(|_| StatusCode::UNAUTHORIZED)?;
    if session.role != Role::Admin {
        return Err(StatusCode::FORBIDDEN);
    }
    Ok(Json(state.directory.teachers().await))
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::PortalError;

// --- Identity & Session (Mapped to the persisted session record) ---

/// Role
///
/// The closed set of portal roles. Every role value flowing into the Route Guard
/// is one of these three; anything else is rejected by `Role::resolve` and never
/// silently coerced to a default that grants access.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema, Default,
)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    Admin,
    Teacher,
    // Default keeps role-conditional dispatch failing toward least privilege.
    #[default]
    Student,
}

impl Role {
    /// All members, in privilege order.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Teacher, Role::Student];

    /// resolve
    ///
    /// Maps a candidate string to a role. Case-sensitive: the wire format and
    /// the route `{role}` segment both use the exact lowercase names.
    pub fn resolve(candidate: &str) -> Result<Role, PortalError> {
        match candidate {
            "admin" => Ok(Role::Admin),
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            other => Err(PortalError::InvalidRole(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }

    /// effective
    ///
    /// Tie-break rule for role-conditional rendering: dispatch on the session
    /// role when present, otherwise fall back to the least-privileged view.
    pub fn effective(role: Option<Role>) -> Role {
        role.unwrap_or(Role::Student)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session
///
/// The record representing the currently authenticated identity. Exactly zero or
/// one live session exists per process; it is created on successful login,
/// destroyed on logout, and restored from the session vault at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Session {
    /// Stable identifier of the authenticated subject, used to key all
    /// per-user record lookups (attendance, fees, results).
    pub subject_id: Uuid,
    pub display_name: String,
    pub role: Role,
    pub contact_email: String,
    /// Reference to the avatar asset (multiavatar URL in the seed data).
    pub avatar_ref: Option<String>,
    #[ts(type = "string")]
    pub joined_at: DateTime<Utc>,
}

/// Identity
///
/// A directory entry used to validate login attempts: the (email, role, profile)
/// tuple supplied by the identity provider. Matching is by email + role; the
/// password is deliberately not part of this record (see `Authenticator`).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Identity {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub role: Role,
    pub department: Option<String>,
    pub avatar_ref: Option<String>,
    #[ts(type = "string")]
    pub joined_at: DateTime<Utc>,
}

impl Identity {
    /// Builds the session installed for this identity on successful login.
    pub fn session(&self) -> Session {
        Session {
            subject_id: self.id,
            display_name: self.display_name.clone(),
            role: self.role,
            contact_email: self.email.clone(),
            avatar_ref: self.avatar_ref.clone(),
            joined_at: self.joined_at,
        }
    }
}

// --- Request Payloads (Input Schemas) ---

/// LoginRequest
///
/// Input payload for POST /login/{role}. The requested role travels in the path
/// so the login view stays role-scoped, as in the front-end.
///
/// Note: The password is accepted but **not verified** by the mock
/// authenticator. This mirrors the source system's demo stub and must be
/// replaced before any production use.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// UpdateSettingsRequest
///
/// Partial update payload for the settings view. Mirrors the source behaviour:
/// the change is applied to the returned profile only, nothing is persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct UpdateSettingsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_ref: Option<String>,
}

// --- Session Introspection (Output) ---

/// SessionEnvelope
///
/// Output of GET /session. The `state` field distinguishes "not yet loaded"
/// from "logged out": consumers must not treat a loading store as anonymous.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(tag = "state", content = "session", rename_all = "lowercase")]
#[ts(export)]
pub enum SessionEnvelope {
    Loading,
    Anonymous,
    Active(Session),
}

// --- Directory Records (the mock data provider's shapes) ---

/// StudentRecord
///
/// A student profile as held by the directory, including guardian contact data
/// shown on the admin and teacher rosters.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct StudentRecord {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub student_no: String,
    pub grade: String,
    pub section: String,
    pub guardian_name: String,
    pub guardian_contact: String,
    pub avatar_ref: Option<String>,
    #[ts(type = "string")]
    pub joined_at: DateTime<Utc>,
}

/// TeacherRecord
///
/// A teaching staff profile with department and subject assignments.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct TeacherRecord {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub staff_no: String,
    pub department: String,
    pub subjects: Vec<String>,
    pub avatar_ref: Option<String>,
    #[ts(type = "string")]
    pub joined_at: DateTime<Utc>,
}

/// AttendanceStatus
///
/// Per-day attendance outcome for one student in one subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

/// AttendanceRecord
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub student_id: Uuid,
    #[ts(type = "string")]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// ScheduleSlot
///
/// One timetable entry. Break periods carry no teacher or room.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ScheduleSlot {
    pub day: String,
    pub starts_at: String,
    pub subject: String,
    pub teacher: Option<String>,
    pub room: Option<String>,
    pub duration_minutes: u32,
}

/// SubjectResult
///
/// A per-subject grade line on a result sheet.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct SubjectResult {
    pub subject: String,
    pub marks: u32,
    pub grade: String,
    pub standing: String,
}

/// PerformancePoint
///
/// One month of the performance trend shown on the results view.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct PerformancePoint {
    pub month: String,
    pub score: u32,
}

/// ResultSheet
///
/// A student's semester results: headline CGPA, monthly trend, and the
/// per-subject breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ResultSheet {
    pub student_id: Uuid,
    pub semester: String,
    pub cgpa: f64,
    pub trend: Vec<PerformancePoint>,
    pub subjects: Vec<SubjectResult>,
}

/// FeeKind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum FeeKind {
    Tuition,
    Activity,
    Transport,
    Other,
}

/// FeeStatus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum FeeStatus {
    Paid,
    Pending,
    Overdue,
}

/// FeeRecord
///
/// One fee line for a student. Amounts are whole currency units, as in the
/// source data.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct FeeRecord {
    pub id: Uuid,
    pub student_id: Uuid,
    pub amount: i64,
    #[ts(type = "string")]
    pub due_date: NaiveDate,
    pub kind: FeeKind,
    pub status: FeeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null", optional)]
    pub paid_at: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_no: Option<String>,
}

/// CourseStatus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum CourseStatus {
    Ongoing,
    Upcoming,
    Completed,
}

/// Course
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Course {
    pub code: String,
    pub name: String,
    pub instructor: String,
    pub credits: u8,
    pub enrolled: u32,
    pub schedule: String,
    pub status: CourseStatus,
}

/// NoticePriority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum NoticePriority {
    High,
    Medium,
    Low,
}

/// NoticeCategory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum NoticeCategory {
    Academic,
    Events,
    General,
    Workshop,
}

/// Notice
///
/// A published announcement visible on every role's notices view.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Notice {
    pub id: Uuid,
    pub title: String,
    pub category: NoticeCategory,
    pub department: String,
    #[ts(type = "string")]
    pub published_on: NaiveDate,
    pub priority: NoticePriority,
    pub body: String,
    pub attachments: Vec<String>,
    pub author: String,
}

// --- Dashboard & Profile Schemas (Output) ---

/// AdminDashboardStats
///
/// Output schema for the administrative dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct AdminDashboardStats {
    pub total_students: i64,
    pub total_teachers: i64,
    pub total_notices: i64,
    /// Sum of all fee lines already marked paid.
    pub fees_collected: i64,
    /// Sum of all fee lines still pending or overdue.
    pub fees_outstanding: i64,
}

/// TeacherDashboard
///
/// Output schema for the teaching dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct TeacherDashboard {
    pub department: Option<String>,
    pub subjects: Vec<String>,
    pub roster_size: usize,
    pub next_class: Option<ScheduleSlot>,
}

/// StudentDashboard
///
/// Output schema for the student dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct StudentDashboard {
    /// Fraction of recorded days marked present, in [0, 1].
    pub attendance_rate: f64,
    pub fees_due: i64,
    pub next_class: Option<ScheduleSlot>,
}

/// DashboardView
///
/// The role-dispatched dashboard payload. The tag names match the role strings
/// so the front-end can switch on `view` directly.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(tag = "view", rename_all = "lowercase")]
#[ts(export)]
pub enum DashboardView {
    Admin(AdminDashboardStats),
    Teacher(TeacherDashboard),
    Student(StudentDashboard),
}

/// SettingsProfile
///
/// Output schema for the settings view: the editable slice of the session.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct SettingsProfile {
    pub subject_id: Uuid,
    pub display_name: String,
    pub contact_email: String,
    pub role: Role,
    pub avatar_ref: Option<String>,
}

impl SettingsProfile {
    /// Projects the editable profile out of a session.
    pub fn from_session(session: &Session) -> Self {
        Self {
            subject_id: session.subject_id,
            display_name: session.display_name.clone(),
            contact_email: session.contact_email.clone(),
            role: session.role,
            avatar_ref: session.avatar_ref.clone(),
        }
    }

    /// Applies a partial update. Local only: the source UI never persisted
    /// settings changes, and neither does this endpoint.
    pub fn apply(mut self, update: UpdateSettingsRequest) -> Self {
        if let Some(name) = update.display_name {
            self.display_name = name;
        }
        if let Some(email) = update.contact_email {
            self.contact_email = email;
        }
        if let Some(avatar) = update.avatar_ref {
            self.avatar_ref = Some(avatar);
        }
        self
    }
}

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::data;
use crate::models::{
    AdminDashboardStats, AttendanceRecord, Course, FeeRecord, FeeStatus, Identity, Notice,
    ResultSheet, Role, ScheduleSlot, StudentRecord, TeacherRecord,
};

/// Directory Trait
///
/// Defines the abstract contract for the identity and record provider behind
/// the portal views. Handlers interact with the data layer only through this
/// trait, so the seed-backed implementation can later be swapped for a real
/// provider without touching the guard or the handlers.
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn Directory>`) safely shareable across Axum's asynchronous task
/// boundaries.
#[async_trait]
pub trait Directory: Send + Sync {
    // --- Identity ---
    // Login validation: matches by email AND role, both exact.
    async fn find_identity(&self, email: &str, role: Role) -> Option<Identity>;

    // --- Rosters ---
    async fn students(&self) -> Vec<StudentRecord>;
    async fn teachers(&self) -> Vec<TeacherRecord>;

    // --- Per-student records (keyed by subject_id) ---
    // Student view: only the caller's own rows.
    async fn attendance_for_student(&self, student_id: Uuid) -> Vec<AttendanceRecord>;
    // Teacher/admin view: the full roster.
    async fn attendance_roster(&self) -> Vec<AttendanceRecord>;
    async fn results_for_student(&self, student_id: Uuid) -> Option<ResultSheet>;
    async fn all_results(&self) -> Vec<ResultSheet>;
    async fn fees_for_student(&self, student_id: Uuid) -> Vec<FeeRecord>;
    async fn all_fees(&self) -> Vec<FeeRecord>;

    // --- Shared records (identical for every role) ---
    async fn schedule(&self) -> Vec<ScheduleSlot>;
    async fn courses(&self) -> Vec<Course>;
    async fn notices(&self) -> Vec<Notice>;

    // --- Aggregates ---
    async fn stats(&self) -> AdminDashboardStats;
}

/// DirectoryState
///
/// The concrete type used to share the directory across the application state.
pub type DirectoryState = Arc<dyn Directory>;

/// SeedDirectory
///
/// The concrete implementation backed by the in-process seed arrays. All data
/// is constructed once and served by filtering; there is no persistence and no
/// mutation, matching the source system's mock data layer.
pub struct SeedDirectory {
    identities: Vec<Identity>,
    students: Vec<StudentRecord>,
    teachers: Vec<TeacherRecord>,
    attendance: Vec<AttendanceRecord>,
    results: Vec<ResultSheet>,
    fees: Vec<FeeRecord>,
    schedule: Vec<ScheduleSlot>,
    courses: Vec<Course>,
    notices: Vec<Notice>,
}

impl SeedDirectory {
    /// Builds the directory from the canonical seed data.
    pub fn new() -> Self {
        Self {
            identities: data::identities(),
            students: data::students(),
            teachers: data::teachers(),
            attendance: data::attendance(),
            results: data::results(),
            fees: data::fees(),
            schedule: data::schedule(),
            courses: data::courses(),
            notices: data::notices(),
        }
    }
}

impl Default for SeedDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Directory for SeedDirectory {
    /// find_identity
    ///
    /// Exact-match lookup by email and role. A known email with the wrong
    /// role does not match: the login view is role-scoped and the pair must
    /// agree.
    async fn find_identity(&self, email: &str, role: Role) -> Option<Identity> {
        self.identities
            .iter()
            .find(|identity| identity.email == email && identity.role == role)
            .cloned()
    }

    async fn students(&self) -> Vec<StudentRecord> {
        self.students.clone()
    }

    async fn teachers(&self) -> Vec<TeacherRecord> {
        self.teachers.clone()
    }

    async fn attendance_for_student(&self, student_id: Uuid) -> Vec<AttendanceRecord> {
        self.attendance
            .iter()
            .filter(|record| record.student_id == student_id)
            .cloned()
            .collect()
    }

    async fn attendance_roster(&self) -> Vec<AttendanceRecord> {
        self.attendance.clone()
    }

    async fn results_for_student(&self, student_id: Uuid) -> Option<ResultSheet> {
        self.results
            .iter()
            .find(|sheet| sheet.student_id == student_id)
            .cloned()
    }

    async fn all_results(&self) -> Vec<ResultSheet> {
        self.results.clone()
    }

    async fn fees_for_student(&self, student_id: Uuid) -> Vec<FeeRecord> {
        self.fees
            .iter()
            .filter(|fee| fee.student_id == student_id)
            .cloned()
            .collect()
    }

    async fn all_fees(&self) -> Vec<FeeRecord> {
        self.fees.clone()
    }

    async fn schedule(&self) -> Vec<ScheduleSlot> {
        self.schedule.clone()
    }

    async fn courses(&self) -> Vec<Course> {
        self.courses.clone()
    }

    async fn notices(&self) -> Vec<Notice> {
        self.notices.clone()
    }

    /// stats
    ///
    /// Compiles the administrative dashboard counters in one pass over the
    /// seed arrays.
    async fn stats(&self) -> AdminDashboardStats {
        let fees_collected = self
            .fees
            .iter()
            .filter(|fee| fee.status == FeeStatus::Paid)
            .map(|fee| fee.amount)
            .sum();
        let fees_outstanding = self
            .fees
            .iter()
            .filter(|fee| fee.status != FeeStatus::Paid)
            .map(|fee| fee.amount)
            .sum();

        AdminDashboardStats {
            total_students: self.students.len() as i64,
            total_teachers: self.teachers.len() as i64,
            total_notices: self.notices.len() as i64,
            fees_collected,
            fees_outstanding,
        }
    }
}

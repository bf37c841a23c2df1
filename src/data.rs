//! Seed data for the portal's directory.
//!
//! Everything the views display comes from these arrays; there is no database.
//! The records (people, dates, amounts) match the demo dataset the system has
//! always shipped with, with stable UUIDs derived from the original numeric ids
//! so per-student filtering is deterministic across restarts.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use crate::models::{
    AttendanceRecord, AttendanceStatus, Course, CourseStatus, FeeKind, FeeRecord, FeeStatus,
    Identity, Notice, NoticeCategory, NoticePriority, PerformancePoint, ResultSheet, Role,
    ScheduleSlot, StudentRecord, SubjectResult, TeacherRecord,
};

// Stable subject ids (original dataset ids 1..6).
pub const ADMIN_ID: Uuid = Uuid::from_u128(1);
pub const TEACHER_JANE_ID: Uuid = Uuid::from_u128(2);
pub const STUDENT_MIKE_ID: Uuid = Uuid::from_u128(3);
pub const STUDENT_EMILY_ID: Uuid = Uuid::from_u128(4);
pub const STUDENT_ALEX_ID: Uuid = Uuid::from_u128(5);
pub const TEACHER_DAVID_ID: Uuid = Uuid::from_u128(6);

fn day(year: i32, month: u32, dom: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, dom, 0, 0, 0)
        .single()
        .expect("valid seed date")
}

fn date(year: i32, month: u32, dom: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, dom).expect("valid seed date")
}

fn avatar(seed: &str) -> Option<String> {
    Some(format!("https://api.multiavatar.com/{seed}.svg"))
}

/// The login directory: one identity per (email, role) pair.
pub fn identities() -> Vec<Identity> {
    vec![
        Identity {
            id: ADMIN_ID,
            display_name: "John Smith".to_string(),
            email: "admin@eduerp.com".to_string(),
            role: Role::Admin,
            department: Some("Administration".to_string()),
            avatar_ref: avatar("admin1"),
            joined_at: day(2022, 1, 15),
        },
        Identity {
            id: TEACHER_JANE_ID,
            display_name: "Jane Doe".to_string(),
            email: "teacher@eduerp.com".to_string(),
            role: Role::Teacher,
            department: Some("Mathematics".to_string()),
            avatar_ref: avatar("teacher1"),
            joined_at: day(2022, 3, 10),
        },
        Identity {
            id: STUDENT_MIKE_ID,
            display_name: "Mike Johnson".to_string(),
            email: "student@eduerp.com".to_string(),
            role: Role::Student,
            department: None,
            avatar_ref: avatar("student1"),
            joined_at: day(2022, 8, 5),
        },
    ]
}

pub fn students() -> Vec<StudentRecord> {
    vec![
        StudentRecord {
            id: STUDENT_MIKE_ID,
            display_name: "Mike Johnson".to_string(),
            email: "mike.johnson@eduerp.com".to_string(),
            student_no: "S2023001".to_string(),
            grade: "10".to_string(),
            section: "A".to_string(),
            guardian_name: "Robert Johnson".to_string(),
            guardian_contact: "+1 234-567-8901".to_string(),
            avatar_ref: avatar("student1"),
            joined_at: day(2022, 8, 5),
        },
        StudentRecord {
            id: STUDENT_EMILY_ID,
            display_name: "Emily Wilson".to_string(),
            email: "emily.wilson@eduerp.com".to_string(),
            student_no: "S2023002".to_string(),
            grade: "10".to_string(),
            section: "A".to_string(),
            guardian_name: "Sarah Wilson".to_string(),
            guardian_contact: "+1 234-567-8902".to_string(),
            avatar_ref: avatar("student2"),
            joined_at: day(2022, 8, 7),
        },
        StudentRecord {
            id: STUDENT_ALEX_ID,
            display_name: "Alex Thompson".to_string(),
            email: "alex.thompson@eduerp.com".to_string(),
            student_no: "S2023003".to_string(),
            grade: "10".to_string(),
            section: "B".to_string(),
            guardian_name: "Michael Thompson".to_string(),
            guardian_contact: "+1 234-567-8903".to_string(),
            avatar_ref: avatar("student3"),
            joined_at: day(2022, 8, 10),
        },
    ]
}

pub fn teachers() -> Vec<TeacherRecord> {
    vec![
        TeacherRecord {
            id: TEACHER_JANE_ID,
            display_name: "Jane Doe".to_string(),
            email: "jane.doe@eduerp.com".to_string(),
            staff_no: "T2023001".to_string(),
            department: "Mathematics".to_string(),
            subjects: vec!["Algebra".to_string(), "Calculus".to_string()],
            avatar_ref: avatar("teacher1"),
            joined_at: day(2022, 3, 10),
        },
        TeacherRecord {
            id: TEACHER_DAVID_ID,
            display_name: "David Brown".to_string(),
            email: "david.brown@eduerp.com".to_string(),
            staff_no: "T2023002".to_string(),
            department: "Science".to_string(),
            subjects: vec!["Physics".to_string(), "Chemistry".to_string()],
            avatar_ref: avatar("teacher2"),
            joined_at: day(2022, 3, 15),
        },
    ]
}

pub fn attendance() -> Vec<AttendanceRecord> {
    vec![
        AttendanceRecord {
            id: Uuid::from_u128(0x0a01),
            student_id: STUDENT_MIKE_ID,
            date: date(2023, 10, 1),
            status: AttendanceStatus::Present,
            subject: "Mathematics".to_string(),
            remarks: None,
        },
        AttendanceRecord {
            id: Uuid::from_u128(0x0a02),
            student_id: STUDENT_EMILY_ID,
            date: date(2023, 10, 1),
            status: AttendanceStatus::Absent,
            subject: "Mathematics".to_string(),
            remarks: Some("Called parent".to_string()),
        },
        AttendanceRecord {
            id: Uuid::from_u128(0x0a03),
            student_id: STUDENT_ALEX_ID,
            date: date(2023, 10, 1),
            status: AttendanceStatus::Late,
            subject: "Mathematics".to_string(),
            remarks: Some("Late by 15 minutes".to_string()),
        },
        AttendanceRecord {
            id: Uuid::from_u128(0x0a04),
            student_id: STUDENT_MIKE_ID,
            date: date(2023, 10, 2),
            status: AttendanceStatus::Present,
            subject: "Physics".to_string(),
            remarks: None,
        },
        AttendanceRecord {
            id: Uuid::from_u128(0x0a05),
            student_id: STUDENT_MIKE_ID,
            date: date(2023, 10, 3),
            status: AttendanceStatus::Late,
            subject: "Chemistry".to_string(),
            remarks: Some("Late by 10 minutes".to_string()),
        },
    ]
}

pub fn results() -> Vec<ResultSheet> {
    let trend = vec![
        PerformancePoint { month: "Sep".to_string(), score: 85 },
        PerformancePoint { month: "Oct".to_string(), score: 88 },
        PerformancePoint { month: "Nov".to_string(), score: 82 },
        PerformancePoint { month: "Dec".to_string(), score: 91 },
        PerformancePoint { month: "Jan".to_string(), score: 85 },
        PerformancePoint { month: "Feb".to_string(), score: 88 },
    ];

    let subjects = vec![
        subject_result("Mathematics", 92, "A", "excellent"),
        subject_result("Physics", 88, "A", "good"),
        subject_result("Chemistry", 85, "A", "good"),
        subject_result("Biology", 90, "A", "excellent"),
        subject_result("English", 87, "A", "good"),
        subject_result("History", 89, "A", "good"),
    ];

    vec![ResultSheet {
        student_id: STUDENT_MIKE_ID,
        semester: "Spring 2025".to_string(),
        cgpa: 3.85,
        trend,
        subjects,
    }]
}

fn subject_result(subject: &str, marks: u32, grade: &str, standing: &str) -> SubjectResult {
    SubjectResult {
        subject: subject.to_string(),
        marks,
        grade: grade.to_string(),
        standing: standing.to_string(),
    }
}

pub fn fees() -> Vec<FeeRecord> {
    vec![
        FeeRecord {
            id: Uuid::from_u128(0x0f01),
            student_id: STUDENT_MIKE_ID,
            amount: 1500,
            due_date: date(2023, 9, 30),
            kind: FeeKind::Tuition,
            status: FeeStatus::Paid,
            paid_at: Some(date(2023, 9, 25)),
            receipt_no: Some("REC001".to_string()),
        },
        FeeRecord {
            id: Uuid::from_u128(0x0f02),
            student_id: STUDENT_EMILY_ID,
            amount: 1500,
            due_date: date(2023, 9, 30),
            kind: FeeKind::Tuition,
            status: FeeStatus::Pending,
            paid_at: None,
            receipt_no: None,
        },
        FeeRecord {
            id: Uuid::from_u128(0x0f03),
            student_id: STUDENT_MIKE_ID,
            amount: 200,
            due_date: date(2023, 10, 15),
            kind: FeeKind::Activity,
            status: FeeStatus::Pending,
            paid_at: None,
            receipt_no: None,
        },
    ]
}

pub fn schedule() -> Vec<ScheduleSlot> {
    vec![
        slot("Monday", "8:00 AM", "Mathematics", Some("Jane Doe"), Some("101"), 90),
        slot("Monday", "9:30 AM", "Physics", Some("David Brown"), Some("Lab 1"), 90),
        slot("Monday", "11:00 AM", "Break", None, None, 60),
        slot("Monday", "1:00 PM", "Chemistry", Some("Sarah Wilson"), Some("Lab 2"), 90),
        slot("Tuesday", "8:00 AM", "English", Some("Michael Thompson"), Some("202"), 90),
        slot("Tuesday", "9:30 AM", "History", Some("Emily Davis"), Some("303"), 90),
        slot("Tuesday", "11:00 AM", "Break", None, None, 60),
        slot("Tuesday", "1:00 PM", "Geography", Some("Robert Johnson"), Some("204"), 90),
    ]
}

fn slot(
    slot_day: &str,
    starts_at: &str,
    subject: &str,
    teacher: Option<&str>,
    room: Option<&str>,
    duration_minutes: u32,
) -> ScheduleSlot {
    ScheduleSlot {
        day: slot_day.to_string(),
        starts_at: starts_at.to_string(),
        subject: subject.to_string(),
        teacher: teacher.map(str::to_string),
        room: room.map(str::to_string),
        duration_minutes,
    }
}

pub fn courses() -> Vec<Course> {
    vec![
        Course {
            code: "MATH101".to_string(),
            name: "Advanced Mathematics".to_string(),
            instructor: "Dr. Jane Doe".to_string(),
            credits: 3,
            enrolled: 45,
            schedule: "Mon, Wed 10:00 AM".to_string(),
            status: CourseStatus::Ongoing,
        },
        Course {
            code: "PHY201".to_string(),
            name: "Physics II".to_string(),
            instructor: "Prof. David Brown".to_string(),
            credits: 4,
            enrolled: 38,
            schedule: "Tue, Thu 2:00 PM".to_string(),
            status: CourseStatus::Ongoing,
        },
        Course {
            code: "CHEM101".to_string(),
            name: "General Chemistry".to_string(),
            instructor: "Dr. Sarah Wilson".to_string(),
            credits: 3,
            enrolled: 42,
            schedule: "Mon, Wed 1:00 PM".to_string(),
            status: CourseStatus::Upcoming,
        },
        Course {
            code: "BIO201".to_string(),
            name: "Biology II".to_string(),
            instructor: "Prof. Michael Thompson".to_string(),
            credits: 4,
            enrolled: 35,
            schedule: "Tue, Thu 11:00 AM".to_string(),
            status: CourseStatus::Completed,
        },
    ]
}

pub fn notices() -> Vec<Notice> {
    vec![
        Notice {
            id: Uuid::from_u128(0x0b01),
            title: "Mid-Term Examination Schedule".to_string(),
            category: NoticeCategory::Academic,
            department: "All Departments".to_string(),
            published_on: date(2025, 3, 15),
            priority: NoticePriority::High,
            body: "The mid-term examinations for all courses will be conducted from March 25th to April 5th, 2025. The detailed schedule has been attached below.".to_string(),
            attachments: vec!["schedule.pdf".to_string()],
            author: "Academic Office".to_string(),
        },
        Notice {
            id: Uuid::from_u128(0x0b02),
            title: "Annual Sports Day Registration".to_string(),
            category: NoticeCategory::Events,
            department: "Sports".to_string(),
            published_on: date(2025, 3, 10),
            priority: NoticePriority::Medium,
            body: "Registration for Annual Sports Day events is now open. Students interested in participating can register through the sports portal.".to_string(),
            attachments: vec![],
            author: "Sports Committee".to_string(),
        },
        Notice {
            id: Uuid::from_u128(0x0b03),
            title: "Library Working Hours Update".to_string(),
            category: NoticeCategory::General,
            department: "Library".to_string(),
            published_on: date(2025, 3, 8),
            priority: NoticePriority::Low,
            body: "The library will remain open from 8:00 AM to 8:00 PM on weekdays and 9:00 AM to 5:00 PM on weekends.".to_string(),
            attachments: vec![],
            author: "Library Department".to_string(),
        },
        Notice {
            id: Uuid::from_u128(0x0b04),
            title: "Workshop on Machine Learning".to_string(),
            category: NoticeCategory::Workshop,
            department: "Computer Science".to_string(),
            published_on: date(2025, 3, 20),
            priority: NoticePriority::Medium,
            body: "A workshop on Machine Learning basics will be conducted on March 20th. All interested students can register.".to_string(),
            attachments: vec!["workshop_details.pdf".to_string()],
            author: "CS Department".to_string(),
        },
    ]
}

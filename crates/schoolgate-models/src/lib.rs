//! # Schoolgate Models
//!
//! Record types the authorization engine reasons about.
//!
//! Only the fields that matter for scoping are modelled; persistence of the
//! full records belongs to the storage layer.
//!
//! # Modules
//!
//! - [`ids`]: Strongly-typed ids
//! - [`schools`]: Schools, departments, subjects
//! - [`teachers`]: Teacher profiles and teaching assignments
//! - [`classes`]: Classes and timetable entries
//! - [`students`]: Student profiles
//! - [`attendance`]: Attendance records
//! - [`assessments`]: Assessments, grades, grade letters
//! - [`roles`]: The four role groups and their capability grants

pub mod assessments;
pub mod attendance;
pub mod classes;
pub mod ids;
pub mod roles;
pub mod schools;
pub mod students;
pub mod teachers;

pub use assessments::{Assessment, AssessmentKind, Grade, GradeLetter};
pub use attendance::{Attendance, AttendanceStatus};
pub use classes::{Class, TimetableEntry, Weekday};
pub use ids::{
    AssessmentId, AttendanceId, ClassId, ClassSubjectId, DepartmentId, GradeId, GroupId,
    SchoolId, StudentId, SubjectId, TeacherId, TimetableEntryId, UserId,
};
pub use roles::Role;
pub use schools::{Department, School, Subject};
pub use students::Student;
pub use teachers::{
    ClassSubject, NewTeachingAssignment, Teacher, is_academic_year, parse_academic_year,
};

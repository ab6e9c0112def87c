//! Capability constants for role groups.
//!
//! Capabilities are the coarse, role-level grants synchronised onto the four
//! role groups. They never replace the relationship checks done by the
//! authorization engine; they describe what a group may do at all.
//!
//! # Example
//!
//! ```ignore
//! use schoolgate_core::capabilities;
//!
//! if granted.contains(&capabilities::ATTENDANCE_CREATE) {
//!     // Show the "mark attendance" action
//! }
//! ```

// =============================================================================
// School capabilities
// =============================================================================

/// Capability to create schools
pub const SCHOOL_CREATE: &str = "school:create";
/// Capability to read schools
pub const SCHOOL_READ: &str = "school:read";
/// Capability to update schools
pub const SCHOOL_UPDATE: &str = "school:update";
/// Capability to delete schools
pub const SCHOOL_DELETE: &str = "school:delete";

// =============================================================================
// Department capabilities
// =============================================================================

pub const DEPARTMENT_CREATE: &str = "department:create";
pub const DEPARTMENT_READ: &str = "department:read";
pub const DEPARTMENT_UPDATE: &str = "department:update";
pub const DEPARTMENT_DELETE: &str = "department:delete";

// =============================================================================
// Subject capabilities
// =============================================================================

pub const SUBJECT_CREATE: &str = "subject:create";
pub const SUBJECT_READ: &str = "subject:read";
pub const SUBJECT_UPDATE: &str = "subject:update";
pub const SUBJECT_DELETE: &str = "subject:delete";

// =============================================================================
// Teacher capabilities
// =============================================================================

pub const TEACHER_CREATE: &str = "teacher:create";
pub const TEACHER_READ: &str = "teacher:read";
pub const TEACHER_UPDATE: &str = "teacher:update";
pub const TEACHER_DELETE: &str = "teacher:delete";

// =============================================================================
// Class capabilities
// =============================================================================

pub const CLASS_CREATE: &str = "class:create";
pub const CLASS_READ: &str = "class:read";
pub const CLASS_UPDATE: &str = "class:update";
pub const CLASS_DELETE: &str = "class:delete";

// =============================================================================
// Student capabilities
// =============================================================================

pub const STUDENT_CREATE: &str = "student:create";
pub const STUDENT_READ: &str = "student:read";
pub const STUDENT_UPDATE: &str = "student:update";
pub const STUDENT_DELETE: &str = "student:delete";

// =============================================================================
// Attendance capabilities
// =============================================================================

/// Capability to mark attendance
pub const ATTENDANCE_CREATE: &str = "attendance:create";
pub const ATTENDANCE_READ: &str = "attendance:read";
pub const ATTENDANCE_UPDATE: &str = "attendance:update";
pub const ATTENDANCE_DELETE: &str = "attendance:delete";

// =============================================================================
// Grade capabilities
// =============================================================================

pub const GRADE_CREATE: &str = "grade:create";
pub const GRADE_READ: &str = "grade:read";
pub const GRADE_UPDATE: &str = "grade:update";
pub const GRADE_DELETE: &str = "grade:delete";

/// Every capability known to the system, in a stable order.
pub const ALL: &[&str] = &[
    SCHOOL_CREATE,
    SCHOOL_READ,
    SCHOOL_UPDATE,
    SCHOOL_DELETE,
    DEPARTMENT_CREATE,
    DEPARTMENT_READ,
    DEPARTMENT_UPDATE,
    DEPARTMENT_DELETE,
    SUBJECT_CREATE,
    SUBJECT_READ,
    SUBJECT_UPDATE,
    SUBJECT_DELETE,
    TEACHER_CREATE,
    TEACHER_READ,
    TEACHER_UPDATE,
    TEACHER_DELETE,
    CLASS_CREATE,
    CLASS_READ,
    CLASS_UPDATE,
    CLASS_DELETE,
    STUDENT_CREATE,
    STUDENT_READ,
    STUDENT_UPDATE,
    STUDENT_DELETE,
    ATTENDANCE_CREATE,
    ATTENDANCE_READ,
    ATTENDANCE_UPDATE,
    ATTENDANCE_DELETE,
    GRADE_CREATE,
    GRADE_READ,
    GRADE_UPDATE,
    GRADE_DELETE,
];

/// Split a capability into its `(resource, verb)` parts.
pub fn split(capability: &str) -> Option<(&str, &str)> {
    capability.split_once(':')
}

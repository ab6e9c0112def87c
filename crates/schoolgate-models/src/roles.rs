//! The four role groups and their capability grants.
//!
//! A caller belongs to at most one role group at any time. Group ids are fixed
//! so the identity store and this crate agree without a lookup.

use schoolgate_core::AppError;
use schoolgate_core::capabilities as cap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ids::GroupId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[serde(rename = "admin")]
    Administrator,
    Teacher,
    Student,
    Parent,
}

/// Role tags accepted by [`Role::from_str`].
pub mod tags {
    pub const ADMIN: &str = "admin";
    pub const TEACHER: &str = "teacher";
    pub const STUDENT: &str = "student";
    pub const PARENT: &str = "parent";
}

pub const ADMINISTRATOR_GROUP: GroupId = GroupId::from_u128(0x00000000_0000_0000_0000_000000000001);
pub const TEACHER_GROUP: GroupId = GroupId::from_u128(0x00000000_0000_0000_0000_000000000002);
pub const STUDENT_GROUP: GroupId = GroupId::from_u128(0x00000000_0000_0000_0000_000000000003);
pub const PARENT_GROUP: GroupId = GroupId::from_u128(0x00000000_0000_0000_0000_000000000004);

const ADMINISTRATOR_CAPABILITIES: &[&str] = &[
    cap::SCHOOL_CREATE,
    cap::SCHOOL_READ,
    cap::SCHOOL_UPDATE,
    cap::SCHOOL_DELETE,
    cap::DEPARTMENT_CREATE,
    cap::DEPARTMENT_READ,
    cap::DEPARTMENT_UPDATE,
    cap::DEPARTMENT_DELETE,
    cap::SUBJECT_CREATE,
    cap::SUBJECT_READ,
    cap::SUBJECT_UPDATE,
    cap::SUBJECT_DELETE,
    cap::TEACHER_CREATE,
    cap::TEACHER_READ,
    cap::TEACHER_UPDATE,
    cap::TEACHER_DELETE,
    cap::CLASS_CREATE,
    cap::CLASS_READ,
    cap::CLASS_UPDATE,
    cap::CLASS_DELETE,
    cap::STUDENT_CREATE,
    cap::STUDENT_READ,
    cap::STUDENT_UPDATE,
    cap::STUDENT_DELETE,
    cap::ATTENDANCE_CREATE,
    cap::ATTENDANCE_READ,
    cap::ATTENDANCE_UPDATE,
    cap::ATTENDANCE_DELETE,
    cap::GRADE_CREATE,
    cap::GRADE_READ,
    cap::GRADE_UPDATE,
    cap::GRADE_DELETE,
];

// Teachers read most things and keep attendance and grades for their classes.
const TEACHER_CAPABILITIES: &[&str] = &[
    cap::SCHOOL_READ,
    cap::DEPARTMENT_READ,
    cap::SUBJECT_READ,
    cap::TEACHER_READ,
    cap::CLASS_READ,
    cap::STUDENT_READ,
    cap::ATTENDANCE_CREATE,
    cap::ATTENDANCE_UPDATE,
    cap::ATTENDANCE_READ,
    cap::GRADE_CREATE,
    cap::GRADE_UPDATE,
    cap::GRADE_READ,
];

const STUDENT_CAPABILITIES: &[&str] = &[
    cap::SCHOOL_READ,
    cap::DEPARTMENT_READ,
    cap::SUBJECT_READ,
    cap::CLASS_READ,
    cap::ATTENDANCE_READ,
    cap::GRADE_READ,
];

const PARENT_CAPABILITIES: &[&str] = &[
    cap::SCHOOL_READ,
    cap::CLASS_READ,
    cap::STUDENT_READ,
    cap::ATTENDANCE_READ,
    cap::GRADE_READ,
];

impl Role {
    pub const ALL: [Role; 4] = [Role::Administrator, Role::Teacher, Role::Student, Role::Parent];

    pub fn tag(&self) -> &'static str {
        match self {
            Role::Administrator => tags::ADMIN,
            Role::Teacher => tags::TEACHER,
            Role::Student => tags::STUDENT,
            Role::Parent => tags::PARENT,
        }
    }

    /// Display name of the backing group.
    pub fn group_name(&self) -> &'static str {
        match self {
            Role::Administrator => "School Administrators",
            Role::Teacher => "Teachers",
            Role::Student => "Students",
            Role::Parent => "Parents",
        }
    }

    pub fn group_id(&self) -> GroupId {
        match self {
            Role::Administrator => ADMINISTRATOR_GROUP,
            Role::Teacher => TEACHER_GROUP,
            Role::Student => STUDENT_GROUP,
            Role::Parent => PARENT_GROUP,
        }
    }

    pub fn from_group_id(id: GroupId) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.group_id() == id)
    }

    /// Coarse capability grants synchronised onto the role's group.
    pub fn capabilities(&self) -> &'static [&'static str] {
        match self {
            Role::Administrator => ADMINISTRATOR_CAPABILITIES,
            Role::Teacher => TEACHER_CAPABILITIES,
            Role::Student => STUDENT_CAPABILITIES,
            Role::Parent => PARENT_CAPABILITIES,
        }
    }

    /// Whether joining this group also sets the elevated administrator flag.
    pub fn grants_administrator_flag(&self) -> bool {
        matches!(self, Role::Administrator)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            tags::ADMIN => Ok(Role::Administrator),
            tags::TEACHER => Ok(Role::Teacher),
            tags::STUDENT => Ok(Role::Student),
            tags::PARENT => Ok(Role::Parent),
            other => Err(AppError::bad_request(anyhow::anyhow!(
                "Unrecognized role tag: {}",
                other
            ))),
        }
    }
}

//! The Identity Context: who is asking, for the duration of one request.
//!
//! Built once by the authentication layer and never mutated afterwards. Role
//! capabilities are carried as two optional profile links instead of being
//! probed at runtime; an absent link simply means the capability is absent.

use schoolgate_models::{StudentId, TeacherId, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityContext {
    pub user_id: Option<UserId>,
    pub is_authenticated: bool,
    pub is_administrator: bool,
    pub teacher_link: Option<TeacherId>,
    pub student_link: Option<StudentId>,
}

/// How the rules see a caller, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallerKind {
    Anonymous,
    Administrator,
    Teacher(TeacherId),
    Student(StudentId),
    /// Authenticated without a role-linked profile (e.g. a parent).
    Unlinked,
}

impl IdentityContext {
    /// A caller without a valid session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            is_authenticated: true,
            ..Self::default()
        }
    }

    pub fn administrator(user_id: UserId) -> Self {
        Self {
            is_administrator: true,
            ..Self::authenticated(user_id)
        }
    }

    pub fn teacher(user_id: UserId, teacher: TeacherId) -> Self {
        Self::authenticated(user_id).with_teacher_link(teacher)
    }

    pub fn student(user_id: UserId, student: StudentId) -> Self {
        Self::authenticated(user_id).with_student_link(student)
    }

    pub fn with_teacher_link(mut self, teacher: TeacherId) -> Self {
        self.teacher_link = Some(teacher);
        self
    }

    pub fn with_student_link(mut self, student: StudentId) -> Self {
        self.student_link = Some(student);
        self
    }

    /// Classifies the caller. Administrator wins over any link, and a teacher
    /// link wins over a student link.
    pub fn caller_kind(&self) -> CallerKind {
        if !self.is_authenticated {
            return CallerKind::Anonymous;
        }
        if self.is_administrator {
            return CallerKind::Administrator;
        }
        match (self.teacher_link, self.student_link) {
            (Some(teacher), _) => CallerKind::Teacher(teacher),
            (None, Some(student)) => CallerKind::Student(student),
            (None, None) => CallerKind::Unlinked,
        }
    }
}

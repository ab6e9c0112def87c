//! Student profiles.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::ids::{ClassId, StudentId, UserId};

/// A student profile.
///
/// Every enrolled student has exactly one current class. A `None` class marks
/// an orphaned record (class deleted or never assigned); such a student has no
/// scope anchor: administrators see it, and the student still sees their own
/// record, but no teacher reaches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: StudentId,
    pub user_id: UserId,
    pub student_id: String,
    pub admission_number: String,
    pub current_class: Option<ClassId>,
    pub is_active: bool,
}

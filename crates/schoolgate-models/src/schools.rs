//! School, department and subject records.
//!
//! These sit at the top of the hierarchy and carry no per-caller scoping:
//! any authenticated caller may read them, only administrators may change them.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::ids::{DepartmentId, SchoolId, SubjectId, TeacherId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct School {
    pub id: SchoolId,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub school_id: SchoolId,
    pub head_of_department: Option<TeacherId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    /// Unique short code, e.g. `MATH101`.
    pub code: String,
    pub department_id: DepartmentId,
    pub is_active: bool,
}

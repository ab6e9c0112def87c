//! Teacher profiles and teaching assignments.
//!
//! A teaching assignment ([`ClassSubject`]) binds one teacher to one
//! (class, subject, academic year) triple. The triple is unique: a class never
//! has two teachers for the same subject in the same year.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::ids::{ClassId, ClassSubjectId, DepartmentId, SubjectId, TeacherId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Teacher {
    pub id: TeacherId,
    pub user_id: UserId,
    pub employee_id: String,
    pub department_id: DepartmentId,
    pub is_active: bool,
}

/// Teaching assignment of a teacher to a class for one subject and year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ClassSubject {
    pub id: ClassSubjectId,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub academic_year: String,
    pub periods_per_week: i32,
}

impl ClassSubject {
    /// The uniqueness key of an assignment.
    pub fn triple(&self) -> (ClassId, SubjectId, &str) {
        (self.class_id, self.subject_id, self.academic_year.as_str())
    }
}

/// DTO for creating a teaching assignment.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewTeachingAssignment {
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    #[validate(custom(function = "validate_academic_year"))]
    pub academic_year: String,
    #[validate(range(min = 1, max = 40, message = "Periods per week must be between 1 and 40"))]
    pub periods_per_week: i32,
}

impl NewTeachingAssignment {
    pub fn into_assignment(self) -> ClassSubject {
        ClassSubject {
            id: ClassSubjectId::new(),
            class_id: self.class_id,
            subject_id: self.subject_id,
            teacher_id: self.teacher_id,
            academic_year: self.academic_year,
            periods_per_week: self.periods_per_week,
        }
    }
}

/// Academic years are written `YYYY-YYYY` with consecutive years, e.g. `2023-2024`.
pub fn validate_academic_year(year: &str) -> Result<(), ValidationError> {
    if is_academic_year(year) {
        Ok(())
    } else {
        let mut err = ValidationError::new("academic_year");
        err.message = Some("Academic year must look like 2023-2024".into());
        Err(err)
    }
}

pub fn is_academic_year(year: &str) -> bool {
    parse_academic_year(year).is_some()
}

/// Splits `YYYY-YYYY` into its two years.
///
/// Each half must be exactly four ASCII digits and the years consecutive.
pub fn parse_academic_year(year: &str) -> Option<(u16, u16)> {
    let (start, end) = year.split_once('-')?;
    let start = four_digit_year(start)?;
    let end = four_digit_year(end)?;
    (end == start + 1).then_some((start, end))
}

fn four_digit_year(raw: &str) -> Option<u16> {
    if raw.len() != 4 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

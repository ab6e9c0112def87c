//! Assessments and the grades recorded against them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

use crate::ids::{AssessmentId, ClassSubjectId, GradeId, StudentId, TeacherId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentKind {
    Quiz,
    Test,
    Midterm,
    Final,
    Assignment,
    Project,
}

impl FromStr for AssessmentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quiz" => Ok(AssessmentKind::Quiz),
            "test" => Ok(AssessmentKind::Test),
            "midterm" => Ok(AssessmentKind::Midterm),
            "final" => Ok(AssessmentKind::Final),
            "assignment" => Ok(AssessmentKind::Assignment),
            "project" => Ok(AssessmentKind::Project),
            other => Err(anyhow::anyhow!("Invalid assessment type: {}", other)),
        }
    }
}

impl TryFrom<String> for AssessmentKind {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// An assessment for one teaching assignment.
///
/// Students only ever see it once `is_published` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Assessment {
    pub id: AssessmentId,
    pub name: String,
    pub class_subject_id: ClassSubjectId,
    #[sqlx(try_from = "String")]
    pub kind: AssessmentKind,
    pub total_marks: i32,
    pub date: NaiveDate,
    pub is_published: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Grade {
    pub id: GradeId,
    pub student_id: StudentId,
    pub assessment_id: AssessmentId,
    pub marks_obtained: f64,
    pub graded_by: TeacherId,
}

impl Grade {
    /// Percentage of the assessment's total; `None` when the total is zero.
    pub fn percentage(&self, assessment: &Assessment) -> Option<f64> {
        if assessment.total_marks <= 0 {
            return None;
        }
        Some(self.marks_obtained / f64::from(assessment.total_marks) * 100.0)
    }

    pub fn letter(&self, assessment: &Assessment) -> Option<GradeLetter> {
        self.percentage(assessment).map(GradeLetter::from_percentage)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GradeLetter {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
    F,
}

impl GradeLetter {
    pub fn from_percentage(percentage: f64) -> Self {
        match percentage {
            p if p >= 90.0 => GradeLetter::APlus,
            p if p >= 80.0 => GradeLetter::A,
            p if p >= 70.0 => GradeLetter::BPlus,
            p if p >= 60.0 => GradeLetter::B,
            p if p >= 50.0 => GradeLetter::CPlus,
            p if p >= 40.0 => GradeLetter::C,
            _ => GradeLetter::F,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GradeLetter::APlus => "A+",
            GradeLetter::A => "A",
            GradeLetter::BPlus => "B+",
            GradeLetter::B => "B",
            GradeLetter::CPlus => "C+",
            GradeLetter::C => "C",
            GradeLetter::F => "F",
        }
    }
}

impl fmt::Display for GradeLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

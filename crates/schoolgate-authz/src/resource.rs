//! Resource kinds, actions and borrowed targets.

use axum::http::Method;
use schoolgate_core::AppError;
use schoolgate_models::{
    Assessment, Attendance, Class, ClassSubject, Department, Grade, School, Student, Subject,
    Teacher, TimetableEntry,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// `Read` is any safe, non-mutating access; `Write` covers create, update and delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Read,
    Write,
}

impl Action {
    /// GET, HEAD and OPTIONS are reads, every other method writes.
    pub fn from_method(method: &Method) -> Self {
        if method == Method::GET || method == Method::HEAD || method == Method::OPTIONS {
            Action::Read
        } else {
            Action::Write
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Write => "write",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(Action::Read),
            "write" => Ok(Action::Write),
            other => Err(AppError::bad_request(anyhow::anyhow!(
                "Invalid action: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    School,
    Department,
    Subject,
    Teacher,
    Class,
    ClassSubject,
    Timetable,
    Student,
    Attendance,
    Assessment,
    Grade,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 11] = [
        ResourceKind::School,
        ResourceKind::Department,
        ResourceKind::Subject,
        ResourceKind::Teacher,
        ResourceKind::Class,
        ResourceKind::ClassSubject,
        ResourceKind::Timetable,
        ResourceKind::Student,
        ResourceKind::Attendance,
        ResourceKind::Assessment,
        ResourceKind::Grade,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::School => "school",
            ResourceKind::Department => "department",
            ResourceKind::Subject => "subject",
            ResourceKind::Teacher => "teacher",
            ResourceKind::Class => "class",
            ResourceKind::ClassSubject => "class_subject",
            ResourceKind::Timetable => "timetable",
            ResourceKind::Student => "student",
            ResourceKind::Attendance => "attendance",
            ResourceKind::Assessment => "assessment",
            ResourceKind::Grade => "grade",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Invalid resource kind: {}", s)))
    }
}

/// A borrowed view of one protected record.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    School(&'a School),
    Department(&'a Department),
    Subject(&'a Subject),
    Teacher(&'a Teacher),
    Class(&'a Class),
    ClassSubject(&'a ClassSubject),
    Timetable(&'a TimetableEntry),
    Student(&'a Student),
    Attendance(&'a Attendance),
    Assessment(&'a Assessment),
    Grade(&'a Grade),
}

impl Target<'_> {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Target::School(_) => ResourceKind::School,
            Target::Department(_) => ResourceKind::Department,
            Target::Subject(_) => ResourceKind::Subject,
            Target::Teacher(_) => ResourceKind::Teacher,
            Target::Class(_) => ResourceKind::Class,
            Target::ClassSubject(_) => ResourceKind::ClassSubject,
            Target::Timetable(_) => ResourceKind::Timetable,
            Target::Student(_) => ResourceKind::Student,
            Target::Attendance(_) => ResourceKind::Attendance,
            Target::Assessment(_) => ResourceKind::Assessment,
            Target::Grade(_) => ResourceKind::Grade,
        }
    }
}

/// Record types the engine can check and filter.
pub trait Protected {
    const KIND: ResourceKind;

    fn as_target(&self) -> Target<'_>;
}

macro_rules! protected {
    ($record:ty, $variant:ident) => {
        impl Protected for $record {
            const KIND: ResourceKind = ResourceKind::$variant;

            fn as_target(&self) -> Target<'_> {
                Target::$variant(self)
            }
        }
    };
}

protected!(School, School);
protected!(Department, Department);
protected!(Subject, Subject);
protected!(Teacher, Teacher);
protected!(Class, Class);
protected!(ClassSubject, ClassSubject);
protected!(TimetableEntry, Timetable);
protected!(Student, Student);
protected!(Attendance, Attendance);
protected!(Assessment, Assessment);
protected!(Grade, Grade);

//! Classes and their timetable.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

use crate::ids::{ClassId, ClassSubjectId, SchoolId, TeacherId, TimetableEntryId};

/// A class (homeroom group) for one academic year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Class {
    pub id: ClassId,
    pub name: String,
    pub level: i32,
    pub section: String,
    pub school_id: SchoolId,
    /// Homeroom owner; at most one at a time.
    pub class_teacher: Option<TeacherId>,
    pub academic_year: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monday" => Ok(Weekday::Monday),
            "tuesday" => Ok(Weekday::Tuesday),
            "wednesday" => Ok(Weekday::Wednesday),
            "thursday" => Ok(Weekday::Thursday),
            "friday" => Ok(Weekday::Friday),
            "saturday" => Ok(Weekday::Saturday),
            "sunday" => Ok(Weekday::Sunday),
            other => Err(anyhow::anyhow!("Invalid weekday: {}", other)),
        }
    }
}

impl TryFrom<String> for Weekday {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One slot in a class timetable, anchored on its teaching assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TimetableEntry {
    pub id: TimetableEntryId,
    pub class_subject_id: ClassSubjectId,
    #[sqlx(try_from = "String")]
    pub day_of_week: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub room_number: Option<String>,
    pub academic_year: String,
}

use anyhow::anyhow;
use schoolgate_authz::{ResourceKind, Target};
use schoolgate_core::AppError;
use schoolgate_models::{
    Assessment, Attendance, Class, ClassSubject, Department, Grade, School, Student, Subject,
    Teacher, TimetableEntry,
};
use sqlx::PgPool;
use sqlx::postgres::PgRow;
use tracing::instrument;
use uuid::Uuid;

/// An owned protected record of any kind.
#[derive(Debug, Clone)]
pub enum Record {
    School(School),
    Department(Department),
    Subject(Subject),
    Teacher(Teacher),
    Class(Class),
    ClassSubject(ClassSubject),
    Timetable(TimetableEntry),
    Student(Student),
    Attendance(Attendance),
    Assessment(Assessment),
    Grade(Grade),
}

impl Record {
    pub fn target(&self) -> Target<'_> {
        match self {
            Record::School(r) => Target::School(r),
            Record::Department(r) => Target::Department(r),
            Record::Subject(r) => Target::Subject(r),
            Record::Teacher(r) => Target::Teacher(r),
            Record::Class(r) => Target::Class(r),
            Record::ClassSubject(r) => Target::ClassSubject(r),
            Record::Timetable(r) => Target::Timetable(r),
            Record::Student(r) => Target::Student(r),
            Record::Attendance(r) => Target::Attendance(r),
            Record::Assessment(r) => Target::Assessment(r),
            Record::Grade(r) => Target::Grade(r),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.target().kind()
    }
}

fn select_for(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::School => "SELECT id, name, email FROM schools WHERE id = $1",
        ResourceKind::Department => {
            "SELECT id, name, school_id, head_of_department FROM departments WHERE id = $1"
        }
        ResourceKind::Subject => {
            "SELECT id, name, code, department_id, is_active FROM subjects WHERE id = $1"
        }
        ResourceKind::Teacher => {
            "SELECT id, user_id, employee_id, department_id, is_active FROM teachers WHERE id = $1"
        }
        ResourceKind::Class => {
            "SELECT id, name, level, section, school_id, class_teacher, academic_year
             FROM classes WHERE id = $1"
        }
        ResourceKind::ClassSubject => {
            "SELECT id, class_id, subject_id, teacher_id, academic_year, periods_per_week
             FROM class_subjects WHERE id = $1"
        }
        ResourceKind::Timetable => {
            "SELECT id, class_subject_id, day_of_week, start_time, end_time, room_number,
                    academic_year
             FROM timetable_entries WHERE id = $1"
        }
        ResourceKind::Student => {
            "SELECT id, user_id, student_id, admission_number, current_class, is_active
             FROM students WHERE id = $1"
        }
        ResourceKind::Attendance => {
            "SELECT id, student_id, date, status, class_subject_id, marked_by
             FROM attendance WHERE id = $1"
        }
        ResourceKind::Assessment => {
            "SELECT id, name, class_subject_id, kind, total_marks, date, is_published
             FROM assessments WHERE id = $1"
        }
        ResourceKind::Grade => {
            "SELECT id, student_id, assessment_id, marks_obtained, graded_by
             FROM grades WHERE id = $1"
        }
    }
}

async fn fetch_one<T>(db: &PgPool, kind: ResourceKind, id: Uuid) -> Result<T, AppError>
where
    T: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
{
    sqlx::query_as::<_, T>(select_for(kind))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("{} {} not found", kind, id)))
}

/// Loads one record of `kind` by id.
#[instrument(skip(db))]
pub async fn fetch_record(db: &PgPool, kind: ResourceKind, id: Uuid) -> Result<Record, AppError> {
    let record = match kind {
        ResourceKind::School => Record::School(fetch_one(db, kind, id).await?),
        ResourceKind::Department => Record::Department(fetch_one(db, kind, id).await?),
        ResourceKind::Subject => Record::Subject(fetch_one(db, kind, id).await?),
        ResourceKind::Teacher => Record::Teacher(fetch_one(db, kind, id).await?),
        ResourceKind::Class => Record::Class(fetch_one(db, kind, id).await?),
        ResourceKind::ClassSubject => Record::ClassSubject(fetch_one(db, kind, id).await?),
        ResourceKind::Timetable => Record::Timetable(fetch_one(db, kind, id).await?),
        ResourceKind::Student => Record::Student(fetch_one(db, kind, id).await?),
        ResourceKind::Attendance => Record::Attendance(fetch_one(db, kind, id).await?),
        ResourceKind::Assessment => Record::Assessment(fetch_one(db, kind, id).await?),
        ResourceKind::Grade => Record::Grade(fetch_one(db, kind, id).await?),
    };
    Ok(record)
}

use schoolgate_authz::SchoolDirectory;
use schoolgate_core::AppError;
use schoolgate_models::{Assessment, Class, ClassSubject, Student};
use sqlx::PgPool;
use tracing::{info, instrument};

/// Loads classes, students, teaching assignments and assessments.
///
/// Attendance, grades and reference data are not part of the graph; they are
/// the targets checked against it.
#[instrument(skip(db))]
pub async fn load_directory(db: &PgPool) -> Result<SchoolDirectory, AppError> {
    let classes: Vec<Class> = sqlx::query_as(
        "SELECT id, name, level, section, school_id, class_teacher, academic_year FROM classes",
    )
    .fetch_all(db)
    .await?;

    let students: Vec<Student> = sqlx::query_as(
        "SELECT id, user_id, student_id, admission_number, current_class, is_active FROM students",
    )
    .fetch_all(db)
    .await?;

    let assignments: Vec<ClassSubject> = sqlx::query_as(
        "SELECT id, class_id, subject_id, teacher_id, academic_year, periods_per_week
         FROM class_subjects",
    )
    .fetch_all(db)
    .await?;

    let assessments: Vec<Assessment> = sqlx::query_as(
        "SELECT id, name, class_subject_id, kind, total_marks, date, is_published FROM assessments",
    )
    .fetch_all(db)
    .await?;

    let mut directory = SchoolDirectory::new();
    for class in classes {
        directory.insert_class(class);
    }
    for student in students {
        directory.insert_student(student);
    }
    for assignment in assignments {
        directory.insert_class_subject(assignment)?;
    }
    for assessment in assessments {
        directory.insert_assessment(assessment);
    }

    info!(
        classes = directory.class_count(),
        students = directory.student_count(),
        assignments = directory.assignment_count(),
        "Loaded relationship graph"
    );
    Ok(directory)
}

use anyhow::anyhow;
use schoolgate_authz::IdentityContext;
use schoolgate_core::AppError;
use schoolgate_models::{StudentId, TeacherId, UserId};
use sqlx::PgPool;
use tracing::instrument;

/// Builds the Identity Context of an existing user.
///
/// The administrator flag comes from `users.is_staff`; profile links come
/// from the teacher and student tables.
#[instrument(skip(db))]
pub async fn load_identity(db: &PgPool, user: UserId) -> Result<IdentityContext, AppError> {
    let is_staff: bool = sqlx::query_scalar("SELECT is_staff FROM users WHERE id = $1")
        .bind(user)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("User {} not found", user)))?;

    let teacher: Option<TeacherId> =
        sqlx::query_scalar("SELECT id FROM teachers WHERE user_id = $1")
            .bind(user)
            .fetch_optional(db)
            .await?;

    let student: Option<StudentId> =
        sqlx::query_scalar("SELECT id FROM students WHERE user_id = $1")
            .bind(user)
            .fetch_optional(db)
            .await?;

    Ok(IdentityContext {
        user_id: Some(user),
        is_authenticated: true,
        is_administrator: is_staff,
        teacher_link: teacher,
        student_link: student,
    })
}

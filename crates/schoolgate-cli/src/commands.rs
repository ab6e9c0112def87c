use anyhow::anyhow;
use schoolgate_authz::{Action, Authorizer, ResourceKind, assign_role};
use schoolgate_config::AuthzConfig;
use schoolgate_core::AppError;
use schoolgate_db::{PgGroupStore, PgPool, fetch_record, load_directory, load_identity};
use schoolgate_models::{Role, UserId};
use std::fmt;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl From<bool> for Decision {
    fn from(allowed: bool) -> Self {
        if allowed { Decision::Allow } else { Decision::Deny }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Allow => f.write_str("ALLOW"),
            Decision::Deny => f.write_str("DENY"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CheckRequest {
    pub user: UserId,
    pub resource: ResourceKind,
    pub action: Action,
    /// Without a record only the coarse check runs.
    pub record: Option<Uuid>,
}

/// Creates the role groups and synchronises their capability grants.
pub async fn setup_groups(pool: &PgPool) -> Result<Vec<(Role, usize)>, AppError> {
    schoolgate_db::sync_role_groups(pool).await
}

/// Moves `user` into the role named `tag`.
pub async fn assign(pool: &PgPool, user: UserId, tag: &str) -> Result<(), AppError> {
    let store = PgGroupStore::new(pool.clone());
    if assign_role(&store, user, tag).await? {
        Ok(())
    } else {
        Err(AppError::bad_request(anyhow!(
            "Unrecognized role '{}', expected one of admin, teacher, student, parent",
            tag
        )))
    }
}

/// Evaluates one authorization decision against the live database.
pub async fn check(
    pool: &PgPool,
    config: &AuthzConfig,
    request: CheckRequest,
) -> Result<Decision, AppError> {
    let identity = load_identity(pool, request.user).await?;
    let directory = load_directory(pool).await?;
    let authorizer = Authorizer::new(&directory, config.clone());

    let allowed = match request.record {
        None => authorizer.permits(&identity, request.resource, request.action),
        Some(id) => {
            let record = fetch_record(pool, request.resource, id).await?;
            authorizer.permits_on(&identity, request.resource, request.action, record.target())
        }
    };

    let decision = Decision::from(allowed);
    info!(
        user = %request.user,
        resource = %request.resource,
        action = %request.action,
        %decision,
        "Checked access"
    );
    Ok(decision)
}

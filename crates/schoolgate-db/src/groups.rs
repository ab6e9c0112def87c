use schoolgate_authz::GroupStore;
use schoolgate_core::AppError;
use schoolgate_models::{GroupId, Role, UserId};
use sqlx::PgPool;
use std::collections::BTreeSet;
use tracing::{info, instrument};

fn role_group_ids() -> Vec<GroupId> {
    Role::ALL.iter().map(Role::group_id).collect()
}

/// Group membership backed by the `user_groups` table.
#[derive(Debug, Clone)]
pub struct PgGroupStore {
    db: PgPool,
}

impl PgGroupStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

impl GroupStore for PgGroupStore {
    #[instrument(skip(self))]
    async fn replace_role(&self, user: UserId, role: Role) -> Result<(), AppError> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM user_groups WHERE user_id = $1 AND group_id = ANY($2)")
            .bind(user)
            .bind(role_group_ids())
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO user_groups (user_id, group_id) VALUES ($1, $2)
             ON CONFLICT (user_id, group_id) DO NOTHING",
        )
        .bind(user)
        .bind(role.group_id())
        .execute(&mut *tx)
        .await?;

        if role.grants_administrator_flag() {
            sqlx::query("UPDATE users SET is_staff = TRUE WHERE id = $1")
                .bind(user)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn roles_of(&self, user: UserId) -> Result<BTreeSet<Role>, AppError> {
        let groups: Vec<GroupId> =
            sqlx::query_scalar("SELECT group_id FROM user_groups WHERE user_id = $1")
                .bind(user)
                .fetch_all(&self.db)
                .await?;

        Ok(groups.into_iter().filter_map(Role::from_group_id).collect())
    }

    #[instrument(skip(self))]
    async fn is_administrator(&self, user: UserId) -> Result<bool, AppError> {
        let is_staff: Option<bool> = sqlx::query_scalar("SELECT is_staff FROM users WHERE id = $1")
            .bind(user)
            .fetch_optional(&self.db)
            .await?;
        Ok(is_staff.unwrap_or(false))
    }
}

/// Creates the four role groups and aligns their capability grants.
///
/// Grants no longer listed for a role are removed. Safe to run repeatedly.
/// Returns the number of grants each group ends up with.
#[instrument(skip(db))]
pub async fn sync_role_groups(db: &PgPool) -> Result<Vec<(Role, usize)>, AppError> {
    let mut tx = db.begin().await?;
    let mut summary = Vec::with_capacity(Role::ALL.len());

    for role in Role::ALL {
        sqlx::query(
            "INSERT INTO groups (id, name) VALUES ($1, $2)
             ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name",
        )
        .bind(role.group_id())
        .bind(role.group_name())
        .execute(&mut *tx)
        .await?;

        let capabilities: Vec<String> = role.capabilities().iter().map(|c| c.to_string()).collect();

        sqlx::query(
            "DELETE FROM group_capabilities
             WHERE group_id = $1 AND NOT (capability = ANY($2))",
        )
        .bind(role.group_id())
        .bind(&capabilities)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO group_capabilities (group_id, capability)
             SELECT $1, UNNEST($2::text[])
             ON CONFLICT (group_id, capability) DO NOTHING",
        )
        .bind(role.group_id())
        .bind(&capabilities)
        .execute(&mut *tx)
        .await?;

        info!(
            group = role.group_name(),
            capabilities = capabilities.len(),
            "Synchronised role group"
        );
        summary.push((role, capabilities.len()));
    }

    tx.commit().await?;
    Ok(summary)
}

//! Role group membership.
//!
//! The identity store owns membership; this module only defines what it must
//! offer and the single operation that moves a caller between roles.

use anyhow::anyhow;
use metrics::counter;
use schoolgate_core::AppError;
use schoolgate_models::{Role, UserId};
use std::collections::{BTreeSet, HashMap};
use std::future::Future;
use std::sync::RwLock;
use tracing::{info, instrument, warn};

/// Storage of role group membership.
///
/// `replace_role` must remove the caller from every role group and add it to
/// `role` as one atomic unit, so no reader ever sees the caller without a role.
/// It sets the administrator flag when `role` grants it and leaves it alone
/// otherwise.
pub trait GroupStore: Send + Sync {
    fn replace_role(
        &self,
        user: UserId,
        role: Role,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    fn roles_of(
        &self,
        user: UserId,
    ) -> impl Future<Output = Result<BTreeSet<Role>, AppError>> + Send;

    fn is_administrator(&self, user: UserId)
    -> impl Future<Output = Result<bool, AppError>> + Send;
}

/// Moves `user` into the role named by `tag`.
///
/// Returns `Ok(false)` without touching the store when the tag is not one of
/// the four role tags.
#[instrument(skip(store))]
pub async fn assign_role<S: GroupStore + ?Sized>(
    store: &S,
    user: UserId,
    tag: &str,
) -> Result<bool, AppError> {
    let Ok(role) = tag.parse::<Role>() else {
        warn!(%user, tag, "Rejected unrecognized role tag");
        return Ok(false);
    };

    store.replace_role(user, role).await?;

    counter!("role_assignments_total", "role" => role.tag()).increment(1);
    info!(%user, role = %role, "Role assigned");
    Ok(true)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Membership {
    pub groups: BTreeSet<Role>,
    pub is_administrator: bool,
}

/// Process-local store for tests and tooling.
#[derive(Debug, Default)]
pub struct InMemoryGroupStore {
    members: RwLock<HashMap<UserId, Membership>>,
}

impl InMemoryGroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts a user in an arbitrary state, bypassing the exclusivity rule.
    pub fn seed(&self, user: UserId, membership: Membership) -> Result<(), AppError> {
        self.members
            .write()
            .map_err(|_| AppError::internal(anyhow!("Group store lock poisoned")))?
            .insert(user, membership);
        Ok(())
    }

    pub fn membership(&self, user: UserId) -> Result<Membership, AppError> {
        let members = self
            .members
            .read()
            .map_err(|_| AppError::internal(anyhow!("Group store lock poisoned")))?;
        Ok(members.get(&user).cloned().unwrap_or_default())
    }
}

impl GroupStore for InMemoryGroupStore {
    async fn replace_role(&self, user: UserId, role: Role) -> Result<(), AppError> {
        let mut members = self
            .members
            .write()
            .map_err(|_| AppError::internal(anyhow!("Group store lock poisoned")))?;
        let membership = members.entry(user).or_default();
        membership.groups = BTreeSet::from([role]);
        if role.grants_administrator_flag() {
            membership.is_administrator = true;
        }
        Ok(())
    }

    async fn roles_of(&self, user: UserId) -> Result<BTreeSet<Role>, AppError> {
        Ok(self.membership(user)?.groups)
    }

    async fn is_administrator(&self, user: UserId) -> Result<bool, AppError> {
        Ok(self.membership(user)?.is_administrator)
    }
}

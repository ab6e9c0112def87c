use metrics::counter;
use schoolgate_config::AuthzConfig;
use schoolgate_core::AppError;
use tracing::{debug, instrument};

use crate::graph::RelationshipGraph;
use crate::identity::IdentityContext;
use crate::resource::{Action, Protected, ResourceKind, Target};
use crate::rules;
use crate::scope;

/// Entry point for the dispatch layer.
///
/// Borrows the relationship graph for the lifetime of a request and evaluates
/// the rule table against it. Every check is a pure read of the graph.
pub struct Authorizer<'g, G: RelationshipGraph + ?Sized> {
    graph: &'g G,
    config: AuthzConfig,
}

impl<'g, G: RelationshipGraph + ?Sized> Authorizer<'g, G> {
    pub fn new(graph: &'g G, config: AuthzConfig) -> Self {
        Self { graph, config }
    }

    pub fn config(&self) -> &AuthzConfig {
        &self.config
    }

    #[instrument(skip(self, identity), fields(user = ?identity.user_id))]
    pub fn permits(&self, identity: &IdentityContext, kind: ResourceKind, action: Action) -> bool {
        let allowed = rules::permits(identity, kind, action);
        self.record(kind, action, allowed);
        allowed
    }

    #[instrument(skip(self, identity, target), fields(user = ?identity.user_id))]
    pub fn permits_on(
        &self,
        identity: &IdentityContext,
        kind: ResourceKind,
        action: Action,
        target: Target<'_>,
    ) -> bool {
        let allowed = rules::permits_on(
            self.graph,
            &self.config.scope,
            identity,
            kind,
            action,
            target,
        );
        self.record(kind, action, allowed);
        allowed
    }

    /// See [`scope::filter_collection`].
    #[instrument(skip_all, fields(resource = %T::KIND, candidates = candidates.len()))]
    pub fn filter_collection<'r, T: Protected>(
        &self,
        identity: &IdentityContext,
        candidates: &'r [T],
    ) -> Vec<&'r T> {
        let visible =
            scope::filter_collection(self.graph, &self.config.scope, identity, candidates);
        debug!(visible = visible.len(), "Filtered collection");
        visible
    }

    /// Coarse check as a `Result`: 401 for anonymous callers, 403 on deny.
    pub fn authorize(
        &self,
        identity: &IdentityContext,
        kind: ResourceKind,
        action: Action,
    ) -> Result<(), AppError> {
        require_session(identity)?;
        if self.permits(identity, kind, action) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Not allowed to {} {} records",
                action, kind
            )))
        }
    }

    /// Fine check as a `Result`: 401 for anonymous callers, 403 on deny.
    pub fn authorize_on<T: Protected>(
        &self,
        identity: &IdentityContext,
        action: Action,
        record: &T,
    ) -> Result<(), AppError> {
        require_session(identity)?;
        if self.permits_on(identity, T::KIND, action, record.as_target()) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Not allowed to {} this {} record",
                action,
                T::KIND
            )))
        }
    }

    fn record(&self, kind: ResourceKind, action: Action, allowed: bool) {
        if !allowed {
            debug!(resource = %kind, action = %action, "Access denied");
        }
        if self.config.record_metrics {
            let outcome = if allowed { "allow" } else { "deny" };
            counter!(
                "authz_decisions_total",
                "resource" => kind.as_str(),
                "action" => action.as_str(),
                "outcome" => outcome
            )
            .increment(1);
        }
    }
}

fn require_session(identity: &IdentityContext) -> Result<(), AppError> {
    if identity.is_authenticated {
        Ok(())
    } else {
        Err(AppError::unauthorized("Authentication required".to_string()))
    }
}

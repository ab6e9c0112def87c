//! Collection filtering for list-style access.

use schoolgate_config::ScopeConfig;

use crate::graph::RelationshipGraph;
use crate::identity::{CallerKind, IdentityContext};
use crate::resolver::CallerScope;
use crate::resource::{Action, Protected};
use crate::rules::{Access, ReadRule, rule_for, scoped_target_allowed};

/// Narrows `candidates` to the records the caller may see, preserving order.
///
/// The caller's scope is resolved once for the whole collection. Records whose
/// anchor cannot be resolved are left out.
pub fn filter_collection<'r, G, T>(
    graph: &G,
    config: &ScopeConfig,
    identity: &IdentityContext,
    candidates: &'r [T],
) -> Vec<&'r T>
where
    G: RelationshipGraph + ?Sized,
    T: Protected,
{
    match identity.caller_kind() {
        CallerKind::Anonymous => return Vec::new(),
        CallerKind::Administrator => return candidates.iter().collect(),
        _ => {}
    }
    if rule_for(T::KIND).read == ReadRule::Authenticated {
        return candidates.iter().collect();
    }

    let scope = CallerScope::resolve(graph, identity, config);
    if scope == CallerScope::Empty {
        return Vec::new();
    }
    candidates
        .iter()
        .filter(|record| {
            scoped_target_allowed(graph, &scope, Action::Read, record.as_target(), Access::Listing)
        })
        .collect()
}

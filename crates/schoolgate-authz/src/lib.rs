//! # Schoolgate Authz
//!
//! Role and relationship based authorization for school records.
//!
//! This crate provides:
//!
//! - [`identity`]: The per-request Identity Context
//! - [`resource`]: Resource kinds, actions, and borrowed targets
//! - [`graph`]: The relationship graph trait and an in-memory directory
//! - [`resolver`]: Teacher scope and student anchor resolution
//! - [`rules`]: The rule table with coarse and fine checks
//! - [`scope`]: Collection filtering
//! - [`groups`]: Role group membership and assignment
//! - [`engine`]: [`Authorizer`], the facade used by the dispatch layer
//!
//! # Decision Order
//!
//! Anonymous callers are denied everything. Administrators are allowed
//! everything. Everyone else passes the coarse role check first; when a target
//! is supplied, the relationship check runs on top and falls through to deny.
//!
//! # Example
//!
//! ```ignore
//! use schoolgate_authz::{Action, Authorizer, IdentityContext, SchoolDirectory};
//! use schoolgate_config::AuthzConfig;
//!
//! let directory = SchoolDirectory::new();
//! let authorizer = Authorizer::new(&directory, AuthzConfig::from_env());
//!
//! authorizer.authorize_on(&identity, Action::Write, &grade)?;
//! let visible = authorizer.filter_collection(&identity, &students);
//! ```

pub mod engine;
pub mod graph;
pub mod groups;
pub mod identity;
pub mod resolver;
pub mod resource;
pub mod rules;
pub mod scope;

// Re-export commonly used types at crate root
pub use engine::Authorizer;
pub use graph::{RelationshipGraph, SchoolDirectory};
pub use groups::{GroupStore, InMemoryGroupStore, Membership, assign_role};
pub use identity::{CallerKind, IdentityContext};
pub use resolver::{resolve_student_anchor, resolve_teacher_scope};
pub use resource::{Action, Protected, ResourceKind, Target};
pub use rules::{permits, permits_on};
pub use scope::filter_collection;

//! Request-level checks for axum handlers.
//!
//! Handlers know the HTTP method and the resource they serve. These helpers
//! turn the method into an [`Action`] and return an [`AppError`] that renders
//! as 401 or 403.
//!
//! # Example
//!
//! ```rust,ignore
//! async fn update_grade(
//!     method: Method,
//!     Extension(identity): Extension<IdentityContext>,
//!     State(state): State<AppState>,
//!     Path(id): Path<GradeId>,
//! ) -> Result<Json<Grade>, AppError> {
//!     let grade = state.grades.get(id).await?;
//!     guard::require_on(&state.authorizer(), &identity, &method, &grade)?;
//!     // ...
//! }
//! ```

use axum::http::Method;

use crate::{
    Action, AppError, Authorizer, IdentityContext, Protected, RelationshipGraph, ResourceKind,
};

/// Coarse check for list and create endpoints.
pub fn require<G: RelationshipGraph + ?Sized>(
    authorizer: &Authorizer<'_, G>,
    identity: &IdentityContext,
    method: &Method,
    kind: ResourceKind,
) -> Result<(), AppError> {
    authorizer.authorize(identity, kind, Action::from_method(method))
}

/// Fine check for endpoints addressing one record.
pub fn require_on<G: RelationshipGraph + ?Sized, T: Protected>(
    authorizer: &Authorizer<'_, G>,
    identity: &IdentityContext,
    method: &Method,
    record: &T,
) -> Result<(), AppError> {
    authorizer.authorize_on(identity, Action::from_method(method), record)
}

/// Filters a listing for a GET endpoint.
///
/// Anonymous callers get 401 instead of an empty page.
pub fn visible<'r, G: RelationshipGraph + ?Sized, T: Protected>(
    authorizer: &Authorizer<'_, G>,
    identity: &IdentityContext,
    records: &'r [T],
) -> Result<Vec<&'r T>, AppError> {
    authorizer.authorize(identity, T::KIND, Action::Read)?;
    Ok(authorizer.filter_collection(identity, records))
}

use crate::dependency_analysis::domain::{ClosureUnion, ResolvedCoordinate, Scope};
use std::collections::BTreeMap;

/// Decides whether a direct dependency is already supplied transitively.
pub struct RedundancyDetector;

impl RedundancyDetector {
    /// Closures that cover `scope`: its own bucket plus every broader scope's bucket.
    pub fn covering_closures<'a>(
        scope: &'a Scope,
        closures_by_scope: &'a BTreeMap<String, ClosureUnion>,
    ) -> impl Iterator<Item = &'a ClosureUnion> {
        std::iter::once(scope)
            .chain(scope.broader_scopes())
            .filter_map(move |s| closures_by_scope.get(&s.bucket()))
    }

    /// True iff the exact `group:artifact:version` appears in a covering closure.
    /// A differently pinned version is a deliberate override and never redundant.
    pub fn is_redundant(
        dependency: &ResolvedCoordinate,
        scope: &Scope,
        closures_by_scope: &BTreeMap<String, ClosureUnion>,
    ) -> bool {
        Self::covering_closures(scope, closures_by_scope)
            .any(|closure| closure.contains(dependency))
    }
}

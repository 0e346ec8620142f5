use super::coordinate::{Coordinate, ResolvedCoordinate};
use super::dependency_node::DependencyNode;
use std::collections::{BTreeMap, BTreeSet};

/// Every coordinate reachable from a root, one version per `group:artifact`.
///
/// Built once from a resolved tree and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Closure {
    entries: BTreeMap<Coordinate, ResolvedCoordinate>,
}

impl Closure {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Flattens a forest depth-first. The first version seen for a coordinate wins,
    /// and a coordinate is recorded before its children are visited.
    pub fn from_nodes(nodes: &[DependencyNode]) -> Self {
        let mut entries = BTreeMap::new();
        for node in nodes {
            flatten(node, &mut entries);
        }
        Self { entries }
    }

    pub fn get(&self, coordinate: &Coordinate) -> Option<&ResolvedCoordinate> {
        self.entries.get(coordinate)
    }

    /// Exact `group:artifact:version` membership.
    pub fn contains(&self, resolved: &ResolvedCoordinate) -> bool {
        self.entries
            .get(&resolved.coordinate())
            .is_some_and(|found| found.version == resolved.version)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedCoordinate> {
        self.entries.values()
    }

    pub fn into_set(self) -> BTreeSet<ResolvedCoordinate> {
        self.entries.into_values().collect()
    }
}

fn flatten(node: &DependencyNode, entries: &mut BTreeMap<Coordinate, ResolvedCoordinate>) {
    let key = node.coordinate.coordinate();
    if entries.contains_key(&key) {
        return;
    }
    entries.insert(key, node.coordinate.clone());
    for child in &node.children {
        flatten(child, entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(artifact: &str, version: &str) -> DependencyNode {
        DependencyNode::new(ResolvedCoordinate::new("g", artifact, version), 0)
    }

    #[test]
    fn test_flatten_collects_all_levels() {
        let tree = leaf("databind", "2.17.0").with_children(vec![
            leaf("core", "2.17.0"),
            leaf("annotations", "2.17.0").with_children(vec![leaf("bom", "2.17.0")]),
        ]);
        let closure = Closure::from_nodes(&[tree]);
        assert_eq!(closure.len(), 4);
        assert!(closure.contains(&ResolvedCoordinate::new("g", "bom", "2.17.0")));
    }

    #[test]
    fn test_first_version_wins() {
        let forest = vec![
            leaf("a", "1.0").with_children(vec![leaf("core", "2.16.0")]),
            leaf("core", "2.17.0"),
        ];
        let closure = Closure::from_nodes(&forest);
        assert_eq!(
            closure.get(&Coordinate::new("g", "core")).map(|c| c.version.as_str()),
            Some("2.16.0")
        );
        assert!(!closure.contains(&ResolvedCoordinate::new("g", "core", "2.17.0")));
    }

    #[test]
    fn test_repeated_coordinate_is_not_revisited() {
        let inner = leaf("b", "1.0").with_children(vec![leaf("c", "1.0")]);
        let forest = vec![
            leaf("a", "1.0").with_children(vec![inner.clone()]),
            inner.with_children(vec![leaf("never", "1.0")]),
        ];
        let closure = Closure::from_nodes(&forest);
        assert!(!closure.contains(&ResolvedCoordinate::new("g", "never", "1.0")));
        assert_eq!(closure.len(), 3);
    }

    #[test]
    fn test_empty_closure() {
        let closure = Closure::empty();
        assert!(closure.is_empty());
        assert!(closure.into_set().is_empty());
    }
}

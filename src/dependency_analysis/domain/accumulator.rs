use super::coordinate::{Coordinate, ResolvedCoordinate};
use super::version::VersionComparator;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Associative, commutative combination of scan results.
///
/// Every accumulator is built exclusively through `merge`, so the order in which
/// documents are scanned never changes the final state.
pub trait Merge {
    fn merge(&mut self, other: Self);
}

/// Union of the closures of every parent dependency in one scope bucket.
pub type ClosureUnion = BTreeSet<ResolvedCoordinate>;

impl<T: Ord> Merge for BTreeSet<T> {
    fn merge(&mut self, other: Self) {
        self.extend(other);
    }
}

impl<K: Ord, V: Merge + Default> Merge for BTreeMap<K, V> {
    fn merge(&mut self, other: Self) {
        for (key, value) in other {
            self.entry(key).or_default().merge(value);
        }
    }
}

/// Analyses that decide everything during rewrite carry no state.
impl Merge for () {
    fn merge(&mut self, _other: Self) {}
}

/// Per-project, per-scope buckets of mergeable values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectAccumulator<T> {
    projects: BTreeMap<String, BTreeMap<String, T>>,
}

impl<T> Default for ProjectAccumulator<T> {
    fn default() -> Self {
        Self {
            projects: BTreeMap::new(),
        }
    }
}

impl<T: Merge + Default> ProjectAccumulator<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge_into(&mut self, project: &str, bucket: &str, value: T) {
        self.projects
            .entry(project.to_string())
            .or_default()
            .entry(bucket.to_string())
            .or_default()
            .merge(value);
    }

    pub fn buckets(&self, project: &str) -> Option<&BTreeMap<String, T>> {
        self.projects.get(project)
    }

    pub fn get(&self, project: &str, bucket: &str) -> Option<&T> {
        self.projects.get(project)?.get(bucket)
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl<T: Merge + Default> Merge for ProjectAccumulator<T> {
    fn merge(&mut self, other: Self) {
        for (project, buckets) in other.projects {
            for (bucket, value) in buckets {
                self.merge_into(&project, &bucket, value);
            }
        }
    }
}

/// The lowest version seen for every coordinate.
///
/// Versions that the comparator considers equivalent (`1.01` and `1.1`) are
/// ordered by their raw text, so the minimum is unique and the merge commutes.
#[derive(Debug, Clone, Default)]
pub struct MinimumVersions {
    comparator: VersionComparator,
    entries: BTreeMap<Coordinate, ResolvedCoordinate>,
}

impl MinimumVersions {
    pub fn new(comparator: VersionComparator) -> Self {
        Self {
            comparator,
            entries: BTreeMap::new(),
        }
    }

    pub fn offer(&mut self, candidate: &ResolvedCoordinate) {
        let comparator = &self.comparator;
        match self.entries.get_mut(&candidate.coordinate()) {
            Some(current) => {
                if lower(comparator, candidate, current) {
                    *current = candidate.clone();
                }
            }
            None => {
                self.entries
                    .insert(candidate.coordinate(), candidate.clone());
            }
        }
    }

    pub fn get(&self, coordinate: &Coordinate) -> Option<&ResolvedCoordinate> {
        self.entries.get(coordinate)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedCoordinate> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The lowest version across every coordinate, compared by version alone.
    pub fn overall_minimum(&self) -> Option<&ResolvedCoordinate> {
        self.entries.values().reduce(|best, candidate| {
            if lower(&self.comparator, candidate, best) {
                candidate
            } else {
                best
            }
        })
    }

    /// Every coordinate whose minimum is the overall minimum version.
    pub fn at_overall_minimum(&self) -> Vec<&ResolvedCoordinate> {
        let Some(minimum) = self.overall_minimum() else {
            return Vec::new();
        };
        self.entries
            .values()
            .filter(|entry| entry.version == minimum.version)
            .collect()
    }
}

fn lower(comparator: &VersionComparator, a: &ResolvedCoordinate, b: &ResolvedCoordinate) -> bool {
    match comparator.compare(&a.version, &b.version) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => a.version < b.version,
    }
}

impl PartialEq for MinimumVersions {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for MinimumVersions {}

impl Merge for MinimumVersions {
    fn merge(&mut self, other: Self) {
        for candidate in other.entries.into_values() {
            self.offer(&candidate);
        }
    }
}

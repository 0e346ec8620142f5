use crate::dependency_analysis::domain::{
    Closure, Coordinate, DependencyDeclaration, DependencyNode, Repository, ResolvedCoordinate,
};
use crate::ports::outbound::PackageMetadataFetcher;
use crate::shared::Result;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Maximum depth of a resolved tree. Deeper levels are cut off with a warning.
pub const MAX_RESOLUTION_DEPTH: u32 = 100;

/// Default number of metadata fetches in flight per tree level
const DEFAULT_CONCURRENCY: usize = 8;

struct ArenaNode {
    coordinate: ResolvedCoordinate,
    depth: u32,
    children: Vec<usize>,
}

/// Resolves the transitive closure of a published artifact from its own metadata.
///
/// Trees are built breadth-first with nearest-declaration-wins: the first time a
/// `group:artifact` is reached fixes its version, later occurrences are omitted.
pub struct ClosureResolver<F> {
    fetcher: F,
    default_repository: Repository,
    extra_repositories: Vec<Repository>,
    concurrency: usize,
}

impl<F: PackageMetadataFetcher> ClosureResolver<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            default_repository: Repository::maven_central(),
            extra_repositories: Vec::new(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Repository appended when none of a project's repositories is Maven Central.
    pub fn with_default_repository(mut self, repository: Repository) -> Self {
        self.default_repository = repository;
        self
    }

    /// Repositories searched after every project's own repositories.
    pub fn with_extra_repositories(mut self, repositories: Vec<Repository>) -> Self {
        self.extra_repositories = repositories;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// `repositories` plus the extra repositories, then the default repository
    /// unless one of them already points at Maven Central.
    pub fn effective_repositories(&self, repositories: &[Repository]) -> Vec<Repository> {
        let mut effective = repositories.to_vec();
        for extra in &self.extra_repositories {
            if !effective
                .iter()
                .any(|r| r.normalized_uri() == extra.normalized_uri())
            {
                effective.push(extra.clone());
            }
        }
        if !effective.iter().any(Repository::is_maven_central) {
            effective.push(self.default_repository.clone());
        }
        effective
    }

    /// Closure of `root`, and whether it could be resolved at all.
    ///
    /// A failure to fetch the root yields an empty closure and `false`.
    pub async fn resolve(
        &self,
        root: &ResolvedCoordinate,
        repositories: &[Repository],
    ) -> (Closure, bool) {
        match self.resolve_tree(root, repositories).await {
            Ok(tree) => (Closure::from_nodes(&tree), true),
            Err(e) => {
                debug!("Could not resolve closure of {}: {:#}", root, e);
                (Closure::empty(), false)
            }
        }
    }

    /// Resolves several roots concurrently. Results keep the order of `roots`.
    pub async fn resolve_all(
        &self,
        roots: &[ResolvedCoordinate],
        repositories: &[Repository],
    ) -> Vec<(ResolvedCoordinate, Closure, bool)> {
        stream::iter(roots.to_vec())
            .map(|root| async move {
                let (closure, resolved) = self.resolve(&root, repositories).await;
                (root, closure, resolved)
            })
            .buffered(self.concurrency)
            .collect()
            .await
    }

    /// The dependency tree below `root` (root excluded).
    ///
    /// # Errors
    /// Returns an error only if the root's own metadata cannot be fetched. Failures
    /// further down leave the affected node without children.
    pub async fn resolve_tree(
        &self,
        root: &ResolvedCoordinate,
        repositories: &[Repository],
    ) -> Result<Vec<DependencyNode>> {
        let repositories = self.effective_repositories(repositories);
        let root_declarations = self
            .fetcher
            .fetch_dependencies(root, &repositories)
            .await?;

        let mut arena: Vec<ArenaNode> = Vec::new();
        let mut top_level: Vec<usize> = Vec::new();
        let mut selected: HashSet<Coordinate> = HashSet::new();
        let mut frontier: Vec<(Option<usize>, Vec<DependencyDeclaration>)> =
            vec![(None, root_declarations)];
        let mut depth = 0;

        loop {
            let mut expand = Vec::new();
            for (parent, declarations) in frontier.drain(..) {
                for declaration in declarations.into_iter().filter(DependencyDeclaration::is_inherited) {
                    if !selected.insert(declaration.coordinate.coordinate()) {
                        continue;
                    }
                    let index = arena.len();
                    arena.push(ArenaNode {
                        coordinate: declaration.coordinate,
                        depth,
                        children: Vec::new(),
                    });
                    match parent {
                        Some(parent) => arena[parent].children.push(index),
                        None => top_level.push(index),
                    }
                    expand.push(index);
                }
            }

            if expand.is_empty() {
                break;
            }
            if depth + 1 >= MAX_RESOLUTION_DEPTH {
                warn!(
                    "Maximum resolution depth ({}) reached below {}. Dependency tree may be incomplete.",
                    MAX_RESOLUTION_DEPTH, root
                );
                break;
            }

            let requests: Vec<(usize, ResolvedCoordinate)> = expand
                .iter()
                .map(|&index| (index, arena[index].coordinate.clone()))
                .collect();
            let repositories = &repositories;
            frontier = stream::iter(requests)
                .map(|(index, coordinate)| async move {
                    let declarations = match self
                        .fetcher
                        .fetch_dependencies(&coordinate, repositories)
                        .await
                    {
                        Ok(declarations) => declarations,
                        Err(e) => {
                            debug!("Treating {} as a leaf: {:#}", coordinate, e);
                            Vec::new()
                        }
                    };
                    (Some(index), declarations)
                })
                .buffered(self.concurrency)
                .collect()
                .await;
            depth += 1;
        }

        Ok(top_level
            .iter()
            .map(|&index| assemble(&arena, index))
            .collect())
    }
}

fn assemble(arena: &[ArenaNode], index: usize) -> DependencyNode {
    let node = &arena[index];
    DependencyNode::new(node.coordinate.clone(), node.depth).with_children(
        node.children
            .iter()
            .map(|&child| assemble(arena, child))
            .collect(),
    )
}

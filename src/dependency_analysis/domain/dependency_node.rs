use super::coordinate::ResolvedCoordinate;
use super::license::License;
use super::scope::Scope;
use serde::{Deserialize, Serialize};

/// A resolved dependency and the dependencies it brought in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyNode {
    #[serde(flatten)]
    pub coordinate: ResolvedCoordinate,
    #[serde(default)]
    pub direct: bool,
    #[serde(default)]
    pub depth: u32,
    /// Licenses declared by the artifact's own metadata.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub licenses: Vec<License>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DependencyNode>,
}

impl DependencyNode {
    pub fn new(coordinate: ResolvedCoordinate, depth: u32) -> Self {
        Self {
            coordinate,
            direct: depth == 0,
            depth,
            licenses: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_licenses(mut self, licenses: Vec<License>) -> Self {
        self.licenses = licenses;
        self
    }

    pub fn with_children(mut self, children: Vec<DependencyNode>) -> Self {
        self.children = children;
        self
    }

    /// Pre-order walk over this node and every descendant.
    pub fn iter(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Recomputes `depth` and `direct` from the position in the tree.
    pub fn renumber(&mut self, depth: u32) {
        self.depth = depth;
        self.direct = depth == 0;
        for child in &mut self.children {
            child.renumber(depth + 1);
        }
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a DependencyNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a DependencyNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Pre-order walk over a forest of resolved trees.
pub fn walk(nodes: &[DependencyNode]) -> impl Iterator<Item = &DependencyNode> {
    nodes.iter().flat_map(DependencyNode::iter)
}

/// One `<dependency>` entry of a published artifact's own metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyDeclaration {
    pub coordinate: ResolvedCoordinate,
    pub scope: Option<Scope>,
    pub optional: bool,
}

impl DependencyDeclaration {
    pub fn new(coordinate: ResolvedCoordinate) -> Self {
        Self {
            coordinate,
            scope: None,
            optional: false,
        }
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Whether a consumer of the declaring artifact inherits this dependency.
    pub fn is_inherited(&self) -> bool {
        !self.optional && self.scope.as_ref().map_or(true, Scope::is_transitive)
    }
}

//! Build graph node interface
//!
//! `BuildNode` is the narrow view of a build tool's node the collector
//! needs. `Target` replaces "a node or an arbitrarily nested list of nodes"
//! with an explicit tree.

use std::path::Path;

use crate::error::Result;

/// A file or composite target in a build dependency graph
pub trait BuildNode: Sized {
    /// Canonical absolute path (identity of the node within one traversal)
    fn abspath(&self) -> &Path;

    /// Build-root-relative path as written in the graph
    fn path(&self) -> &str;

    /// Whether the built artifact is present on disk
    fn exists(&self) -> bool;

    /// Source-tree counterpart, used when the built copy does not exist yet
    fn src_node(&self) -> Self;

    /// Dependency children found by the graph's scanner
    fn children(&self) -> Result<Vec<Target<Self>>>;
}

/// A single node or a nested group of targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target<N> {
    Leaf(N),
    Group(Vec<Target<N>>),
}

impl<N> Target<N> {
    pub fn leaf(node: N) -> Self {
        Target::Leaf(node)
    }

    pub fn group(items: impl IntoIterator<Item = Target<N>>) -> Self {
        Target::Group(items.into_iter().collect())
    }
}

impl<N> From<N> for Target<N> {
    fn from(node: N) -> Self {
        Target::Leaf(node)
    }
}

impl<N> From<Vec<N>> for Target<N> {
    fn from(nodes: Vec<N>) -> Self {
        Target::Group(nodes.into_iter().map(Target::Leaf).collect())
    }
}

impl<N> FromIterator<Target<N>> for Target<N> {
    fn from_iter<I: IntoIterator<Item = Target<N>>>(iter: I) -> Self {
        Target::Group(iter.into_iter().collect())
    }
}

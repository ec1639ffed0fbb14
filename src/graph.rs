//! In-memory build graph
//!
//! Nodes are identified by their build-root-relative path. A node's built
//! artifact lives under `build_dir`, its source-tree counterpart under
//! `source_dir`. Absolute paths (system headers) are used as they are.
//! Absolute paths are normalized lexically, so `inc/../a.h` and `a.h` are
//! the same node even before either exists on disk.

use std::path::{Component, Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::error::{Result, SrcTreeError};
use crate::manifest::Manifest;
use crate::node::{BuildNode, Target};

#[derive(Debug, Clone)]
pub struct BuildGraph {
    build_dir: PathBuf,
    source_dir: PathBuf,
    /// node path -> ordered child paths
    children: FxHashMap<String, Vec<String>>,
    /// Declaration order, for stable summaries
    order: Vec<String>,
    default_targets: Vec<String>,
}

impl BuildGraph {
    pub fn new(build_dir: impl Into<PathBuf>, source_dir: impl Into<PathBuf>) -> Self {
        Self {
            build_dir: build_dir.into(),
            source_dir: source_dir.into(),
            children: FxHashMap::default(),
            order: Vec::new(),
            default_targets: Vec::new(),
        }
    }

    pub fn from_manifest(manifest: &Manifest) -> Result<Self> {
        let mut graph = Self::new(&manifest.build_dir, &manifest.source_dir);
        for node in &manifest.nodes {
            graph.add_node(&node.path, node.children.iter().cloned())?;
        }
        graph.default_targets = manifest.targets.clone();
        Ok(graph)
    }

    /// Declare a composite node
    pub fn add_node(
        &mut self,
        path: &str,
        children: impl IntoIterator<Item = String>,
    ) -> Result<()> {
        if path.is_empty() {
            return Err(SrcTreeError::InvalidNode {
                reason: "node with empty path".to_string(),
            });
        }
        if self.children.contains_key(path) {
            return Err(SrcTreeError::DuplicateNode {
                path: path.to_string(),
            });
        }
        self.children
            .insert(path.to_string(), children.into_iter().collect());
        self.order.push(path.to_string());
        Ok(())
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    pub fn default_targets(&self) -> &[String] {
        &self.default_targets
    }

    #[inline]
    pub fn contains(&self, path: &str) -> bool {
        self.children.contains_key(path)
    }

    /// Handle for the built artifact at `path` (declared or not)
    pub fn node<'g>(&'g self, path: &'g str) -> GraphNode<'g> {
        GraphNode::new(self, path, false)
    }

    /// Resolve target names to a group of nodes
    ///
    /// An empty `names` falls back to the manifest's default targets.
    pub fn target<'g>(&'g self, names: &'g [String]) -> Result<Target<GraphNode<'g>>> {
        let names = if names.is_empty() {
            self.default_targets.as_slice()
        } else {
            names
        };
        if names.is_empty() {
            return Err(SrcTreeError::NoTargets);
        }

        names
            .iter()
            .map(|name| {
                if self.contains(name) {
                    Ok(Target::Leaf(self.node(name)))
                } else {
                    Err(SrcTreeError::UnknownTarget { name: name.clone() })
                }
            })
            .collect()
    }
}

/// A file or composite node inside a [`BuildGraph`]
#[derive(Debug, Clone)]
pub struct GraphNode<'g> {
    graph: &'g BuildGraph,
    path: &'g str,
    abspath: PathBuf,
}

impl<'g> GraphNode<'g> {
    fn new(graph: &'g BuildGraph, path: &'g str, in_source_tree: bool) -> Self {
        let root = if in_source_tree {
            &graph.source_dir
        } else {
            &graph.build_dir
        };
        Self {
            graph,
            path,
            abspath: normalize(&root.join(path)),
        }
    }
}

/// Drop `.` and fold `..` without touching the filesystem
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

impl BuildNode for GraphNode<'_> {
    fn abspath(&self) -> &Path {
        &self.abspath
    }

    fn path(&self) -> &str {
        self.path
    }

    fn exists(&self) -> bool {
        self.abspath.exists()
    }

    fn src_node(&self) -> Self {
        GraphNode::new(self.graph, self.path, true)
    }

    fn children(&self) -> Result<Vec<Target<Self>>> {
        let graph = self.graph;
        Ok(graph
            .children
            .get(self.path)
            .map(|children| {
                children
                    .iter()
                    .map(|child| Target::Leaf(GraphNode::new(graph, child, false)))
                    .collect()
            })
            .unwrap_or_default())
    }
}

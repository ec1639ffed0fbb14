//! Source-tree collector
//!
//! Walks a target's dependency graph depth-first (pre-order), visiting each
//! node once, and gathers the leaf files whose relative path matches a
//! `Classifier`. Everything that does not match is expanded through its
//! scanned children; nodes without children simply drop out.
//!
//! The walk uses an explicit stack of sibling iterators, so deep or cyclic
//! graphs neither overflow the call stack nor loop forever.

use std::path::PathBuf;

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::config::CollectConfig;
use crate::env::BuildEnv;
use crate::error::Result;
use crate::node::{BuildNode, Target};

/// Suffix predicate deciding which leaves are collected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    suffixes: Vec<String>,
    system_prefix: String,
}

impl Classifier {
    pub fn new(suffixes: Vec<String>, system_prefix: impl Into<String>) -> Self {
        Self {
            suffixes,
            system_prefix: system_prefix.into(),
        }
    }

    /// Header files only
    pub fn headers(config: &CollectConfig) -> Self {
        Self::new(config.header_suffixes.clone(), config.system_prefix.clone())
    }

    /// Source files and header files
    pub fn all_sources(config: &CollectConfig) -> Self {
        let suffixes = config
            .source_suffixes
            .iter()
            .chain(&config.header_suffixes)
            .cloned()
            .collect();
        Self::new(suffixes, config.system_prefix.clone())
    }

    /// Plain string tests on the relative path: no normalization, so a
    /// system file reached through another prefix is still collected.
    /// The prefix excludes source suffixes too, not only headers.
    pub fn matches(&self, path: &str) -> bool {
        self.suffixes.iter().any(|s| path.ends_with(s.as_str())) && !self.is_system(path)
    }

    fn is_system(&self, path: &str) -> bool {
        !self.system_prefix.is_empty() && path.starts_with(self.system_prefix.as_str())
    }
}

/// Collect the absolute paths of all reachable leaves matching `classifier`
///
/// Results are in discovery order and never contain a path twice. Errors
/// from `BuildNode::children` abort the walk unchanged.
pub fn collect<N: BuildNode>(target: Target<N>, classifier: &Classifier) -> Result<Vec<PathBuf>> {
    let mut visited: FxHashSet<PathBuf> = FxHashSet::default();
    let mut emitted: FxHashSet<PathBuf> = FxHashSet::default();
    let mut found: Vec<PathBuf> = Vec::new();

    debug!(classifier = ?classifier, "collecting files");

    let mut stack: Vec<std::vec::IntoIter<Target<N>>> = vec![vec![target].into_iter()];

    while let Some(siblings) = stack.last_mut() {
        let Some(item) = siblings.next() else {
            stack.pop();
            continue;
        };

        let node = match item {
            Target::Group(items) => {
                stack.push(items.into_iter());
                continue;
            }
            Target::Leaf(node) => node,
        };

        if !visited.insert(node.abspath().to_path_buf()) {
            trace!(path = %node.abspath().display(), "already visited");
            continue;
        }

        if classifier.matches(node.path()) {
            let resolved = if node.exists() {
                node
            } else {
                node.src_node()
            };
            let path = resolved.abspath().to_path_buf();
            trace!(path = %path.display(), "collected");
            if emitted.insert(path.clone()) {
                found.push(path);
            }
        } else {
            let children = node.children()?;
            trace!(path = node.path(), children = children.len(), "expanding");
            if !children.is_empty() {
                stack.push(children.into_iter());
            }
        }
    }

    debug!(visited = visited.len(), found = found.len(), "collection finished");
    Ok(found)
}

/// Header files reachable from `target`, system headers excluded
pub fn find_header_files<N: BuildNode>(
    env: &BuildEnv,
    target: Target<N>,
) -> Result<Vec<PathBuf>> {
    collect(target, &Classifier::headers(env.config()))
}

/// Source and header files reachable from `target`, system files excluded
pub fn find_all_source_files<N: BuildNode>(
    env: &BuildEnv,
    target: Target<N>,
) -> Result<Vec<PathBuf>> {
    collect(target, &Classifier::all_sources(env.config()))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::{HashMap, HashSet};
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::error::SrcTreeError;

    /// In-memory graph: build root `/build`, source root `/src`
    #[derive(Default)]
    struct Mock {
        edges: HashMap<&'static str, Vec<&'static str>>,
        built: HashSet<&'static str>,
        broken: Option<&'static str>,
        expansions: Cell<usize>,
    }

    impl Mock {
        fn edge(mut self, from: &'static str, to: &[&'static str]) -> Self {
            self.edges.insert(from, to.to_vec());
            self
        }

        fn built(mut self, path: &'static str) -> Self {
            self.built.insert(path);
            self
        }

        fn node(&self, path: &'static str) -> MockNode<'_> {
            MockNode::new(self, path, false)
        }
    }

    #[derive(Debug, Clone)]
    struct MockNode<'a> {
        graph: &'a Mock,
        path: &'static str,
        abspath: PathBuf,
        source: bool,
    }

    impl std::fmt::Debug for Mock {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("Mock")
        }
    }

    impl<'a> MockNode<'a> {
        fn new(graph: &'a Mock, path: &'static str, source: bool) -> Self {
            let root = if source { "/src" } else { "/build" };
            let abspath = if path.starts_with('/') {
                PathBuf::from(path)
            } else {
                Path::new(root).join(path)
            };
            Self {
                graph,
                path,
                abspath,
                source,
            }
        }
    }

    impl BuildNode for MockNode<'_> {
        fn abspath(&self) -> &Path {
            &self.abspath
        }

        fn path(&self) -> &str {
            self.path
        }

        fn exists(&self) -> bool {
            self.source || self.graph.built.contains(self.path)
        }

        fn src_node(&self) -> Self {
            MockNode::new(self.graph, self.path, true)
        }

        fn children(&self) -> Result<Vec<Target<Self>>> {
            if self.graph.broken == Some(self.path) {
                return Err(SrcTreeError::InvalidNode {
                    reason: format!("cannot scan {}", self.path),
                });
            }
            let graph = self.graph;
            graph.expansions.set(graph.expansions.get() + 1);
            Ok(graph
                .edges
                .get(self.path)
                .map(|children| {
                    children
                        .iter()
                        .map(|c| Target::Leaf(graph.node(*c)))
                        .collect()
                })
                .unwrap_or_default())
        }
    }

    fn env() -> BuildEnv {
        BuildEnv::default()
    }

    fn paths(found: &[PathBuf]) -> Vec<&str> {
        found.iter().map(|p| p.to_str().unwrap()).collect()
    }

    // ─────────────────────────────────────────────────────────────
    // Classifier
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn classifier_headers_only() {
        let c = Classifier::headers(&CollectConfig::default());
        assert!(c.matches("include/util.h"));
        assert!(!c.matches("main.c"));
        assert!(!c.matches("/usr/include/stdio.h"));
    }

    #[test]
    fn classifier_all_sources() {
        let c = Classifier::all_sources(&CollectConfig::default());
        assert!(c.matches("main.c"));
        assert!(c.matches("util.h"));
        assert!(!c.matches("main.o"));
        assert!(!c.matches("/usr/lib/crt1.c"));
    }

    #[test]
    fn classifier_prefix_is_plain_string_test() {
        let c = Classifier::headers(&CollectConfig::default());
        // Same file reached without the literal prefix is not excluded
        assert!(c.matches("/./usr/include/stdio.h"));
        assert!(c.matches("../usr/include/stdio.h"));
        // Prefix match is not component-aware either
        assert!(!c.matches("/usrlocal/foo.h"));
    }

    #[test]
    fn classifier_empty_prefix_excludes_nothing() {
        let c = Classifier::new(vec![".h".to_string()], "");
        assert!(c.matches("/usr/include/stdio.h"));
    }

    // ─────────────────────────────────────────────────────────────
    // Traversal
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn diamond_is_deduplicated() {
        // [a.c, group{b.h, a.c}]
        let g = Mock::default().built("a.c").built("b.h");
        let target = || {
            Target::group([
                Target::leaf(g.node("a.c")),
                Target::group([Target::leaf(g.node("b.h")), Target::leaf(g.node("a.c"))]),
            ])
        };

        let all = find_all_source_files(&env(), target()).unwrap();
        assert_eq!(paths(&all), vec!["/build/a.c", "/build/b.h"]);

        let headers = find_header_files(&env(), target()).unwrap();
        assert_eq!(paths(&headers), vec!["/build/b.h"]);
    }

    #[test]
    fn shared_dependency_reached_twice_appears_once() {
        let g = Mock::default()
            .edge("app", &["x.o", "y.o"])
            .edge("x.o", &["x.c", "common.h"])
            .edge("y.o", &["y.c", "common.h"])
            .built("x.c")
            .built("y.c")
            .built("common.h");

        let all = find_all_source_files(&env(), Target::leaf(g.node("app"))).unwrap();
        assert_eq!(
            paths(&all),
            vec!["/build/x.c", "/build/common.h", "/build/y.c"]
        );
    }

    #[test]
    fn order_is_preorder_depth_first() {
        let g = Mock::default()
            .edge("app", &["a.o", "z.c"])
            .edge("a.o", &["a.c", "lib"])
            .edge("lib", &["l.h"])
            .built("a.c")
            .built("z.c")
            .built("l.h");

        let all = find_all_source_files(&env(), Target::leaf(g.node("app"))).unwrap();
        assert_eq!(paths(&all), vec!["/build/a.c", "/build/l.h", "/build/z.c"]);
    }

    #[test]
    fn cycle_terminates() {
        let g = Mock::default()
            .edge("a", &["b", "a.h"])
            .edge("b", &["a", "b.h"])
            .built("a.h")
            .built("b.h");

        let headers = find_header_files(&env(), Target::leaf(g.node("a"))).unwrap();
        assert_eq!(paths(&headers), vec!["/build/b.h", "/build/a.h"]);
        // each intermediate expanded exactly once
        assert_eq!(g.expansions.get(), 2);
    }

    #[test]
    fn self_loop_terminates() {
        let g = Mock::default().edge("a", &["a", "a.c"]).built("a.c");
        let all = find_all_source_files(&env(), Target::leaf(g.node("a"))).unwrap();
        assert_eq!(paths(&all), vec!["/build/a.c"]);
    }

    #[test]
    fn missing_artifact_falls_back_to_source_tree() {
        let g = Mock::default()
            .edge("app", &["gen.h", "main.c"])
            .built("main.c");

        let all = find_all_source_files(&env(), Target::leaf(g.node("app"))).unwrap();
        assert_eq!(paths(&all), vec!["/src/gen.h", "/build/main.c"]);
    }

    #[test]
    fn fallback_collisions_are_not_duplicated() {
        let g = Mock::default();
        let target = Target::group([
            Target::leaf(g.node("x.h")),
            Target::leaf(MockNode::new(&g, "x.h", true)),
        ]);
        let headers = find_header_files(&env(), target).unwrap();
        assert_eq!(paths(&headers), vec!["/src/x.h"]);
    }

    #[test]
    fn system_headers_are_excluded() {
        let g = Mock::default()
            .edge("main.o", &["main.c", "/usr/include/stdio.h", "util.h"])
            .edge("/usr/include/stdio.h", &["/usr/include/features.h"])
            .built("main.c")
            .built("util.h");

        let headers = find_header_files(&env(), Target::leaf(g.node("main.o"))).unwrap();
        assert_eq!(paths(&headers), vec!["/build/util.h"]);

        let all = find_all_source_files(&env(), Target::leaf(g.node("main.o"))).unwrap();
        assert!(all.iter().all(|p| !p.starts_with("/usr")));
    }

    #[test]
    fn system_sources_excluded_like_headers() {
        let g = Mock::default()
            .edge("app", &["/usr/share/stub.c", "app.c"])
            .built("app.c");

        let all = find_all_source_files(&env(), Target::leaf(g.node("app"))).unwrap();
        assert_eq!(paths(&all), vec!["/build/app.c"]);
    }

    #[test]
    fn nodes_without_children_are_dropped() {
        let g = Mock::default().edge("app", &["app.o", "README"]);
        let all = find_all_source_files(&env(), Target::leaf(g.node("app"))).unwrap();
        assert!(all.is_empty());
    }

    #[test]
    fn deeply_nested_groups_and_chains() {
        let g = Mock::default().built("deep.h");
        let mut target: Target<MockNode<'_>> = Target::group([]);
        for _ in 0..5_000 {
            target = Target::group([target]);
        }
        target = Target::group([target, Target::leaf(g.node("deep.h"))]);
        let headers = find_header_files(&env(), target).unwrap();
        assert_eq!(paths(&headers), vec!["/build/deep.h"]);
    }

    #[test]
    fn headers_subset_of_all_sources() {
        let g = Mock::default()
            .edge("app", &["a.o", "b.o", "/usr/include/x.h"])
            .edge("a.o", &["a.c", "a.h", "shared.h"])
            .edge("b.o", &["b.c", "shared.h", "gen.h"])
            .built("a.c")
            .built("a.h")
            .built("shared.h");

        let headers = find_header_files(&env(), Target::leaf(g.node("app"))).unwrap();
        let all = find_all_source_files(&env(), Target::leaf(g.node("app"))).unwrap();
        assert_eq!(headers.len(), 3);
        assert!(headers.iter().all(|h| all.contains(h)));
    }

    #[test]
    fn scan_errors_propagate() {
        let mut g = Mock::default().edge("app", &["a.o"]);
        g.broken = Some("a.o");
        let err = find_all_source_files(&env(), Target::leaf(g.node("app"))).unwrap_err();
        assert!(err.to_string().contains("cannot scan a.o"));
    }

    #[test]
    fn custom_suffixes() {
        let g = Mock::default()
            .edge("app", &["a.cpp", "a.hpp", "a.c"])
            .built("a.cpp")
            .built("a.hpp")
            .built("a.c");
        let env = BuildEnv::new(CollectConfig {
            header_suffixes: vec![".hpp".to_string()],
            source_suffixes: vec![".cpp".to_string()],
            ..Default::default()
        });

        let all = find_all_source_files(&env, Target::leaf(g.node("app"))).unwrap();
        assert_eq!(paths(&all), vec!["/build/a.cpp", "/build/a.hpp"]);
    }
}

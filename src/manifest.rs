//! Graph manifest (YAML)
//!
//! ```yaml
//! schema: srctree/graph@0.1
//! build_dir: build
//! source_dir: .
//! collect:
//!   header_suffixes: ['.h']
//! nodes:
//!   - path: app
//!     children: [main.o]
//!   - path: main.o
//!     children: [main.c, util.h]
//! targets: [app]
//! ```
//!
//! Paths not declared under `nodes:` are plain files without children.

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::Deserialize;
use tracing::debug;

use crate::config::CollectConfig;
use crate::error::{Result, SrcTreeError};
use crate::graph::normalize;

pub const SCHEMA_VERSION: &str = "srctree/graph@0.1";

#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub schema: String,

    /// Root of built artifacts, relative to the manifest
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,

    /// Root of the source tree, relative to the manifest
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    #[serde(default)]
    pub collect: CollectConfig,

    #[serde(default)]
    pub nodes: Vec<NodeDecl>,

    /// Targets used when none are given on the command line
    #[serde(default)]
    pub targets: Vec<String>,
}

/// A composite node and its scanned children
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NodeDecl {
    pub path: String,

    #[serde(default)]
    pub children: Vec<String>,
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("build")
}

fn default_source_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Manifest {
    /// Parse and validate; directories stay as written
    pub fn parse(yaml: &str) -> Result<Self> {
        let manifest: Manifest = serde_yaml::from_str(yaml)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Read a manifest file and anchor its directories at the file's location
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(SrcTreeError::ManifestNotFound {
                path: path.display().to_string(),
            });
        }

        let yaml = fs::read_to_string(path)?;
        let mut manifest = Self::parse(&yaml)?;

        let base = match path.parent() {
            Some(parent) if parent.is_absolute() => parent.to_path_buf(),
            Some(parent) => std::env::current_dir()?.join(parent),
            None => std::env::current_dir()?,
        };
        manifest.build_dir = normalize(&base.join(&manifest.build_dir));
        manifest.source_dir = normalize(&base.join(&manifest.source_dir));

        debug!(
            manifest = %path.display(),
            build_dir = %manifest.build_dir.display(),
            source_dir = %manifest.source_dir.display(),
            nodes = manifest.nodes.len(),
            "manifest loaded"
        );
        Ok(manifest)
    }

    pub fn validate(&self) -> Result<()> {
        if self.schema != SCHEMA_VERSION {
            return Err(SrcTreeError::InvalidSchemaVersion {
                version: self.schema.clone(),
            });
        }

        self.collect.validate()?;

        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for node in &self.nodes {
            if node.path.is_empty() {
                return Err(SrcTreeError::InvalidNode {
                    reason: "node with empty path".to_string(),
                });
            }
            if !seen.insert(node.path.as_str()) {
                return Err(SrcTreeError::DuplicateNode {
                    path: node.path.clone(),
                });
            }
            if node.children.iter().any(String::is_empty) {
                return Err(SrcTreeError::InvalidNode {
                    reason: format!("'{}' has a child with an empty path", node.path),
                });
            }
        }

        Ok(())
    }
}

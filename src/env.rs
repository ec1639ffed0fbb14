//! Build environment adapter
//!
//! Holds the collector settings a build environment carries. The collector
//! functions take it as an argument; the methods here are shorthands.

use std::path::PathBuf;

use crate::collect;
use crate::config::CollectConfig;
use crate::error::Result;
use crate::node::{BuildNode, Target};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildEnv {
    config: CollectConfig,
}

impl BuildEnv {
    pub fn new(config: CollectConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CollectConfig {
        &self.config
    }

    /// See [`collect::find_header_files`]
    pub fn find_header_files<N: BuildNode>(&self, target: Target<N>) -> Result<Vec<PathBuf>> {
        collect::find_header_files(self, target)
    }

    /// See [`collect::find_all_source_files`]
    pub fn find_all_source_files<N: BuildNode>(&self, target: Target<N>) -> Result<Vec<PathBuf>> {
        collect::find_all_source_files(self, target)
    }
}

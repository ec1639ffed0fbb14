//! srctree - collect source and header files reachable from build targets

pub mod collect;
pub mod config;
pub mod env;
pub mod error;
pub mod graph;
pub mod manifest;
pub mod node;
pub mod output;

pub use collect::{collect, find_all_source_files, find_header_files, Classifier};
pub use config::CollectConfig;
pub use env::BuildEnv;
pub use error::{FixSuggestion, Result, SrcTreeError};
pub use graph::{BuildGraph, GraphNode};
pub use manifest::Manifest;
pub use node::{BuildNode, Target};
pub use output::OutputFormat;

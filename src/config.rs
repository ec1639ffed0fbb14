//! Collector configuration
//!
//! Read from the `collect:` section of a graph manifest. Every field is
//! optional; missing fields fall back to the C toolchain defaults.

use serde::Deserialize;

use crate::error::{Result, SrcTreeError};

pub const DEFAULT_HEADER_SUFFIX: &str = ".h";
pub const DEFAULT_SOURCE_SUFFIX: &str = ".c";
pub const DEFAULT_SYSTEM_PREFIX: &str = "/usr";

/// Which files count as headers and sources, and which are system files
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CollectConfig {
    /// Suffixes of header files (`.h`)
    pub header_suffixes: Vec<String>,

    /// Suffixes of source files (`.c`)
    pub source_suffixes: Vec<String>,

    /// Relative paths starting with this string are never collected,
    /// sources as well as headers. Empty disables the exclusion.
    pub system_prefix: String,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            header_suffixes: vec![DEFAULT_HEADER_SUFFIX.to_string()],
            source_suffixes: vec![DEFAULT_SOURCE_SUFFIX.to_string()],
            system_prefix: DEFAULT_SYSTEM_PREFIX.to_string(),
        }
    }
}

impl CollectConfig {
    /// Reject configurations that could never match anything
    pub fn validate(&self) -> Result<()> {
        check_suffixes("header_suffixes", &self.header_suffixes)?;
        check_suffixes("source_suffixes", &self.source_suffixes)
    }

    /// Apply command-line overrides; empty overrides keep the current value
    pub fn with_overrides(
        mut self,
        header_suffixes: Vec<String>,
        source_suffixes: Vec<String>,
        system_prefix: Option<String>,
    ) -> Self {
        if !header_suffixes.is_empty() {
            self.header_suffixes = header_suffixes;
        }
        if !source_suffixes.is_empty() {
            self.source_suffixes = source_suffixes;
        }
        if let Some(prefix) = system_prefix {
            self.system_prefix = prefix;
        }
        self
    }
}

fn check_suffixes(field: &str, suffixes: &[String]) -> Result<()> {
    if suffixes.is_empty() {
        return Err(SrcTreeError::Config {
            reason: format!("{} is empty", field),
        });
    }
    if suffixes.iter().any(String::is_empty) {
        return Err(SrcTreeError::Config {
            reason: format!("{} contains an empty suffix", field),
        });
    }
    Ok(())
}

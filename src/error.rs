//! Error types with fix suggestions
//!
//! Error code ranges:
//! - SRC-000-009: Manifest errors
//! - SRC-010-019: Graph errors
//! - SRC-020-029: Configuration errors
//! - SRC-090-099: IO/serialization errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SrcTreeError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

#[derive(Error, Debug)]
pub enum SrcTreeError {
    // ─────────────────────────────────────────────────────────────
    // Manifest errors (SRC-000 to SRC-009)
    // ─────────────────────────────────────────────────────────────
    #[error("[SRC-001] Failed to parse manifest: {0}")]
    ManifestParse(#[from] serde_yaml::Error),

    #[error("[SRC-002] Invalid schema version: {version}")]
    InvalidSchemaVersion { version: String },

    #[error("[SRC-003] Manifest not found: {path}")]
    ManifestNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // Graph errors (SRC-010 to SRC-019)
    // ─────────────────────────────────────────────────────────────
    #[error("[SRC-010] Invalid node: {reason}")]
    InvalidNode { reason: String },

    #[error("[SRC-011] Node '{path}' is declared more than once")]
    DuplicateNode { path: String },

    #[error("[SRC-012] Unknown target '{name}'")]
    UnknownTarget { name: String },

    #[error("[SRC-013] No targets given and the manifest declares none")]
    NoTargets,

    // ─────────────────────────────────────────────────────────────
    // Configuration errors (SRC-020 to SRC-029)
    // ─────────────────────────────────────────────────────────────
    #[error("[SRC-020] Invalid collector configuration: {reason}")]
    Config { reason: String },

    // ─────────────────────────────────────────────────────────────
    // IO errors (SRC-090 to SRC-099)
    // ─────────────────────────────────────────────────────────────
    #[error("[SRC-090] IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("[SRC-091] JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FixSuggestion for SrcTreeError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            SrcTreeError::ManifestParse(_) => Some("Check YAML syntax: indentation and quoting"),
            SrcTreeError::InvalidSchemaVersion { .. } => {
                Some("Use 'srctree/graph@0.1' as the schema version")
            }
            SrcTreeError::ManifestNotFound { .. } => Some("Check the manifest path exists"),
            SrcTreeError::InvalidNode { .. } => Some("Every node and child needs a non-empty path"),
            SrcTreeError::DuplicateNode { .. } => {
                Some("Merge the children of both declarations into one node")
            }
            SrcTreeError::UnknownTarget { .. } => {
                Some("Declare the target under nodes: or pass an existing one with -t")
            }
            SrcTreeError::NoTargets => Some("Add a targets: list to the manifest or pass -t"),
            SrcTreeError::Config { .. } => Some("Suffix lists must be non-empty, e.g. ['.h']"),
            SrcTreeError::Io(_) => Some("Check file path and permissions"),
            SrcTreeError::Json(_) => None,
        }
    }
}

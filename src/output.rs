//! Rendering of collected paths

use std::path::PathBuf;

use clap::ValueEnum;

use crate::error::Result;

/// Output format for collected paths
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One path per line (default)
    #[default]
    Text,

    /// JSON array of strings
    Json,
}

/// Render paths in the requested format, without a trailing newline
pub fn render(paths: &[PathBuf], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => {
            let strings: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
            Ok(serde_json::to_string_pretty(&strings)?)
        }
    }
}

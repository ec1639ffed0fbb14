//! srctree CLI - list source and header files reachable from build targets

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use srctree::error::{FixSuggestion, Result};
use srctree::output::{self, OutputFormat};
use srctree::{BuildEnv, BuildGraph, Manifest};

#[derive(Parser)]
#[command(name = "srctree")]
#[command(about = "Collect source and header files reachable from build targets")]
#[command(version)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List header files reachable from the targets
    Headers(CollectArgs),

    /// List source and header files reachable from the targets
    Sources(CollectArgs),

    /// Validate a graph manifest (parse only)
    Validate {
        /// Path to the graph manifest
        manifest: PathBuf,
    },
}

#[derive(Args)]
struct CollectArgs {
    /// Path to the graph manifest
    manifest: PathBuf,

    /// Target to start from (repeatable; defaults to the manifest's targets)
    #[arg(short, long = "target")]
    targets: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Override header suffixes (repeatable)
    #[arg(long = "header-suffix")]
    header_suffixes: Vec<String>,

    /// Override source suffixes (repeatable)
    #[arg(long = "source-suffix")]
    source_suffixes: Vec<String>,

    /// Override the excluded system path prefix ("" disables exclusion)
    #[arg(long)]
    system_prefix: Option<String>,
}

#[derive(Clone, Copy)]
enum Collection {
    Headers,
    AllSources,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .init();

    let result = match cli.command {
        Commands::Headers(args) => run_collect(args, Collection::Headers),
        Commands::Sources(args) => run_collect(args, Collection::AllSources),
        Commands::Validate { manifest } => validate_manifest(&manifest),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn run_collect(args: CollectArgs, collection: Collection) -> Result<()> {
    let manifest = Manifest::load(&args.manifest)?;

    let config = manifest.collect.clone().with_overrides(
        args.header_suffixes,
        args.source_suffixes,
        args.system_prefix,
    );
    config.validate()?;
    let env = BuildEnv::new(config);

    let graph = BuildGraph::from_manifest(&manifest)?;
    let target = graph.target(&args.targets)?;

    let files = match collection {
        Collection::Headers => env.find_header_files(target)?,
        Collection::AllSources => env.find_all_source_files(target)?,
    };
    info!(count = files.len(), "files collected");

    let rendered = output::render(&files, args.format)?;
    if !rendered.is_empty() {
        println!("{}", rendered);
    }
    Ok(())
}

fn validate_manifest(path: &Path) -> Result<()> {
    let manifest = Manifest::load(path)?;
    let graph = BuildGraph::from_manifest(&manifest)?;

    // default targets must name declared nodes
    if !graph.default_targets().is_empty() {
        graph.target(&[])?;
    }

    println!("{} Manifest '{}' is valid", "✓".green(), path.display());
    println!("  Build dir: {}", graph.build_dir().display());
    println!("  Source dir: {}", graph.source_dir().display());
    println!("  Nodes: {}", graph.node_count());
    println!("  Targets: {}", graph.default_targets().len());

    Ok(())
}

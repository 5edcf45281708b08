//! CLI argument structures for the codecull binary.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use codecull_rs::LmTask;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Source-corpus curation for LM training data
#[derive(Parser)]
#[command(name = "codecull")]
#[command(version = VERSION)]
#[command(about = "Curate a deduplicated source-code corpus for LM training")]
#[command(long_about = "
Enumerate, filter and deduplicate source-code text files into a training
corpus, then hand the curated path list to your dataset loader.

Common usage:

  # Curate a tree with dedup and a stats summary
  codecull curate ./corpus --deduplicate --stats

  # Cache the filtered path list for faster re-runs
  codecull curate ./corpus --cache-output paths.json

  # Re-run from the cached snapshot (dedup still re-runs)
  codecull curate paths.json --deduplicate

  # Write the curated list to a file instead of stdout
  codecull curate ./corpus --out corpus.txt
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the curation pipeline over a directory or cached snapshot
    Curate(CurateArgs),

    /// Print default configuration in YAML format
    #[command(name = "print-default-config")]
    PrintDefaultConfig,

    /// Initialize a configuration file with defaults
    #[command(name = "init-config")]
    InitConfig(InitConfigArgs),

    /// Validate a codecull configuration file
    #[command(name = "validate-config")]
    ValidateConfig(ValidateConfigArgs),
}

/// Arguments for the curate command
#[derive(Args)]
pub struct CurateArgs {
    /// Root of the textual source data, or path to a cached path-set
    /// snapshot
    pub input: PathBuf,

    /// Load configuration from this YAML file (CLI flags override it)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Deduplicate the corpus by content fingerprint
    #[arg(long)]
    pub deduplicate: bool,

    /// Print corpus statistics (file count, LOC, size)
    #[arg(long)]
    pub stats: bool,

    /// Cache the filtered path list to this snapshot file
    #[arg(long)]
    pub cache_output: Option<PathBuf>,

    /// Maximum file size in bytes
    #[arg(long)]
    pub max_size_bytes: Option<u64>,

    /// Minimum whitespace-token count
    #[arg(long)]
    pub min_tokens: Option<usize>,

    /// Glob pattern files must match (repeatable)
    #[arg(long = "include")]
    pub include_patterns: Vec<String>,

    /// Glob pattern that excludes files (repeatable)
    #[arg(long = "exclude")]
    pub exclude_patterns: Vec<String>,

    /// Worker threads for per-file checks (0 = one per CPU)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Write the curated path list here instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// LM training objective the corpus is destined for (recorded in
    /// the summary; training itself happens downstream)
    #[arg(long, value_enum, default_value = "causal")]
    pub lm_task: LmTask,
}

/// Arguments for init-config
#[derive(Args)]
pub struct InitConfigArgs {
    /// Where to write the configuration file
    #[arg(short, long, default_value = "codecull.yml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for validate-config
#[derive(Args)]
pub struct ValidateConfigArgs {
    /// Configuration file to validate
    pub config: PathBuf,
}

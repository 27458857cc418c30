use anyhow::Context;
use clap::Parser;
use scour::{search, SearchConfig};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Concurrent, depth-bounded filesystem search.
///
/// Walks the tree below the root with a pool of worker threads and either
/// scans the named target files line by line for the pattern, or matches
/// the pattern against file and directory names (--names).
#[derive(Parser)]
#[command(name = "scour", author, version, about, long_about = None)]
struct Cli {
    /// Pattern to search for (case-insensitive regex)
    pattern: String,

    /// File names to scan in content mode (not needed with --names)
    files: Vec<String>,

    /// Invert the sense of matching, to select non-matching lines
    #[arg(short = 'v', long)]
    invert_match: bool,

    /// Prefix each output line with "Line N: "
    #[arg(short = 'n', long)]
    line_numbers: bool,

    /// Print the names of target files that contain no match
    #[arg(short = 'L', long)]
    files_without_match: bool,

    /// Match the pattern against file and directory names
    #[arg(short = 'f', long = "names")]
    names: bool,

    /// Maximum search depth below the root
    #[arg(short = 'd', long, default_value_t = 4)]
    max_depth: usize,

    /// Number of worker threads (default: CPU cores)
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,

    /// Root directory to start searching from
    #[arg(short = 'r', long, default_value = ".")]
    root: PathBuf,

    /// Print a summary of the run after the results
    #[arg(long)]
    stats: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix into the report stream.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = SearchConfig::new(cli.pattern, cli.root)
        .with_target_files(cli.files)
        .with_invert_match(cli.invert_match)
        .with_line_numbers(cli.line_numbers)
        .with_files_without_match(cli.files_without_match)
        .with_names_only(cli.names)
        .with_max_depth(cli.max_depth);
    if let Some(threads) = cli.threads {
        config = config.with_thread_count(threads);
    }

    config.validate()?;
    debug!(
        root = %config.root_path.display(),
        targets = config.target_files.len(),
        "configuration validated"
    );
    let summary = search(&config).context("search failed")?;

    if cli.stats {
        println!();
        println!("{}", summary);
    }
    Ok(())
}

use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use super::frontier::Frontier;
use super::matcher::PatternMatcher;
use super::scanner::FileScanner;
use super::worker::{WalkContext, Worker};
use crate::config::SearchConfig;
use crate::errors::SearchResult;
use crate::metrics::ScanMetrics;
use crate::output::OutputSink;
use crate::results::SearchSummary;

/// Runs a search to completion, streaming reports to stdout.
///
/// See [`search_with_sink`] for the variant that takes an explicit sink.
pub fn search(config: &SearchConfig) -> SearchResult<SearchSummary> {
    search_with_sink(config, OutputSink::stdout())
}

/// Runs a search to completion, streaming reports to the given sink.
///
/// Compiles the pattern and canonicalizes the root up front — both fail
/// fast, before any worker starts. The worker pool is fixed-size, spawned
/// once, and joined here; the traversal always runs until every worker
/// terminates naturally.
///
/// The configuration is assumed well-formed: callers enforce flag
/// legality with [`SearchConfig::validate`] at the boundary.
pub fn search_with_sink(config: &SearchConfig, sink: OutputSink) -> SearchResult<SearchSummary> {
    let started = Instant::now();
    info!(
        pattern = %config.pattern,
        root = %config.root_path.display(),
        threads = config.thread_count.get(),
        max_depth = config.max_depth,
        "starting search"
    );

    let matcher = PatternMatcher::new(&config.pattern)?;
    let metrics = ScanMetrics::new();
    let scanner = FileScanner::new(matcher.clone(), config, metrics.clone());

    let root = config.root_path.canonicalize()?;
    let frontier = Arc::new(Frontier::new());
    frontier.seed(root);

    let ctx = Arc::new(WalkContext {
        frontier,
        matcher,
        scanner,
        sink,
        metrics: metrics.clone(),
        names_only: config.names_only,
        files_without_match: config.files_without_match,
        max_depth: config.max_depth,
        target_files: config.target_files.iter().cloned().collect(),
    });

    let thread_count = config.thread_count.get();
    let mut workers = Vec::with_capacity(thread_count);
    for id in 0..thread_count {
        workers.push(Worker::spawn(id, Arc::clone(&ctx))?);
    }
    for worker in workers {
        worker.join()?;
    }

    metrics.log_stats();
    let summary = SearchSummary::new(metrics.stats(), started.elapsed());
    info!(
        dirs = summary.dirs_expanded,
        files = summary.files_scanned,
        matches = summary.total_matches(),
        elapsed = %humantime::format_duration(summary.elapsed),
        "search complete"
    );

    Ok(summary)
}

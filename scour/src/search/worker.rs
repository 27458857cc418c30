use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, trace};

use super::frontier::{Frontier, WorkItem};
use super::matcher::PatternMatcher;
use super::scanner::{FileScanner, MatchOutcome};
use crate::errors::{SearchError, SearchResult};
use crate::metrics::ScanMetrics;
use crate::output::OutputSink;

/// Everything a worker needs, published once behind an `Arc` before the
/// pool starts and never mutated afterwards.
#[derive(Debug)]
pub struct WalkContext {
    pub frontier: Arc<Frontier>,
    pub matcher: PatternMatcher,
    pub scanner: FileScanner,
    pub sink: OutputSink,
    pub metrics: ScanMetrics,
    pub names_only: bool,
    pub files_without_match: bool,
    pub max_depth: usize,
    pub target_files: HashSet<String>,
}

/// A worker thread in the traversal pool
pub struct Worker {
    id: usize,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    /// Spawns a named worker thread running the expansion loop
    pub fn spawn(id: usize, ctx: Arc<WalkContext>) -> SearchResult<Self> {
        let handle = thread::Builder::new()
            .name(format!("scour-worker-{}", id))
            .spawn(move || worker_loop(id, ctx))?;

        Ok(Self {
            id,
            handle: Some(handle),
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Waits for the worker to finish
    pub fn join(mut self) -> SearchResult<()> {
        if let Some(handle) = self.handle.take() {
            handle
                .join()
                .map_err(|_| SearchError::worker_panicked(self.id))?;
        }
        Ok(())
    }
}

/// Main worker loop: acquire one pending directory, expand it, repeat until
/// the frontier reports termination.
fn worker_loop(id: usize, ctx: Arc<WalkContext>) {
    debug!(worker = id, "worker starting");

    while let Some(expansion) = ctx.frontier.acquire() {
        let item = expansion.item();

        // Depth is enforced here, at expansion time: an item at the bound
        // is skipped and the loop continues with the next one.
        if item.depth >= ctx.max_depth {
            ctx.metrics.record_dir_skipped();
            trace!(
                worker = id,
                path = %item.path.display(),
                depth = item.depth,
                "at depth bound, not expanding"
            );
            continue;
        }

        if let Err(e) = expand_directory(&ctx, item) {
            // Best effort: one inaccessible directory never aborts the
            // search. The remainder of this listing is abandoned.
            ctx.metrics.record_dir_unreadable();
            debug!(
                worker = id,
                path = %item.path.display(),
                error = %e,
                "directory skipped"
            );
        }
    }

    debug!(worker = id, "worker finished");
}

/// Lists one directory's immediate entries, pushing new subdirectories into
/// the frontier and dispatching names or file contents to matching.
fn expand_directory(ctx: &WalkContext, item: &WorkItem) -> SearchResult<()> {
    ctx.metrics.record_dir_expanded();

    for entry in fs::read_dir(&item.path)
        .map_err(|e| SearchError::directory_unreadable(&item.path, e))?
    {
        let entry = entry.map_err(|e| SearchError::directory_unreadable(&item.path, e))?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();

        // `is_dir` follows symlinks; the canonical path is the dedup key, so
        // two routes to the same directory collapse to one work item.
        if path.is_dir() {
            let canonical = path
                .canonicalize()
                .map_err(|e| SearchError::directory_unreadable(&path, e))?;
            ctx.frontier.push_if_unvisited(canonical, item.depth + 1);

            if ctx.names_only {
                report_name_match(ctx, &name, &path);
            }
        } else if ctx.names_only {
            report_name_match(ctx, &name, &path);
        } else if ctx.target_files.contains(&name) {
            scan_target_file(ctx, &path, &name);
        }
    }

    Ok(())
}

fn report_name_match(ctx: &WalkContext, name: &str, path: &Path) {
    if ctx.matcher.is_match(name) {
        ctx.metrics.record_name_match();
        ctx.sink.name_match(name, path);
    }
}

/// Runs the content scan for one target file, emitting the header and the
/// files-without-match report around it as the mode requires.
fn scan_target_file(ctx: &WalkContext, path: &Path, name: &str) {
    if !ctx.files_without_match {
        ctx.sink.name_match(name, path);
    }

    let outcome = match ctx.scanner.scan_file(path, &ctx.sink) {
        Ok(outcome) => outcome,
        Err(e) => {
            // An unopenable file produces zero matches; the walk continues.
            ctx.metrics.record_file_unreadable();
            debug!(path = %path.display(), error = %e, "file skipped");
            MatchOutcome { had_match: false }
        }
    };

    if ctx.files_without_match && !outcome.had_match {
        ctx.sink.file_without_match(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn context(config: &SearchConfig, root: &Path) -> (Arc<WalkContext>, crate::output::CapturedOutput) {
        colored::control::set_override(false);
        let matcher = PatternMatcher::new(&config.pattern).unwrap();
        let metrics = ScanMetrics::new();
        let scanner = FileScanner::new(matcher.clone(), config, metrics.clone());
        let frontier = Arc::new(Frontier::new());
        frontier.seed(root.canonicalize().unwrap());
        let (sink, output) = OutputSink::capture();
        let ctx = Arc::new(WalkContext {
            frontier,
            matcher,
            scanner,
            sink,
            metrics,
            names_only: config.names_only,
            files_without_match: config.files_without_match,
            max_depth: config.max_depth,
            target_files: config.target_files.iter().cloned().collect(),
        });
        (ctx, output)
    }

    fn write_file(path: &Path, contents: &str) {
        let mut file = File::create(path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn test_content_mode_scans_only_target_files() {
        let dir = tempdir().unwrap();
        write_file(&dir.path().join("x.txt"), "foo\nbar\n");
        write_file(&dir.path().join("other.txt"), "foo everywhere\n");

        let config = SearchConfig::new("foo", dir.path())
            .with_target_files(vec!["x.txt".to_string()]);
        let (ctx, output) = context(&config, dir.path());
        worker_loop(0, Arc::clone(&ctx));

        let lines = output.lines();
        assert!(lines[0].starts_with("x.txt: "));
        assert_eq!(lines[1], "foo");
        assert_eq!(lines.len(), 2, "other.txt must not be scanned");
        assert_eq!(ctx.metrics.stats().files_scanned, 1);
    }

    #[test]
    fn test_names_mode_reports_files_and_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("foodir")).unwrap();
        write_file(&dir.path().join("foofile.txt"), "irrelevant\n");
        write_file(&dir.path().join("bar.txt"), "foo inside but name misses\n");

        let config = SearchConfig::new("foo", dir.path()).with_names_only(true);
        let (ctx, output) = context(&config, dir.path());
        worker_loop(0, Arc::clone(&ctx));

        let mut names: Vec<String> = output
            .lines()
            .iter()
            .map(|l| l.split(": ").next().unwrap().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["foodir", "foofile.txt"]);
        assert_eq!(ctx.metrics.stats().name_matches, 2);
    }

    #[test]
    fn test_files_without_match_reporting() {
        let dir = tempdir().unwrap();
        write_file(&dir.path().join("hit.txt"), "foo on line one\n");
        write_file(&dir.path().join("miss.txt"), "nothing here\n");

        let config = SearchConfig::new("foo", dir.path())
            .with_files_without_match(true)
            .with_target_files(vec!["hit.txt".to_string(), "miss.txt".to_string()]);
        let (ctx, output) = context(&config, dir.path());
        worker_loop(0, ctx);

        assert_eq!(output.lines(), vec!["miss.txt"]);
    }

    #[test]
    fn test_depth_bound_skips_item_but_not_worker() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("a");
        fs::create_dir(&sub).unwrap();
        fs::create_dir(dir.path().join("b")).unwrap();
        write_file(&sub.join("deep.txt"), "foo\n");

        let config = SearchConfig::new("foo", dir.path())
            .with_max_depth(1)
            .with_target_files(vec!["deep.txt".to_string()]);
        let (ctx, output) = context(&config, dir.path());
        worker_loop(0, Arc::clone(&ctx));

        // Both subdirectories are acquired and skipped at the bound; the
        // worker keeps looping instead of dying at the first one.
        let stats = ctx.metrics.stats();
        assert_eq!(stats.dirs_expanded, 1);
        assert_eq!(stats.dirs_skipped, 2);
        assert!(output.contents().is_empty());
    }

    #[test]
    fn test_missing_target_file_is_recovered() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone.txt");

        let config = SearchConfig::new("foo", dir.path())
            .with_target_files(vec!["gone.txt".to_string()]);
        let (ctx, output) = context(&config, dir.path());

        // Dispatch directly against a path that no longer exists.
        scan_target_file(&ctx, &path, "gone.txt");

        assert_eq!(ctx.metrics.stats().files_unreadable, 1);
        // Header was emitted before the open failed; no content followed.
        assert_eq!(output.lines(), vec![format!("gone.txt: {}", path.display())]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        write_file(&dir.path().join("x.txt"), "foo\n");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read_dir(&locked).is_ok() {
            // Running as root; permission bits are not enforced.
            return;
        }

        let config = SearchConfig::new("foo", dir.path())
            .with_target_files(vec!["x.txt".to_string()]);
        let (ctx, output) = context(&config, dir.path());
        worker_loop(0, Arc::clone(&ctx));

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(ctx.metrics.stats().dirs_unreadable, 1);
        // The sibling file was still found and scanned.
        assert!(output.contents().contains("foo"));
    }
}

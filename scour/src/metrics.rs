use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

/// Tracks traversal and scanning counters across all workers.
///
/// Cloning is cheap: the counters live behind `Arc`s, so every clone observes
/// the same totals. All updates use relaxed ordering; the counters are
/// read for reporting after the pool has been joined.
#[derive(Debug, Clone)]
pub struct ScanMetrics {
    // Traversal metrics
    dirs_expanded: Arc<AtomicU64>,
    dirs_skipped: Arc<AtomicU64>,
    dirs_unreadable: Arc<AtomicU64>,

    // Content scanning metrics
    files_scanned: Arc<AtomicU64>,
    files_unreadable: Arc<AtomicU64>,
    lines_scanned: Arc<AtomicU64>,
    lines_matched: Arc<AtomicU64>,

    // Name matching metrics
    name_matches: Arc<AtomicU64>,
}

impl ScanMetrics {
    /// Creates a new ScanMetrics instance with all counters at zero
    pub fn new() -> Self {
        Self {
            dirs_expanded: Arc::new(AtomicU64::new(0)),
            dirs_skipped: Arc::new(AtomicU64::new(0)),
            dirs_unreadable: Arc::new(AtomicU64::new(0)),
            files_scanned: Arc::new(AtomicU64::new(0)),
            files_unreadable: Arc::new(AtomicU64::new(0)),
            lines_scanned: Arc::new(AtomicU64::new(0)),
            lines_matched: Arc::new(AtomicU64::new(0)),
            name_matches: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Records a directory whose entries were listed
    pub fn record_dir_expanded(&self) {
        self.dirs_expanded.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a directory skipped because it sits at the depth bound
    pub fn record_dir_skipped(&self) {
        self.dirs_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a directory whose listing failed
    pub fn record_dir_unreadable(&self) {
        self.dirs_unreadable.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a file opened for content scanning
    pub fn record_file_scanned(&self) {
        self.files_scanned.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a target file that could not be opened
    pub fn record_file_unreadable(&self) {
        self.files_unreadable.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a line read during a content scan
    pub fn record_line_scanned(&self) {
        self.lines_scanned.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a line selected for output
    pub fn record_line_matched(&self) {
        self.lines_matched.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a file or directory name that matched the pattern
    pub fn record_name_match(&self) {
        self.name_matches.fetch_add(1, Ordering::Relaxed);
    }

    /// Gets a snapshot of the current counters
    pub fn stats(&self) -> ScanStats {
        ScanStats {
            dirs_expanded: self.dirs_expanded.load(Ordering::Relaxed),
            dirs_skipped: self.dirs_skipped.load(Ordering::Relaxed),
            dirs_unreadable: self.dirs_unreadable.load(Ordering::Relaxed),
            files_scanned: self.files_scanned.load(Ordering::Relaxed),
            files_unreadable: self.files_unreadable.load(Ordering::Relaxed),
            lines_scanned: self.lines_scanned.load(Ordering::Relaxed),
            lines_matched: self.lines_matched.load(Ordering::Relaxed),
            name_matches: self.name_matches.load(Ordering::Relaxed),
        }
    }

    /// Logs the current counters
    pub fn log_stats(&self) {
        let stats = self.stats();
        info!(
            "Traversal stats:\n\
             Directories expanded/skipped/unreadable: {}/{}/{}\n\
             Files scanned/unreadable: {}/{}\n\
             Lines scanned/matched: {}/{}\n\
             Name matches: {}",
            stats.dirs_expanded,
            stats.dirs_skipped,
            stats.dirs_unreadable,
            stats.files_scanned,
            stats.files_unreadable,
            stats.lines_scanned,
            stats.lines_matched,
            stats.name_matches
        );
    }
}

impl Default for ScanMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of the traversal and scanning counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub dirs_expanded: u64,
    pub dirs_skipped: u64,
    pub dirs_unreadable: u64,
    pub files_scanned: u64,
    pub files_unreadable: u64,
    pub lines_scanned: u64,
    pub lines_matched: u64,
    pub name_matches: u64,
}

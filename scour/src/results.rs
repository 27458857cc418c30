use std::fmt;
use std::time::Duration;

use crate::metrics::ScanStats;

/// Summary of a completed search run.
///
/// The report stream itself goes to the [`OutputSink`](crate::OutputSink) as
/// the traversal runs; the summary only carries the run-level counters and
/// the elapsed wall-clock time.
#[derive(Debug, Clone, Copy)]
pub struct SearchSummary {
    /// Directories whose entries were listed
    pub dirs_expanded: u64,
    /// Directories skipped at the depth bound
    pub dirs_skipped: u64,
    /// Directories whose listing failed
    pub dirs_unreadable: u64,
    /// Files opened for content scanning
    pub files_scanned: u64,
    /// Target files that could not be opened
    pub files_unreadable: u64,
    /// Lines read across all scanned files
    pub lines_scanned: u64,
    /// Lines selected for output
    pub lines_matched: u64,
    /// File and directory names that matched the pattern
    pub name_matches: u64,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl SearchSummary {
    /// Builds a summary from a final counter snapshot and the elapsed time
    pub fn new(stats: ScanStats, elapsed: Duration) -> Self {
        Self {
            dirs_expanded: stats.dirs_expanded,
            dirs_skipped: stats.dirs_skipped,
            dirs_unreadable: stats.dirs_unreadable,
            files_scanned: stats.files_scanned,
            files_unreadable: stats.files_unreadable,
            lines_scanned: stats.lines_scanned,
            lines_matched: stats.lines_matched,
            name_matches: stats.name_matches,
            elapsed,
        }
    }

    /// Total reports emitted to the sink (matched lines plus name matches)
    pub fn total_matches(&self) -> u64 {
        self.lines_matched + self.name_matches
    }
}

impl fmt::Display for SearchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Expanded {} directories ({} at depth bound, {} unreadable) in {}",
            self.dirs_expanded,
            self.dirs_skipped,
            self.dirs_unreadable,
            humantime::format_duration(self.elapsed)
        )?;
        write!(
            f,
            "Scanned {} files ({} unreadable): {} lines read, {} lines matched, {} name matches",
            self.files_scanned,
            self.files_unreadable,
            self.lines_scanned,
            self.lines_matched,
            self.name_matches
        )
    }
}

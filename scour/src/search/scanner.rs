use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{trace, warn};

use super::matcher::PatternMatcher;
use crate::config::SearchConfig;
use crate::errors::{SearchError, SearchResult};
use crate::metrics::ScanMetrics;
use crate::output::OutputSink;

const BUFFER_CAPACITY: usize = 65536;

/// Whether a scanned file contained at least one line matching the
/// un-inverted pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOutcome {
    pub had_match: bool,
}

/// Scans one file line by line against the pattern, emitting selected lines
/// to the shared sink.
#[derive(Debug, Clone)]
pub struct FileScanner {
    matcher: PatternMatcher,
    metrics: ScanMetrics,
    invert_match: bool,
    line_numbers: bool,
    files_without_match: bool,
}

impl FileScanner {
    /// Creates a scanner from the run configuration
    pub fn new(matcher: PatternMatcher, config: &SearchConfig, metrics: ScanMetrics) -> Self {
        Self {
            matcher,
            metrics,
            invert_match: config.invert_match,
            line_numbers: config.line_numbers,
            files_without_match: config.files_without_match,
        }
    }

    /// Scans the file at `path`, emitting each selected line to `sink`.
    ///
    /// A line is selected when it matches the pattern, or fails to match
    /// with invert mode on. In files-without-match mode the scan
    /// short-circuits at the first matching line: only existence matters,
    /// so the rest of the file is never read.
    ///
    /// Fails with `FileUnreadable` if the file cannot be opened; the caller
    /// treats that as zero matches and the walk continues. A read error in
    /// the middle of the file ends the scan there, returning the outcome
    /// accumulated so far.
    pub fn scan_file(&self, path: &Path, sink: &OutputSink) -> SearchResult<MatchOutcome> {
        trace!(path = %path.display(), "scanning file");

        let file =
            File::open(path).map_err(|e| SearchError::file_unreadable(path, e))?;
        self.metrics.record_file_scanned();

        let mut reader = BufReader::with_capacity(BUFFER_CAPACITY, file);
        let mut buf = Vec::new();
        let mut line_number = 0usize;
        let mut had_match = false;

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "read failed mid-scan");
                    break;
                }
            }

            line_number += 1;
            self.metrics.record_line_scanned();
            let line = decode_line(&buf);
            let matches = self.matcher.is_match(&line);

            if matches && !had_match {
                had_match = true;
                if self.files_without_match {
                    return Ok(MatchOutcome { had_match: true });
                }
            }

            if matches != self.invert_match {
                self.metrics.record_line_matched();
                let number = self.line_numbers.then_some(line_number);
                sink.scanned_line(&line, number);
            }
        }

        Ok(MatchOutcome { had_match })
    }
}

/// Decodes one raw line lossily, trimming the newline and any trailing `\r`
fn decode_line(bytes: &[u8]) -> String {
    let mut end = bytes.len();
    if end > 0 && bytes[end - 1] == b'\n' {
        end -= 1;
    }
    if end > 0 && bytes[end - 1] == b'\r' {
        end -= 1;
    }
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

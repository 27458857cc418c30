use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::errors::{SearchError, SearchResult};

/// Configuration for a search run.
///
/// Built once before the worker pool starts and shared read-only by all
/// workers; no field is ever mutated after construction, so no
/// synchronization is needed beyond the `Arc` that publishes it.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// The pattern to search for (case-insensitive regex)
    pub pattern: String,

    /// The root directory to start searching from
    pub root_path: PathBuf,

    /// File base names to scan in content mode (ignored in names mode)
    pub target_files: Vec<String>,

    /// Select non-matching lines instead of matching ones
    pub invert_match: bool,

    /// Prefix each output line with "Line N: "
    pub line_numbers: bool,

    /// Report only the names of target files with no matching line
    pub files_without_match: bool,

    /// Match the pattern against file and directory names instead of contents
    pub names_only: bool,

    /// Maximum traversal depth below the root
    pub max_depth: usize,

    /// Number of worker threads
    pub thread_count: NonZeroUsize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            pattern: String::new(),
            root_path: PathBuf::from("."),
            target_files: vec![],
            invert_match: false,
            line_numbers: false,
            files_without_match: false,
            names_only: false,
            max_depth: 4,
            thread_count: default_thread_count(),
        }
    }
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or_else(|| NonZeroUsize::new(1).unwrap())
}

impl SearchConfig {
    /// Creates a new configuration with the given pattern and root path
    pub fn new(pattern: impl Into<String>, root_path: impl Into<PathBuf>) -> Self {
        SearchConfig {
            pattern: pattern.into(),
            root_path: root_path.into(),
            ..Default::default()
        }
    }

    /// Builder method to set the target file names for content search
    pub fn with_target_files(mut self, files: Vec<String>) -> Self {
        self.target_files = files;
        self
    }

    /// Builder method to select non-matching lines
    pub fn with_invert_match(mut self, invert: bool) -> Self {
        self.invert_match = invert;
        self
    }

    /// Builder method to enable line-number prefixes
    pub fn with_line_numbers(mut self, line_numbers: bool) -> Self {
        self.line_numbers = line_numbers;
        self
    }

    /// Builder method to report only files without a match
    pub fn with_files_without_match(mut self, enabled: bool) -> Self {
        self.files_without_match = enabled;
        self
    }

    /// Builder method to match against file and directory names
    pub fn with_names_only(mut self, enabled: bool) -> Self {
        self.names_only = enabled;
        self
    }

    /// Builder method to set the maximum traversal depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Builder method to set the number of threads
    pub fn with_thread_count(mut self, count: NonZeroUsize) -> Self {
        self.thread_count = count;
        self
    }

    /// Checks the flag combination for legality.
    ///
    /// Callers must invoke this at the boundary, before any traversal work
    /// begins; the engine itself assumes a well-formed configuration and does
    /// not re-validate.
    pub fn validate(&self) -> SearchResult<()> {
        if self.names_only
            && (self.invert_match || self.line_numbers || self.files_without_match)
        {
            return Err(SearchError::conflicting_options(
                "--names cannot be combined with --invert-match, --line-numbers, \
                 or --files-without-match",
            ));
        }
        if self.files_without_match && (self.invert_match || self.line_numbers) {
            return Err(SearchError::conflicting_options(
                "--files-without-match cannot be combined with --invert-match \
                 or --line-numbers",
            ));
        }
        Ok(())
    }
}

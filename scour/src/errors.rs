/// This module defines custom error types for scour, demonstrating Rust's error handling
/// compared to .NET's exception system.
///
/// # Rust vs .NET Error Handling
///
/// .NET uses exceptions for error handling:
/// ```csharp
/// try {
///     var walker = new DirectoryWalker();
///     walker.Search(pattern);
/// } catch (UnauthorizedAccessException ex) {
///     // Handle permission error
/// } catch (Exception ex) {
///     // Handle other errors
/// }
/// ```
///
/// Rust uses Result types with custom errors:
/// ```rust,ignore
/// match search(&config) {
///     Ok(summary) => // Process summary,
///     Err(SearchError::InvalidPattern { pattern, .. }) => // Report bad pattern,
///     Err(e) => // Handle other errors
/// }
/// ```
///
/// # Propagation Policy
///
/// Only fatal configuration errors (`InvalidPattern`, `ConflictingOptions`) stop
/// the whole run. Per-entry filesystem errors (`DirectoryUnreadable`,
/// `FileUnreadable`) are recovered at the smallest possible scope — a single
/// directory or file is skipped — so that one inaccessible subtree never
/// degrades the rest of the search. No retries are performed anywhere;
/// filesystem errors are treated as permanent for the duration of the run.
use std::path::PathBuf;
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur during search operations
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
    #[error("Conflicting options: {0}")]
    ConflictingOptions(String),
    #[error("Cannot read directory {path}: {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot read file {path}: {source}")]
    FileUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Worker {id} panicked")]
    WorkerPanicked { id: usize },
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SearchError {
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    pub fn conflicting_options(msg: impl Into<String>) -> Self {
        Self::ConflictingOptions(msg.into())
    }

    pub fn directory_unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryUnreadable {
            path: path.into(),
            source,
        }
    }

    pub fn file_unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileUnreadable {
            path: path.into(),
            source,
        }
    }

    pub fn worker_panicked(id: usize) -> Self {
        Self::WorkerPanicked { id }
    }

    /// Whether the error is recoverable at the entry level (skip and continue)
    /// rather than fatal to the whole run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::DirectoryUnreadable { .. } | Self::FileUnreadable { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::Path;

    fn not_found() -> io::Error {
        io::Error::new(io::ErrorKind::NotFound, "not found")
    }

    #[test]
    fn test_error_creation() {
        let err = SearchError::invalid_pattern("[", regex::Regex::new("[").unwrap_err());
        assert!(matches!(err, SearchError::InvalidPattern { .. }));

        let err = SearchError::conflicting_options("-f and -v");
        assert!(matches!(err, SearchError::ConflictingOptions(_)));

        let err = SearchError::directory_unreadable(Path::new("/root/secret"), not_found());
        assert!(matches!(err, SearchError::DirectoryUnreadable { .. }));

        let err = SearchError::file_unreadable(Path::new("test.txt"), not_found());
        assert!(matches!(err, SearchError::FileUnreadable { .. }));

        let err = SearchError::worker_panicked(3);
        assert!(matches!(err, SearchError::WorkerPanicked { id: 3 }));
    }

    #[test]
    fn test_error_messages() {
        let err = SearchError::conflicting_options(
            "--names cannot be combined with --invert-match",
        );
        assert_eq!(
            err.to_string(),
            "Conflicting options: --names cannot be combined with --invert-match"
        );

        let err = SearchError::file_unreadable("test.txt", not_found());
        assert_eq!(err.to_string(), "Cannot read file test.txt: not found");

        let err = SearchError::worker_panicked(7);
        assert_eq!(err.to_string(), "Worker 7 panicked");
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(SearchError::directory_unreadable("/x", not_found()).is_recoverable());
        assert!(SearchError::file_unreadable("/x", not_found()).is_recoverable());
        assert!(!SearchError::conflicting_options("bad").is_recoverable());
        assert!(!SearchError::worker_panicked(0).is_recoverable());
    }
}

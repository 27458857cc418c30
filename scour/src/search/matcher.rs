use dashmap::DashMap;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::sync::Arc;

use crate::errors::{SearchError, SearchResult};

static PATTERN_CACHE: Lazy<DashMap<String, Arc<Regex>>> = Lazy::new(DashMap::new);

/// Matches a case-insensitive pattern against single lines of text or
/// file names.
///
/// Matching is an unanchored search: the pattern may match anywhere in the
/// input. The compiled regex sits behind an `Arc`, so the matcher is cheap
/// to clone and safe for unlimited concurrent calls.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    regex: Arc<Regex>,
}

impl PatternMatcher {
    /// Compiles a case-insensitive matcher for the given pattern.
    ///
    /// An invalid pattern fails here, before any worker starts; only
    /// successful compilations are cached.
    pub fn new(pattern: &str) -> SearchResult<Self> {
        if let Some(entry) = PATTERN_CACHE.get(pattern) {
            return Ok(Self {
                regex: Arc::clone(&entry),
            });
        }

        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| SearchError::invalid_pattern(pattern, e))?;
        let regex = Arc::new(regex);
        PATTERN_CACHE.insert(pattern.to_string(), Arc::clone(&regex));

        Ok(Self { regex })
    }

    /// Tests whether the pattern matches anywhere in the given text
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

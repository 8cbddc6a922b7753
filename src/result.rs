//! Search result types.

use serde::{Deserialize, Serialize};

/// A single accepted organic search result.
///
/// Invariant: `title` and `url` are non-empty. Candidates that fail this
/// after field extraction and URL cleanup are dropped by the extractor and
/// never constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result title.
    pub title: String,
    /// Destination URL, with the redirect wrapper already stripped.
    pub url: String,
    /// Result description/snippet; may be empty.
    pub description: String,
}

impl SearchResult {
    /// Creates a new search result.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            description: description.into(),
        }
    }
}

//! Search query representation and target-URL construction.

use serde::{Deserialize, Serialize};

use crate::{Result, ScrapeError};

/// Number of results requested from the target page.
pub const RESULT_COUNT: usize = 10;

/// A validated search query.
///
/// The contained text is always trimmed and non-empty; both properties are
/// enforced at construction so downstream code never re-checks them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    keyword: String,
}

impl SearchQuery {
    /// Creates a query from raw user input, trimming surrounding whitespace.
    ///
    /// Returns [`ScrapeError::InvalidQuery`] when the trimmed input is empty.
    pub fn parse(input: impl Into<String>) -> Result<Self> {
        let keyword = input.into().trim().to_string();
        if keyword.is_empty() {
            return Err(ScrapeError::InvalidQuery(
                "keyword must not be empty".to_string(),
            ));
        }
        Ok(Self { keyword })
    }

    /// Returns the query text.
    pub fn as_str(&self) -> &str {
        &self.keyword
    }

    /// Builds the results-page URL for this query.
    pub fn search_url(&self) -> String {
        format!(
            "https://www.google.com/search?q={}&num={}&hl=en",
            urlencoding::encode(&self.keyword),
            RESULT_COUNT
        )
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.keyword)
    }
}

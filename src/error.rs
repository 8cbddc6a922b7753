//! Error types for the scraper.

use thiserror::Error;

/// Result type alias for scraper operations.
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Errors that can occur while acquiring or extracting results.
///
/// Blocked pages (CAPTCHA, no-results, unknown interstitials) are *not*
/// errors; they are modeled as [`crate::BlockSignal`] outcomes. Only
/// infrastructure failures surface here.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Failed to launch or control the browser session.
    #[error("Browser error: {0}")]
    Browser(String),

    /// HTTP request failed (plain-HTTP acquisition fallback).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A configured CSS selector failed to compile.
    #[error("Invalid selector '{0}'")]
    Selector(String),

    /// The query was empty or whitespace-only.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Generic error.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_browser() {
        let err = ScrapeError::Browser("launch failed".to_string());
        assert_eq!(err.to_string(), "Browser error: launch failed");
    }

    #[test]
    fn test_error_display_selector() {
        let err = ScrapeError::Selector("div..g".to_string());
        assert_eq!(err.to_string(), "Invalid selector 'div..g'");
    }

    #[test]
    fn test_error_display_invalid_query() {
        let err = ScrapeError::InvalidQuery("keyword must not be empty".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid query: keyword must not be empty"
        );
    }

    #[test]
    fn test_error_display_other() {
        let err = ScrapeError::Other("something went wrong".to_string());
        assert_eq!(err.to_string(), "something went wrong");
    }

    #[test]
    fn test_error_debug() {
        let err = ScrapeError::Browser("boom".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Browser"));
    }
}

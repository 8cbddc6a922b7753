//! Acquired-page types and blocked-page classification.

use serde::{Deserialize, Serialize};

/// An immutable snapshot of one rendered results page.
///
/// Produced once per acquisition, consumed once by the extractor, never
/// cached or shared between invocations.
#[derive(Debug, Clone)]
pub struct PageSnapshot(String);

impl PageSnapshot {
    /// Wraps rendered markup in a snapshot.
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Returns the markup text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the markup length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for PageSnapshot {
    fn from(html: String) -> Self {
        Self(html)
    }
}

/// Why an acquisition attempt failed to yield usable content.
///
/// All variants are expected operating conditions against an adversarial
/// target, not errors; the pipeline maps them to an empty result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockSignal {
    /// The target served a bot-challenge page.
    CaptchaChallenge,
    /// The target reported that no documents matched the query.
    NoResultsPage,
    /// The results region never rendered and no known marker matched.
    UnknownBlock,
}

/// Outcome of one page acquisition.
#[derive(Debug, Clone)]
pub enum Acquisition {
    /// The results region rendered; extraction may proceed.
    Rendered(PageSnapshot),
    /// The page was blocked, challenged, or empty.
    Blocked(BlockSignal),
}

/// Marker substrings used to classify a page that failed to render results.
///
/// These are guesses about a third-party site's current markup and will
/// drift; they are data, not logic, so deployments can swap them without
/// touching the classification mechanism.
#[derive(Debug, Clone)]
pub struct BlockMarkers {
    /// Substrings that identify a bot-challenge page.
    pub captcha_markers: Vec<String>,
    /// Substrings that identify an explicit no-results page.
    pub no_results_markers: Vec<String>,
}

impl Default for BlockMarkers {
    fn default() -> Self {
        Self {
            captcha_markers: vec![
                "/sorry/index".to_string(),
                "recaptcha".to_string(),
                "unusual traffic".to_string(),
                "captcha-form".to_string(),
            ],
            no_results_markers: vec!["did not match any documents".to_string()],
        }
    }
}

impl BlockMarkers {
    /// Classifies markup that failed to render a results region.
    ///
    /// Matching is case-insensitive. Challenge markers take priority over
    /// no-results markers; anything else is an unknown block.
    pub fn classify(&self, html: &str) -> BlockSignal {
        let haystack = html.to_lowercase();
        if self
            .captcha_markers
            .iter()
            .any(|m| haystack.contains(&m.to_lowercase()))
        {
            return BlockSignal::CaptchaChallenge;
        }
        if self
            .no_results_markers
            .iter()
            .any(|m| haystack.contains(&m.to_lowercase()))
        {
            return BlockSignal::NoResultsPage;
        }
        BlockSignal::UnknownBlock
    }

    /// Returns whether the markup matches any blocked-page marker at all.
    pub fn matches(&self, html: &str) -> bool {
        let haystack = html.to_lowercase();
        self.captcha_markers
            .iter()
            .chain(self.no_results_markers.iter())
            .any(|m| haystack.contains(&m.to_lowercase()))
    }
}

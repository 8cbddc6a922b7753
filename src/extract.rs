//! Result extraction from a rendered page snapshot.
//!
//! The target's markup schema changes without notice and mixes organic
//! results with advertisements, so nothing here trusts a single selector:
//! container discovery and every field walk an ordered fallback chain, and
//! ad filtering is a union of independent heuristics. All selector and
//! marker strings live in [`SelectorPolicy`] so markup drift is absorbed by
//! configuration, not code changes.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::page::PageSnapshot;
use crate::{Result, ScrapeError, SearchResult};

/// Selector and marker configuration for one page-structure era.
#[derive(Debug, Clone)]
pub struct SelectorPolicy {
    /// Result-container patterns, tried in order; the first one matching at
    /// least one element is used for the entire page.
    pub container_selectors: Vec<String>,
    /// Title patterns, tried per container in order.
    pub title_selectors: Vec<String>,
    /// Link patterns, tried per container in order.
    pub link_selectors: Vec<String>,
    /// Snippet patterns, tried per container in order.
    pub snippet_selectors: Vec<String>,
    /// Whether to fall back to the first ellipsis-bearing `<span>` when no
    /// snippet pattern matches.
    pub snippet_ellipsis_fallback: bool,
    /// Substrings marking a container's content as an advertisement.
    pub ad_content_markers: Vec<String>,
    /// Substrings marking a container's class attribute as an advertisement.
    pub ad_class_markers: Vec<String>,
    /// Words that, as the exact text of an inline label element, mark an
    /// advertisement.
    pub ad_label_words: Vec<String>,
    /// Maximum number of accepted records per page.
    pub max_results: usize,
}

impl Default for SelectorPolicy {
    fn default() -> Self {
        Self {
            container_selectors: vec![
                "div.g".to_string(),
                "div[data-ved]".to_string(),
                ".tF2Cxc".to_string(),
            ],
            title_selectors: vec!["h3".to_string(), "a h3".to_string(), ".LC20lb".to_string()],
            link_selectors: vec!["a[href]".to_string(), "h3 a[href]".to_string()],
            snippet_selectors: vec![".VwiC3b".to_string(), ".s".to_string()],
            snippet_ellipsis_fallback: true,
            ad_content_markers: vec!["ads-ad".to_string(), "sponsored".to_string()],
            ad_class_markers: vec!["ads".to_string()],
            ad_label_words: vec![
                "ad".to_string(),
                "ads".to_string(),
                "sponsored".to_string(),
                "reklama".to_string(),
            ],
            max_results: 10,
        }
    }
}

/// An ordered chain of compiled selectors; the first match wins.
#[derive(Debug)]
struct FieldLocator {
    selectors: Vec<Selector>,
}

impl FieldLocator {
    fn compile(patterns: &[String]) -> Result<Self> {
        let selectors = patterns
            .iter()
            .map(|p| Selector::parse(p).map_err(|_| ScrapeError::Selector(p.clone())))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { selectors })
    }

    /// Returns the first element any selector in the chain matches.
    fn first_element<'a>(&self, container: &ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.selectors
            .iter()
            .find_map(|sel| container.select(sel).next())
    }

    /// Returns the trimmed text of the first matching element.
    fn first_text(&self, container: &ElementRef<'_>) -> Option<String> {
        self.first_element(container)
            .map(|el| el.text().collect::<String>().trim().to_string())
    }

    /// Returns the `href` of the first matching element carrying one.
    fn first_href(&self, container: &ElementRef<'_>) -> Option<String> {
        self.selectors
            .iter()
            .flat_map(|sel| container.select(sel))
            .find_map(|el| el.value().attr("href"))
            .map(str::to_string)
    }
}

/// Strips the target site's redirect wrapper from a result URL.
///
/// `/url?q=<dest>&<params>` becomes `<dest>`; a wrapper without trailing
/// parameters yields the whole remainder; anything else passes through
/// unchanged, including the empty string.
pub fn clean_url(url: &str) -> String {
    match url.strip_prefix("/url?q=") {
        Some(rest) => rest.split('&').next().unwrap_or(rest).to_string(),
        None => url.to_string(),
    }
}

/// Extracts ordered, validated organic results from one page snapshot.
#[derive(Debug)]
pub struct ResultExtractor {
    policy: SelectorPolicy,
    containers: Vec<(String, Selector)>,
    title: FieldLocator,
    link: FieldLocator,
    snippet: FieldLocator,
    span: Selector,
}

impl ResultExtractor {
    /// Creates an extractor with the default selector policy.
    pub fn new() -> Result<Self> {
        Self::with_policy(SelectorPolicy::default())
    }

    /// Creates an extractor, compiling every configured selector up front.
    pub fn with_policy(policy: SelectorPolicy) -> Result<Self> {
        let containers = policy
            .container_selectors
            .iter()
            .map(|p| {
                Selector::parse(p)
                    .map(|sel| (p.clone(), sel))
                    .map_err(|_| ScrapeError::Selector(p.clone()))
            })
            .collect::<Result<Vec<_>>>()?;
        let title = FieldLocator::compile(&policy.title_selectors)?;
        let link = FieldLocator::compile(&policy.link_selectors)?;
        let snippet = FieldLocator::compile(&policy.snippet_selectors)?;
        // "span" is a fixed tag name, not configuration; parsing cannot fail.
        let span = Selector::parse("span").map_err(|_| ScrapeError::Selector("span".into()))?;
        Ok(Self {
            policy,
            containers,
            title,
            link,
            snippet,
            span,
        })
    }

    /// Extracts results in document order, capped at the configured maximum.
    ///
    /// Ad containers and records missing a title or URL are dropped
    /// silently; a malformed container never aborts the rest of the page.
    pub fn extract(&self, snapshot: &PageSnapshot) -> Vec<SearchResult> {
        let document = Html::parse_document(snapshot.as_str());

        let containers = match self.discover_containers(&document) {
            Some(containers) => containers,
            None => {
                debug!("No container selector matched; page yields no results");
                return Vec::new();
            }
        };

        let mut results = Vec::new();
        for container in containers {
            if results.len() >= self.policy.max_results {
                break;
            }
            if self.is_advertisement(&container) {
                debug!("Skipping advertisement container");
                continue;
            }
            match self.extract_record(&container) {
                Some(record) => results.push(record),
                None => debug!("Dropping container without a valid title/URL"),
            }
        }

        debug!("Extracted {} results", results.len());
        results
    }

    /// Finds the container set using the first selector that matches at
    /// least one element.
    ///
    /// Selector vocabularies from different page-structure eras overlap;
    /// taking the union would produce duplicate or malformed matches, so
    /// discovery stops at the first hit.
    fn discover_containers<'a>(&self, document: &'a Html) -> Option<Vec<ElementRef<'a>>> {
        for (pattern, selector) in &self.containers {
            let matches: Vec<_> = document.select(selector).collect();
            if !matches.is_empty() {
                debug!(
                    "Found {} containers via selector '{}'",
                    matches.len(),
                    pattern
                );
                return Some(matches);
            }
        }
        None
    }

    /// Returns whether any independent ad signal fires for the container.
    fn is_advertisement(&self, container: &ElementRef<'_>) -> bool {
        self.content_has_ad_marker(container)
            || self.class_has_ad_marker(container)
            || self.has_ad_label(container)
    }

    /// Signal 1: the serialized content contains an ad-marker substring.
    fn content_has_ad_marker(&self, container: &ElementRef<'_>) -> bool {
        let html = container.inner_html().to_lowercase();
        self.policy
            .ad_content_markers
            .iter()
            .any(|marker| html.contains(&marker.to_lowercase()))
    }

    /// Signal 2: the class attribute contains an ad-marker substring.
    fn class_has_ad_marker(&self, container: &ElementRef<'_>) -> bool {
        let class = container.value().attr("class").unwrap_or_default();
        let class = class.to_lowercase();
        self.policy
            .ad_class_markers
            .iter()
            .any(|marker| class.contains(&marker.to_lowercase()))
    }

    /// Signal 3: an inline label whose text is exactly an ad marker word.
    fn has_ad_label(&self, container: &ElementRef<'_>) -> bool {
        container.select(&self.span).any(|span| {
            let text = span.text().collect::<String>();
            let text = text.trim();
            self.policy
                .ad_label_words
                .iter()
                .any(|word| text.eq_ignore_ascii_case(word))
        })
    }

    /// Extracts one candidate record, returning `None` when validation
    /// rejects it.
    fn extract_record(&self, container: &ElementRef<'_>) -> Option<SearchResult> {
        let title = self.title.first_text(container).unwrap_or_default();
        let url = self
            .link
            .first_href(container)
            .map(|href| clean_url(&href))
            .unwrap_or_default();
        let description = self.extract_description(container);

        if title.is_empty() || url.is_empty() {
            return None;
        }
        Some(SearchResult::new(title, url, description))
    }

    /// Walks the snippet chain, then the generic ellipsis-span fallback.
    fn extract_description(&self, container: &ElementRef<'_>) -> String {
        if let Some(text) = self.snippet.first_text(container) {
            return text;
        }
        if self.policy.snippet_ellipsis_fallback {
            for span in container.select(&self.span) {
                let text = span.text().collect::<String>();
                if text.contains("...") || text.contains('…') {
                    return text.trim().to_string();
                }
            }
        }
        String::new()
    }
}

//! Plain-HTTP page acquisition fallback.
//!
//! Fetches the results page with a realistic header set instead of a
//! rendered browser session. Cheaper than [`crate::BrowserAcquirer`] and
//! useful where Chrome is unavailable, but more likely to be served a
//! challenge page; the same block classification applies either way.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::acquirer::{AcquirerConfig, PageAcquirer};
use crate::page::{Acquisition, PageSnapshot};
use crate::{Result, ScrapeError, SearchQuery};

/// A [`PageAcquirer`] that issues a single HTTP GET per query.
pub struct HttpAcquirer {
    client: Client,
    config: AcquirerConfig,
}

impl HttpAcquirer {
    /// Creates an HTTP acquirer with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(AcquirerConfig::default())
    }

    /// Creates an HTTP acquirer with custom configuration.
    pub fn with_config(config: AcquirerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.wait_timeout)
            .build()
            .map_err(ScrapeError::Http)?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl PageAcquirer for HttpAcquirer {
    async fn acquire(&self, query: &SearchQuery) -> Result<Acquisition> {
        let identity = self.config.identities.pick().clone();
        let delay = self.config.pacing.jitter();
        debug!(
            "Fetching results for '{}' over HTTP after {}ms delay",
            query,
            delay.as_millis()
        );
        tokio::time::sleep(delay).await;

        let response = self
            .client
            .get(query.search_url())
            .header("User-Agent", &identity.user_agent)
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            )
            .header("Accept-Language", "en-US,en;q=0.9")
            .header("DNT", "1")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await?;

        let html = response.text().await?;

        // Server-rendered pages carry either results or a block marker; no
        // readiness wait applies, so classify straight from the body.
        if self.config.block_markers.matches(&html) {
            let signal = self.config.block_markers.classify(&html);
            debug!(?signal, "HTTP fetch returned a blocked page");
            return Ok(Acquisition::Blocked(signal));
        }

        debug!("HTTP fetch returned {} bytes", html.len());
        Ok(Acquisition::Rendered(PageSnapshot::new(html)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Pacing;

    #[test]
    fn test_http_acquirer_new() {
        assert!(HttpAcquirer::new().is_ok());
    }

    #[test]
    fn test_http_acquirer_with_config() {
        let config = AcquirerConfig {
            pacing: Pacing::none(),
            ..Default::default()
        };
        assert!(HttpAcquirer::with_config(config).is_ok());
    }

    #[tokio::test]
    #[ignore]
    async fn test_acquire_real_page() {
        // Requires network access; likely served a challenge page.
        let acquirer = HttpAcquirer::with_config(AcquirerConfig {
            pacing: Pacing::none(),
            ..Default::default()
        })
        .unwrap();
        let query = SearchQuery::parse("rust programming").unwrap();
        let outcome = acquirer.acquire(&query).await.unwrap();
        match outcome {
            Acquisition::Rendered(snapshot) => assert!(!snapshot.is_empty()),
            Acquisition::Blocked(signal) => println!("blocked: {:?}", signal),
        }
    }
}

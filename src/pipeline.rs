//! Fetch-and-parse pipeline orchestration.

use std::sync::Arc;

use tracing::{debug, info};

use crate::acquirer::PageAcquirer;
use crate::extract::ResultExtractor;
use crate::page::Acquisition;
use crate::{Result, SearchQuery, SearchResult};

/// One-shot scraping pipeline: acquire a rendered page, then extract
/// organic results from it.
///
/// A blocked acquisition short-circuits to an empty result set without
/// invoking extraction; only acquirer infrastructure failures propagate as
/// errors. Each run is stateless, so callers must never conflate zero
/// results with a failed request.
pub struct SearchPipeline {
    acquirer: Arc<dyn PageAcquirer>,
    extractor: ResultExtractor,
}

impl SearchPipeline {
    /// Creates a pipeline from an acquirer and an extractor.
    pub fn new(acquirer: Arc<dyn PageAcquirer>, extractor: ResultExtractor) -> Self {
        Self {
            acquirer,
            extractor,
        }
    }

    /// Runs the pipeline for one query.
    pub async fn run(&self, query: &SearchQuery) -> Result<Vec<SearchResult>> {
        info!("Scraping results for '{}'", query);

        let snapshot = match self.acquirer.acquire(query).await? {
            Acquisition::Rendered(snapshot) => snapshot,
            Acquisition::Blocked(signal) => {
                info!(?signal, "Acquisition blocked; returning no results");
                return Ok(Vec::new());
            }
        };

        debug!("Acquired {} bytes of markup", snapshot.len());
        let results = self.extractor.extract(&snapshot);
        info!("Pipeline produced {} results", results.len());
        Ok(results)
    }
}

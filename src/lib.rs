//! # serp-scrape
//!
//! Extracts organic search results (title, URL, description) from a
//! search-engine results page that actively resists automated access.
//!
//! Two components collaborate per call: a [`PageAcquirer`] renders the
//! results page while evading bot detection (or reports a
//! [`BlockSignal`]), and a [`ResultExtractor`] parses the snapshot into
//! validated [`SearchResult`] records despite unstable, ad-laden markup.
//! The [`SearchPipeline`] wires them together; blocked pages yield an
//! empty result set rather than an error.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use serp_scrape::{BrowserAcquirer, ResultExtractor, SearchPipeline, SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pipeline = SearchPipeline::new(
//!         Arc::new(BrowserAcquirer::new()),
//!         ResultExtractor::new()?,
//!     );
//!
//!     let query = SearchQuery::parse("rust programming")?;
//!     for result in pipeline.run(&query).await? {
//!         println!("{}: {}", result.title, result.url);
//!     }
//!     Ok(())
//! }
//! ```

mod acquirer;
mod browser;
mod error;
mod extract;
mod http;
mod identity;
mod page;
mod pipeline;
mod query;
mod result;

pub mod web;

pub use acquirer::{AcquirerConfig, PageAcquirer};
pub use browser::{detect_chrome, BrowserAcquirer};
pub use error::{Result, ScrapeError};
pub use extract::{clean_url, ResultExtractor, SelectorPolicy};
pub use http::HttpAcquirer;
pub use identity::{BrowserIdentity, IdentityPool, Pacing};
pub use page::{Acquisition, BlockMarkers, BlockSignal, PageSnapshot};
pub use pipeline::SearchPipeline;
pub use query::SearchQuery;
pub use result::SearchResult;

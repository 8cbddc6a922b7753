//! Page acquisition abstraction.

use std::time::Duration;

use async_trait::async_trait;

use crate::identity::{IdentityPool, Pacing};
use crate::page::{Acquisition, BlockMarkers};
use crate::{Result, SearchQuery};

/// Trait for acquiring one rendered results page per query.
///
/// Implementations may drive a headless browser or issue plain HTTP
/// requests. The contract is the same either way: a blocked, challenged, or
/// empty page is a normal [`Acquisition::Blocked`] outcome; only an
/// infrastructure failure (cannot launch or control the fetch layer) is an
/// error. Each call is stateless and isolated; no session is reused across
/// invocations.
#[async_trait]
pub trait PageAcquirer: Send + Sync {
    /// Acquires the results page for the given query.
    async fn acquire(&self, query: &SearchQuery) -> Result<Acquisition>;
}

/// Shared acquisition configuration.
///
/// These are fixed policy for all acquisitions performed by one acquirer,
/// not per-call parameters.
#[derive(Debug, Clone)]
pub struct AcquirerConfig {
    /// Identity pool rotated per acquisition.
    pub identities: IdentityPool,
    /// Randomized pre-navigation delay bounds.
    pub pacing: Pacing,
    /// Markers used to classify pages that failed to render results.
    pub block_markers: BlockMarkers,
    /// CSS selector whose presence signals that the results region rendered.
    pub ready_selector: String,
    /// Upper bound on the readiness wait.
    pub wait_timeout: Duration,
    /// Path to the Chrome/Chromium executable. If `None`, auto-detected.
    pub chrome_path: Option<String>,
    /// Whether to run the browser in headless mode.
    pub headless: bool,
}

impl Default for AcquirerConfig {
    fn default() -> Self {
        Self {
            identities: IdentityPool::default(),
            pacing: Pacing::default(),
            block_markers: BlockMarkers::default(),
            ready_selector: "#search".to_string(),
            wait_timeout: Duration::from_secs(20),
            chrome_path: None,
            headless: true,
        }
    }
}

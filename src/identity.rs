//! Browser identity rotation and request pacing.
//!
//! Fixed-interval requests from a single user-agent are the easiest
//! automation fingerprint to spot. Each acquisition picks a pseudo-random
//! identity (user-agent plus matching viewport) from a pool of strings
//! captured from real browsers, and sleeps a jittered delay before
//! navigating.

use std::time::Duration;

use rand::Rng;

/// One realistic browser identity.
#[derive(Debug, Clone)]
pub struct BrowserIdentity {
    /// Full user-agent string.
    pub user_agent: String,
    /// Viewport width and height in pixels.
    pub viewport: (u32, u32),
}

impl BrowserIdentity {
    /// Creates a new identity.
    pub fn new(user_agent: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            user_agent: user_agent.into(),
            viewport: (width, height),
        }
    }
}

/// A pool of identities selected pseudo-randomly per acquisition.
#[derive(Debug, Clone)]
pub struct IdentityPool {
    identities: Vec<BrowserIdentity>,
}

impl Default for IdentityPool {
    fn default() -> Self {
        Self {
            identities: vec![
                BrowserIdentity::new(
                    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
                    1920,
                    1080,
                ),
                BrowserIdentity::new(
                    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                     (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
                    1536,
                    864,
                ),
                BrowserIdentity::new(
                    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) \
                     Gecko/20100101 Firefox/121.0",
                    1920,
                    1080,
                ),
                BrowserIdentity::new(
                    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
                    1440,
                    900,
                ),
                BrowserIdentity::new(
                    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
                    1366,
                    768,
                ),
            ],
        }
    }
}

impl IdentityPool {
    /// Creates a pool from explicit identities.
    ///
    /// Falls back to the default pool when `identities` is empty, so a pool
    /// can always produce an identity.
    pub fn new(identities: Vec<BrowserIdentity>) -> Self {
        if identities.is_empty() {
            Self::default()
        } else {
            Self { identities }
        }
    }

    /// Picks a pseudo-random identity from the pool.
    pub fn pick(&self) -> &BrowserIdentity {
        let idx = rand::thread_rng().gen_range(0..self.identities.len());
        &self.identities[idx]
    }

    /// Returns the number of identities in the pool.
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    /// Returns whether the pool is empty. Always false by construction.
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

/// Randomized delay applied before each navigation.
#[derive(Debug, Clone)]
pub struct Pacing {
    /// Lower delay bound.
    pub min: Duration,
    /// Upper delay bound (inclusive).
    pub max: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            min: Duration::from_secs(2),
            max: Duration::from_secs(5),
        }
    }
}

impl Pacing {
    /// Creates a pacing policy with the given bounds.
    ///
    /// Bounds are swapped if given in the wrong order.
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// A zero-delay policy, for tests and latency-insensitive callers.
    pub fn none() -> Self {
        Self {
            min: Duration::ZERO,
            max: Duration::ZERO,
        }
    }

    /// Samples a delay uniformly from the configured bounds.
    pub fn jitter(&self) -> Duration {
        if self.min >= self.max {
            return self.min;
        }
        let millis = rand::thread_rng().gen_range(self.min.as_millis()..=self.max.as_millis());
        Duration::from_millis(millis as u64)
    }
}

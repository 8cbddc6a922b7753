//! Headless-browser page acquisition.
//!
//! Drives Chrome/Chromium via the Chrome DevTools Protocol to render the
//! results page for one query. Each acquisition launches its own browser
//! process with automation-masking flags and a rotated identity, and tears
//! the process down on every exit path before returning.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::acquirer::{AcquirerConfig, PageAcquirer};
use crate::identity::BrowserIdentity;
use crate::page::{Acquisition, PageSnapshot};
use crate::{Result, ScrapeError, SearchQuery};

/// Well-known Chrome/Chromium executable paths per platform.
#[cfg(target_os = "macos")]
const KNOWN_PATHS: &[&str] = &[
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
];

#[cfg(all(unix, not(target_os = "macos")))]
const KNOWN_PATHS: &[&str] = &[
    "/opt/google/chrome/chrome",
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/snap/bin/chromium",
];

#[cfg(windows)]
const KNOWN_PATHS: &[&str] = &[
    "C:\\Program Files\\Google\\Chrome\\Application\\chrome.exe",
    "C:\\Program Files (x86)\\Google\\Chrome\\Application\\chrome.exe",
];

/// Well-known command names to search in PATH.
const KNOWN_COMMANDS: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
    "chrome",
];

/// Detect an existing Chrome/Chromium installation on the system.
///
/// Checks the `CHROME` environment variable, then well-known command names
/// in PATH, then well-known filesystem paths.
pub fn detect_chrome() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("CHROME") {
        let p = PathBuf::from(&path);
        if p.exists() {
            debug!("Chrome found via CHROME env var: {}", path);
            return Some(p);
        }
    }

    for cmd in KNOWN_COMMANDS {
        if let Ok(path) = which::which(cmd) {
            debug!("Chrome found in PATH: {}", path.display());
            return Some(path);
        }
    }

    for path_str in KNOWN_PATHS {
        let p = Path::new(path_str);
        if p.exists() {
            debug!("Chrome found at known path: {}", path_str);
            return Some(p.to_path_buf());
        }
    }

    None
}

/// One launched browser process plus its CDP event-handler task.
///
/// `shutdown` must run exactly once before the owning acquisition returns;
/// `acquire` guarantees this on the success, blocked, and error paths alike.
struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    /// Terminates the browser process and the CDP handler task.
    async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }
        let _ = self.browser.wait().await;
        self.handler.abort();
        debug!("Browser session torn down");
    }
}

/// A [`PageAcquirer`] that renders the results page in headless Chrome.
pub struct BrowserAcquirer {
    config: AcquirerConfig,
}

impl BrowserAcquirer {
    /// Creates a browser acquirer with default configuration.
    pub fn new() -> Self {
        Self {
            config: AcquirerConfig::default(),
        }
    }

    /// Creates a browser acquirer with custom configuration.
    pub fn with_config(config: AcquirerConfig) -> Self {
        Self { config }
    }

    /// Launches a fresh browser process for one acquisition.
    async fn launch(&self, identity: &BrowserIdentity) -> Result<BrowserSession> {
        let mut builder = BrowserConfig::builder();

        if self.config.headless {
            builder = builder.arg("--headless=new");
        }

        let chrome_path = match &self.config.chrome_path {
            Some(path) => PathBuf::from(path),
            None => detect_chrome().ok_or_else(|| {
                ScrapeError::Browser(
                    "No Chrome/Chromium installation found; set --chrome or the CHROME env var"
                        .to_string(),
                )
            })?,
        };
        builder = builder.chrome_executable(chrome_path);

        // Chrome's headless mode injects "HeadlessChrome" into the UA and
        // exposes navigator.webdriver; both are trivially detected. Override
        // the UA with the rotated identity and hide automation indicators.
        let (width, height) = identity.viewport;
        builder = builder
            .arg(format!("--user-agent={}", identity.user_agent))
            .arg("--disable-blink-features=AutomationControlled")
            .arg(format!("--window-size={},{}", width, height))
            .arg("--incognito")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-background-networking")
            .arg("--disable-default-apps")
            .arg("--disable-sync")
            .arg("--mute-audio")
            .arg("--no-first-run");

        let browser_config = builder
            .build()
            .map_err(|e| ScrapeError::Browser(format!("Failed to build browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| ScrapeError::Browser(format!("Failed to launch browser: {}", e)))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser CDP handler error: {}", e);
                }
            }
            debug!("Browser CDP handler exited");
        });

        Ok(BrowserSession { browser, handler })
    }

    /// Navigates, waits for the results region, and reads the rendered markup.
    async fn render(&self, session: &BrowserSession, url: &str) -> Result<Acquisition> {
        let page = session
            .browser
            .new_page(url)
            .await
            .map_err(|e| ScrapeError::Browser(format!("Failed to open page: {}", e)))?;

        page.wait_for_navigation()
            .await
            .map_err(|e| ScrapeError::Browser(format!("Navigation wait failed: {}", e)))?;

        let ready = self.wait_for_results(&page).await;

        let html = page
            .content()
            .await
            .map_err(|e| ScrapeError::Browser(format!("Failed to read page content: {}", e)))?;

        // Best-effort; the whole process is torn down right after anyway.
        if let Err(e) = page.close().await {
            debug!("Failed to close page: {}", e);
        }

        if ready {
            debug!("Results region rendered ({} bytes)", html.len());
            return Ok(Acquisition::Rendered(PageSnapshot::new(html)));
        }

        let signal = self.config.block_markers.classify(&html);
        debug!(?signal, "Results region did not render within timeout");
        Ok(Acquisition::Blocked(signal))
    }

    /// Polls for the readiness selector until it matches or the bounded
    /// wait elapses. Returns whether the selector was found.
    async fn wait_for_results(&self, page: &Page) -> bool {
        let selector = self.config.ready_selector.clone();
        tokio::time::timeout(self.config.wait_timeout, async {
            loop {
                if page.find_element(selector.as_str()).await.is_ok() {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(250)).await;
            }
        })
        .await
        .is_ok()
    }
}

impl Default for BrowserAcquirer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageAcquirer for BrowserAcquirer {
    async fn acquire(&self, query: &SearchQuery) -> Result<Acquisition> {
        let identity = self.config.identities.pick().clone();
        let delay = self.config.pacing.jitter();
        debug!(
            "Acquiring results for '{}' after {}ms delay (viewport {}x{})",
            query,
            delay.as_millis(),
            identity.viewport.0,
            identity.viewport.1
        );
        tokio::time::sleep(delay).await;

        let session = self.launch(&identity).await?;

        // The session is torn down on every path out of `render`, including
        // CDP errors, before the outcome is propagated.
        let outcome = self.render(&session, &query.search_url()).await;
        session.shutdown().await;
        outcome
    }
}

//! Browser lifecycle for rank discovery
//!
//! Launches a headless chromiumoxide Chrome instance with a throwaway
//! profile, keeps the CDP event handler on a tracked task, and opens the
//! storefront landing page the search tasks share.

use chromiumoxide::browser::{Browser, BrowserConfigBuilder};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::{self, JoinHandle};
use tracing::{info, warn};
use url::Url;

use crate::config::RankConfig;
use crate::error::{RankError, RankResult};

/// Wrapper for Browser and its event handler task
///
/// The handler MUST be aborted when the browser goes away, otherwise it
/// polls a dead CDP channel forever. The temp profile dir is removed after
/// Chrome has released its file handles.
pub struct BrowserHandle {
    browser: Browser,
    handler: JoinHandle<()>,
    user_data_dir: Option<PathBuf>,
}

impl BrowserHandle {
    /// Get reference to inner browser
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Remove the throwaway profile directory
    ///
    /// Blocking on purpose: this also runs from Drop, where async is not
    /// available.
    pub fn cleanup_temp_dir(&mut self) {
        if let Some(path) = self.user_data_dir.take() {
            info!("Cleaning up temp profile: {}", path.display());
            if let Err(e) = std::fs::remove_dir_all(&path) {
                warn!(
                    "Failed to remove temp profile {}: {}. Manual cleanup may be required.",
                    path.display(),
                    e
                );
            }
        }
    }
}

impl Drop for BrowserHandle {
    fn drop(&mut self) {
        self.handler.abort();
        // Browser::drop kills the Chrome process itself.
        if self.user_data_dir.is_some() {
            self.cleanup_temp_dir();
        }
    }
}

/// Launch a Chrome instance configured for the storefront
///
/// Uses a fresh temp profile per process and the usual automation-hiding
/// argument set. The returned handle owns the event-handler task; dropping
/// it tears the whole browser down.
pub async fn launch_browser(config: &RankConfig) -> RankResult<BrowserHandle> {
    info!("Launching browser for rank discovery");

    let user_data_dir = std::env::temp_dir().join(format!("storerank_chrome_{}", std::process::id()));
    std::fs::create_dir_all(&user_data_dir)?;

    let (width, height) = config.viewport();
    let mut builder = BrowserConfigBuilder::default()
        .request_timeout(Duration::from_secs(30))
        .window_size(width, height)
        .user_data_dir(user_data_dir.clone())
        .arg(format!("--user-agent={}", config.user_agent()))
        .arg("--disable-blink-features=AutomationControlled")
        .arg("--disable-infobars")
        .arg("--disable-notifications")
        .arg("--disable-extensions")
        .arg("--disable-popup-blocking")
        .arg("--disable-background-networking")
        .arg("--disable-background-timer-throttling")
        .arg("--no-first-run")
        .arg("--no-default-browser-check")
        .arg("--no-sandbox")
        .arg("--disable-setuid-sandbox")
        .arg("--hide-scrollbars")
        .arg("--mute-audio");
    if !config.headless() {
        builder = builder.with_head();
    }
    let browser_config = builder
        .build()
        .map_err(|e| RankError::Browser(format!("failed to build browser config: {e}")))?;

    let (browser, mut handler) = Browser::launch(browser_config).await?;

    // Keep the JoinHandle so shutdown can stop the event loop.
    let handler_task = task::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                tracing::error!("Browser handler error: {:?}", e);
            }
        }
        info!("Browser event handler task completed");
    });

    Ok(BrowserHandle {
        browser,
        handler: handler_task,
        user_data_dir: Some(user_data_dir),
    })
}

/// Open the storefront landing page all search tasks share
///
/// Applies the desktop user agent before navigating; the storefront decides
/// desktop-vs-mobile layout from it and the selectors only exist on desktop.
pub async fn open_store_page(handle: &BrowserHandle, config: &RankConfig) -> RankResult<Page> {
    let store_url = Url::parse(config.store_url())
        .map_err(|e| RankError::Navigation(format!("invalid store URL: {e}")))?;

    let page = handle.browser().new_page("about:blank").await?;
    page.set_user_agent(config.user_agent()).await?;

    page.goto(store_url.as_str())
        .await
        .map_err(|e| RankError::Navigation(e.to_string()))?;
    page.wait_for_navigation()
        .await
        .map_err(|e| RankError::Navigation(e.to_string()))?;

    info!("Storefront page open: {}", config.store_url());
    Ok(page)
}

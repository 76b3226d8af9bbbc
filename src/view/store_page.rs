//! `SearchView` over a live chromiumoxide page
//!
//! Selector-level plumbing only; all collection/termination logic lives in
//! `rank::finder`.

use async_trait::async_trait;
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use super::SearchView;
use crate::config::RankConfig;
use crate::error::{RankError, RankResult};

/// The storefront search feed, rendered in a shared browser page
pub struct StorePage {
    page: Page,
    search_input_selector: String,
    clear_button_selector: String,
    feed_item_selector: String,
    item_link_selector: String,
    wait_timeout: Duration,
    poll_interval: Duration,
}

impl StorePage {
    #[must_use]
    pub fn new(page: Page, config: &RankConfig) -> Self {
        Self {
            page,
            search_input_selector: config.search_input_selector().to_string(),
            clear_button_selector: config.clear_button_selector().to_string(),
            feed_item_selector: config.feed_item_selector().to_string(),
            item_link_selector: config.item_link_selector().to_string(),
            wait_timeout: config.render_wait_timeout(),
            poll_interval: config.render_poll_interval(),
        }
    }

    /// Poll until `selector` exists in the DOM
    ///
    /// `wait_for_navigation` returns when the HTTP response lands, but the
    /// storefront renders the feed via JavaScript afterwards; the element has
    /// to be polled for.
    async fn wait_for_selector(&self, selector: &str) -> RankResult<Element> {
        let start = Instant::now();
        loop {
            match self.page.find_element(selector).await {
                Ok(element) => {
                    trace!("Selector '{}' present after {:?}", selector, start.elapsed());
                    return Ok(element);
                }
                Err(_) if start.elapsed() >= self.wait_timeout => {
                    return Err(RankError::RenderTimeout(self.wait_timeout));
                }
                Err(_) => tokio::time::sleep(self.poll_interval).await,
            }
        }
    }
}

#[async_trait]
impl SearchView for StorePage {
    async fn submit_query(&self, text: &str) -> RankResult<()> {
        let input = self
            .wait_for_selector(&self.search_input_selector)
            .await
            .map_err(|_| RankError::Selector(self.search_input_selector.clone()))?;
        input.click().await?;
        input.type_str(text).await?;
        input.press_key("Enter").await?;
        debug!("Submitted query '{}'", text);
        Ok(())
    }

    async fn wait_for_any_result(&self) -> RankResult<()> {
        self.wait_for_selector(&self.feed_item_selector).await?;
        Ok(())
    }

    async fn read_visible_entries(&self) -> RankResult<Vec<String>> {
        let items = self.page.find_elements(&self.feed_item_selector).await?;
        let mut entries = Vec::with_capacity(items.len());
        for item in items {
            // Items still streaming in may not carry their link yet; skip them,
            // the next cycle re-reads the whole feed anyway.
            let Ok(link) = item.find_element(&self.item_link_selector).await else {
                continue;
            };
            if let Some(href) = link.attribute("href").await?
                && !href.is_empty()
            {
                entries.push(href);
            }
        }
        trace!("Read {} visible entries", entries.len());
        Ok(entries)
    }

    async fn scroll_by_one_viewport(&self) -> RankResult<()> {
        self.page
            .evaluate("window.scrollBy(0, window.innerHeight)")
            .await?;
        Ok(())
    }

    async fn reset_search(&self) -> RankResult<()> {
        // Clear button only exists while the query field is non-empty; its
        // absence is not an error.
        match self.page.find_element(&self.clear_button_selector).await {
            Ok(button) => {
                button.click().await?;
                debug!("Search field cleared");
            }
            Err(_) => trace!("Clear button not present, skipping"),
        }
        self.page.evaluate("window.scrollTo(0, 0)").await?;
        Ok(())
    }
}

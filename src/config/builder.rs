//! Fluent builder for `RankConfig`
//!
//! Every field has a working storefront default, so there are no required
//! states; `build` only fails if the entry-pattern markers compile into an
//! invalid regex.

use anyhow::{Context, Result};

use super::types::{self, RankConfig};

#[derive(Debug, Clone, Default)]
pub struct RankConfigBuilder {
    config: RankConfig,
    path_marker: Option<String>,
    position_param: Option<String>,
}

impl RankConfigBuilder {
    #[must_use]
    pub fn store_url(mut self, url: impl Into<String>) -> Self {
        self.config.store_url = url.into();
        self
    }

    #[must_use]
    pub fn search_input_selector(mut self, selector: impl Into<String>) -> Self {
        self.config.search_input_selector = selector.into();
        self
    }

    #[must_use]
    pub fn clear_button_selector(mut self, selector: impl Into<String>) -> Self {
        self.config.clear_button_selector = selector.into();
        self
    }

    #[must_use]
    pub fn feed_item_selector(mut self, selector: impl Into<String>) -> Self {
        self.config.feed_item_selector = selector.into();
        self
    }

    #[must_use]
    pub fn item_link_selector(mut self, selector: impl Into<String>) -> Self {
        self.config.item_link_selector = selector.into();
        self
    }

    /// Literal path segment preceding the item id (default `productions/`)
    #[must_use]
    pub fn item_path_marker(mut self, marker: impl Into<String>) -> Self {
        self.path_marker = Some(marker.into());
        self
    }

    /// Query parameter carrying the feed position (default `affect_id`)
    #[must_use]
    pub fn position_param(mut self, param: impl Into<String>) -> Self {
        self.position_param = Some(param.into());
        self
    }

    #[must_use]
    pub fn stagnation_window(mut self, window: usize) -> Self {
        self.config.stagnation_window = window;
        self
    }

    #[must_use]
    pub fn stagnation_limit(mut self, limit: u32) -> Self {
        self.config.stagnation_limit = limit;
        self
    }

    #[must_use]
    pub fn render_wait_timeout_secs(mut self, secs: u64) -> Self {
        self.config.render_wait_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn render_poll_interval_ms(mut self, millis: u64) -> Self {
        self.config.render_poll_interval_ms = millis;
        self
    }

    #[must_use]
    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    #[must_use]
    pub fn read_range(mut self, range: impl Into<String>) -> Self {
        self.config.read_range = range.into();
        self
    }

    #[must_use]
    pub fn rank_column_index(mut self, index: u32) -> Self {
        self.config.rank_column_index = index;
        self
    }

    #[must_use]
    pub fn header_row_index(mut self, index: u32) -> Self {
        self.config.header_row_index = index;
        self
    }

    /// Finalize the config, compiling the entry pattern once
    pub fn build(mut self) -> Result<RankConfig> {
        if let Some(marker) = self.path_marker {
            self.config.item_path_marker = marker;
        }
        if let Some(param) = self.position_param {
            self.config.position_param = param;
        }
        self.config.entry_pattern = types::compile_entry_pattern(
            &self.config.item_path_marker,
            &self.config.position_param,
        )
        .with_context(|| {
            format!(
                "invalid entry markers '{}' / '{}'",
                self.config.item_path_marker, self.config.position_param
            )
        })?;
        Ok(self.config)
    }
}

//! Core configuration types for rank discovery

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How many trailing entries of a fresh read form the stagnation fingerprint
pub const DEFAULT_STAGNATION_WINDOW: usize = 4;

/// How many consecutive identical fingerprints terminate a search as exhausted
pub const DEFAULT_STAGNATION_LIMIT: u32 = 100;

/// Desktop user agent; the storefront serves a broken mobile layout to
/// headless Chrome without it.
pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";

/// Configuration for one rank-discovery run
///
/// Defaults target the Ohouse storefront and the G/H → I sheet layout; every
/// field is overridable through [`super::RankConfigBuilder`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankConfig {
    pub(crate) store_url: String,
    pub(crate) search_input_selector: String,
    pub(crate) clear_button_selector: String,
    pub(crate) feed_item_selector: String,
    pub(crate) item_link_selector: String,

    /// Literal path segment preceding the item id in a result href
    pub(crate) item_path_marker: String,
    /// Query parameter carrying the feed position in a result href
    pub(crate) position_param: String,

    pub(crate) stagnation_window: usize,
    pub(crate) stagnation_limit: u32,
    pub(crate) render_wait_timeout_secs: u64,
    pub(crate) render_poll_interval_ms: u64,

    pub(crate) viewport_width: u32,
    pub(crate) viewport_height: u32,
    pub(crate) user_agent: String,
    pub(crate) headless: bool,

    /// Keyword/target columns, read relative to the sheet name (`G7:H`)
    pub(crate) read_range: String,
    /// Zero-based column where the rank column is inserted (8 = column I)
    pub(crate) rank_column_index: u32,
    /// Zero-based row of the tinted timestamp header cell (5 = row 6)
    pub(crate) header_row_index: u32,

    /// Compiled from `item_path_marker` and `position_param` at build time
    /// to keep regex compilation out of the per-entry scan.
    #[serde(skip, default = "default_entry_pattern")]
    pub(crate) entry_pattern: Regex,
}

pub(crate) fn compile_entry_pattern(path_marker: &str, position_param: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"{}(\d+).*{}=(\d+)",
        regex::escape(path_marker),
        regex::escape(position_param)
    ))
}

fn default_entry_pattern() -> Regex {
    compile_entry_pattern("productions/", "affect_id")
        .unwrap_or_else(|_| Regex::new(r"productions/(\d+).*affect_id=(\d+)").unwrap())
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            store_url: "https://store.ohou.se/".to_string(),
            search_input_selector: "input[placeholder='쇼핑 검색'].css-1pneado.e1rynmtb2".to_string(),
            clear_button_selector: "button.css-ytyqhb.e1rynmtb1".to_string(),
            feed_item_selector: ".production-feed__item-wrap.col-6.col-md-4.col-lg-3".to_string(),
            item_link_selector: "a".to_string(),
            item_path_marker: "productions/".to_string(),
            position_param: "affect_id".to_string(),
            stagnation_window: DEFAULT_STAGNATION_WINDOW,
            stagnation_limit: DEFAULT_STAGNATION_LIMIT,
            render_wait_timeout_secs: 30,
            render_poll_interval_ms: 200,
            viewport_width: 1280,
            viewport_height: 800,
            user_agent: DESKTOP_USER_AGENT.to_string(),
            headless: true,
            read_range: "G7:H".to_string(),
            rank_column_index: 8,
            header_row_index: 5,
            entry_pattern: default_entry_pattern(),
        }
    }
}

impl RankConfig {
    /// Start building a config with the storefront defaults
    #[must_use]
    pub fn builder() -> super::RankConfigBuilder {
        super::RankConfigBuilder::default()
    }

    #[must_use]
    pub fn store_url(&self) -> &str {
        &self.store_url
    }

    #[must_use]
    pub fn search_input_selector(&self) -> &str {
        &self.search_input_selector
    }

    #[must_use]
    pub fn clear_button_selector(&self) -> &str {
        &self.clear_button_selector
    }

    #[must_use]
    pub fn feed_item_selector(&self) -> &str {
        &self.feed_item_selector
    }

    #[must_use]
    pub fn item_link_selector(&self) -> &str {
        &self.item_link_selector
    }

    #[must_use]
    pub fn stagnation_window(&self) -> usize {
        self.stagnation_window
    }

    #[must_use]
    pub fn stagnation_limit(&self) -> u32 {
        self.stagnation_limit
    }

    #[must_use]
    pub fn render_wait_timeout(&self) -> Duration {
        Duration::from_secs(self.render_wait_timeout_secs)
    }

    #[must_use]
    pub fn render_poll_interval(&self) -> Duration {
        Duration::from_millis(self.render_poll_interval_ms)
    }

    #[must_use]
    pub fn viewport(&self) -> (u32, u32) {
        (self.viewport_width, self.viewport_height)
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn read_range(&self) -> &str {
        &self.read_range
    }

    #[must_use]
    pub fn rank_column_index(&self) -> u32 {
        self.rank_column_index
    }

    #[must_use]
    pub fn header_row_index(&self) -> u32 {
        self.header_row_index
    }

    #[must_use]
    pub fn entry_pattern(&self) -> &Regex {
        &self.entry_pattern
    }
}

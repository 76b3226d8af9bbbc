//! Configuration for rank discovery
//!
//! Provides the `RankConfig` struct and its fluent builder: storefront URL
//! and selectors, the stagnation heuristic constants, viewport/user-agent
//! settings, and the spreadsheet read/write anchors.

pub mod builder;
pub mod types;

pub use builder::RankConfigBuilder;
pub use types::RankConfig;

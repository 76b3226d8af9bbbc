//! Rank discovery core
//!
//! The incremental-scroll collection loop: accumulate rendered entries in
//! first-seen order, deduplicate, detect feed stagnation through a trailing
//! fingerprint, and scan for a target item id. Everything here is pure state
//! plus calls through the [`crate::view::SearchView`] seam.

pub mod batch;
pub mod entry;
pub mod feed;
pub mod finder;

pub use batch::{run_batch, run_task};
pub use entry::{EntryIds, parse_entry};
pub use feed::{ResultFeed, StagnationGauge};
pub use finder::{FinderPhase, RankOutcome, find_rank};

use serde::{Deserialize, Serialize};

/// One keyword/target pair, built from one spreadsheet row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchTask {
    pub keyword: String,
    pub target_id: String,
}

impl SearchTask {
    #[must_use]
    pub fn new(keyword: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            target_id: target_id.into(),
        }
    }

    /// Build a task from a raw sheet row (keyword column, then id column)
    ///
    /// Short rows happen when the id cell is blank; missing cells become
    /// empty strings, and an empty keyword later resolves as a skipped task.
    #[must_use]
    pub fn from_row(row: &[String]) -> Self {
        Self {
            keyword: row.first().cloned().unwrap_or_default(),
            target_id: row.get(1).cloned().unwrap_or_default(),
        }
    }
}

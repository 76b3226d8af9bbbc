//! Tabular data source/sink collaborator
//!
//! The core consumes a list of (keyword, target) rows and produces one rank
//! value per row, in order. Everything sheet-shaped — ranges, column
//! insertion, header formatting, authentication — lives behind this module.

mod client;
pub mod types;

pub use client::SheetsClient;

use async_trait::async_trait;
use chrono::{DateTime, Local};

use crate::error::RankResult;
use crate::rank::{RankOutcome, SearchTask};

/// Row source/sink seam so the batch orchestration tests against an
/// in-memory double instead of the live Sheets API.
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Read the configured keyword/target rows, top to bottom
    async fn read_tasks(&self) -> RankResult<Vec<SearchTask>>;

    /// Write one rank column, newest leftmost, with a timestamp header
    async fn write_ranks(&self, outcomes: &[RankOutcome]) -> RankResult<()>;
}

/// Header value for a rank column written at `now`
///
/// Local time, `yy-MM-dd HH:mm` — short enough to survive as a column label.
#[must_use]
pub fn rank_header_at(now: DateTime<Local>) -> String {
    now.format("%y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn header_is_short_local_timestamp() {
        let moment = Local.with_ymd_and_hms(2026, 8, 29, 14, 5, 59).unwrap();
        assert_eq!(rank_header_at(moment), "26-08-29 14:05");
    }
}

//! The rank-discovery state machine
//!
//! One task drives one full search/scroll/collect/match cycle against the
//! shared view. The loop is an explicit phase machine rather than a bare
//! `while !found`; the stagnation gauge is its only algorithmic escape valve.
//!
//! Transitions:
//!
//! ```text
//! Searching   --query submitted-->                    Collecting
//! Collecting  --fresh trailing window-->              scan: Found | scroll, Collecting
//! Collecting  --trailing window repeated-->           Stagnating
//! Stagnating  --streak below limit-->                 scan: Found | scroll, Collecting
//! Stagnating  --streak at limit-->                    Exhausted
//! Found / Exhausted                                   terminal
//! ```

use tracing::{debug, info};

use super::entry::parse_entry;
use super::feed::{ResultFeed, StagnationGauge};
use super::SearchTask;
use crate::config::RankConfig;
use crate::error::RankResult;
use crate::view::SearchView;

/// Phases of one rank-discovery task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinderPhase {
    /// Query not yet submitted
    Searching,
    /// Feed produced new content last cycle
    Collecting,
    /// Trailing window repeated; counting towards exhaustion
    Stagnating,
    /// Target located; carries the position id
    Found(String),
    /// Stagnation limit reached without a match
    Exhausted,
}

/// Terminal outcome of one task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankOutcome {
    /// Target located at this feed position
    Found(String),
    /// Feed stopped producing new entries before the target appeared
    Exhausted,
    /// Row had no keyword configured; no search performed
    Skipped,
    /// Task-level error, recovered at the batch boundary
    Failed(String),
}

impl RankOutcome {
    /// The spreadsheet cell value for this outcome
    ///
    /// Exhausted, skipped and failed tasks all write an empty cell; the
    /// distinction only survives in logs and tests.
    #[must_use]
    pub fn as_cell(&self) -> &str {
        match self {
            RankOutcome::Found(position) => position,
            _ => "",
        }
    }
}

/// Scan the accumulated feed, in order, for the target item id
///
/// Covers the entire feed every cycle rather than just new entries, so a
/// misread earlier cycle can never hide a match. First match wins; later
/// duplicates of the same item id never override it.
fn scan_for_target(config: &RankConfig, feed: &ResultFeed, target_id: &str) -> Option<String> {
    feed.iter()
        .filter_map(|href| parse_entry(config.entry_pattern(), href))
        .find(|ids| ids.item_id == target_id)
        .map(|ids| ids.position_id)
}

/// Run one search task against the view
///
/// Returns `Skipped` for an empty keyword without touching the view. Does
/// NOT reset the view afterwards; that belongs to the task boundary in
/// [`super::batch`], which must reset on error paths too.
pub async fn find_rank<V: SearchView + ?Sized>(
    config: &RankConfig,
    view: &V,
    task: &SearchTask,
) -> RankResult<RankOutcome> {
    if task.keyword.trim().is_empty() {
        return Ok(RankOutcome::Skipped);
    }

    let mut feed = ResultFeed::new();
    let mut gauge = StagnationGauge::new(config.stagnation_window(), config.stagnation_limit());
    let mut phase = FinderPhase::Searching;

    let outcome = loop {
        phase = match phase {
            FinderPhase::Searching => {
                view.submit_query(&task.keyword).await?;
                debug!(keyword = %task.keyword, "Query submitted");
                FinderPhase::Collecting
            }
            FinderPhase::Collecting => {
                view.wait_for_any_result().await?;
                let batch = view.read_visible_entries().await?;
                let repeated = gauge.observe(&batch);
                feed.extend(&batch);
                if repeated {
                    FinderPhase::Stagnating
                } else if let Some(position) = scan_for_target(config, &feed, &task.target_id) {
                    FinderPhase::Found(position)
                } else {
                    view.scroll_by_one_viewport().await?;
                    FinderPhase::Collecting
                }
            }
            FinderPhase::Stagnating => {
                if gauge.exhausted() {
                    FinderPhase::Exhausted
                } else if let Some(position) = scan_for_target(config, &feed, &task.target_id) {
                    FinderPhase::Found(position)
                } else {
                    debug!(
                        streak = gauge.streak(),
                        limit = config.stagnation_limit(),
                        "Feed stagnant, continuing"
                    );
                    view.scroll_by_one_viewport().await?;
                    FinderPhase::Collecting
                }
            }
            FinderPhase::Found(position) => break RankOutcome::Found(position),
            FinderPhase::Exhausted => {
                info!(
                    keyword = %task.keyword,
                    target = %task.target_id,
                    collected = feed.len(),
                    "Feed exhausted without a match"
                );
                break RankOutcome::Exhausted;
            }
        };
    };

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_cell_values() {
        assert_eq!(RankOutcome::Found("7".into()).as_cell(), "7");
        assert_eq!(RankOutcome::Exhausted.as_cell(), "");
        assert_eq!(RankOutcome::Skipped.as_cell(), "");
        assert_eq!(RankOutcome::Failed("boom".into()).as_cell(), "");
    }

    #[test]
    fn scan_prefers_the_earliest_duplicate() {
        let config = RankConfig::default();
        let mut feed = ResultFeed::new();
        feed.extend(&[
            "/productions/55?affect_id=7".to_string(),
            "/productions/55?affect_id=9".to_string(),
        ]);
        assert_eq!(scan_for_target(&config, &feed, "55"), Some("7".to_string()));
    }

    #[test]
    fn scan_skips_malformed_entries() {
        let config = RankConfig::default();
        let mut feed = ResultFeed::new();
        feed.extend(&[
            "/advices/55".to_string(),
            "/productions/55/selling".to_string(),
            "/productions/55?affect_id=4".to_string(),
        ]);
        assert_eq!(scan_for_target(&config, &feed, "55"), Some("4".to_string()));
    }

    #[test]
    fn scan_matches_ids_as_strings() {
        let config = RankConfig::default();
        let mut feed = ResultFeed::new();
        feed.extend(&["/productions/0042?affect_id=3".to_string()]);
        // "42" must not match "0042"; ids are strings, not integers.
        assert_eq!(scan_for_target(&config, &feed, "42"), None);
        assert_eq!(scan_for_target(&config, &feed, "0042"), Some("3".to_string()));
    }
}

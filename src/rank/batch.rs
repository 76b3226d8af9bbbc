//! Task boundary and sequential batch driver
//!
//! `run_task` is the sole error boundary of the core: any error inside a
//! task becomes `RankOutcome::Failed` so a single broken row never aborts
//! the batch, and the shared view is returned to neutral on every exit path
//! including errors. `run_batch` serializes tasks over the one shared view.

use tracing::{error, info, warn};

use super::finder::{RankOutcome, find_rank};
use super::SearchTask;
use crate::config::RankConfig;
use crate::view::SearchView;

/// Run one task to a terminal outcome, resetting the view afterwards
///
/// A skipped task (empty keyword) never touched the view, so it is also the
/// only outcome that skips the reset.
pub async fn run_task<V: SearchView + ?Sized>(
    config: &RankConfig,
    view: &V,
    task: &SearchTask,
) -> RankOutcome {
    let outcome = match find_rank(config, view, task).await {
        Ok(outcome) => outcome,
        Err(e) => {
            if e.is_fatal() {
                error!(keyword = %task.keyword, target = %task.target_id, "Task failed: {e}");
            } else {
                warn!(keyword = %task.keyword, target = %task.target_id, "Task failed: {e}");
            }
            RankOutcome::Failed(e.to_string())
        }
    };

    if outcome != RankOutcome::Skipped
        && let Err(e) = view.reset_search().await
    {
        // The next task re-submits its own query; a failed reset degrades it
        // but must not overwrite this task's outcome.
        warn!("View reset failed after task: {e}");
    }

    outcome
}

/// Run a batch of tasks sequentially against one shared view
///
/// The view is one piece of mutable shared state (query field, scroll
/// position); tasks must never run concurrently against it.
pub async fn run_batch<V: SearchView + ?Sized>(
    config: &RankConfig,
    view: &V,
    tasks: &[SearchTask],
) -> Vec<RankOutcome> {
    let mut outcomes = Vec::with_capacity(tasks.len());
    for task in tasks {
        let outcome = run_task(config, view, task).await;
        info!(
            keyword = %task.keyword,
            target = %task.target_id,
            rank = outcome.as_cell(),
            "Task resolved"
        );
        outcomes.push(outcome);
    }
    outcomes
}

//! Rank finder behavior against a scripted view
//!
//! These tests drive the collection loop through a mock `SearchView` that
//! replays staged read batches, repeating the last batch forever once the
//! script drains (which is exactly what a stagnant feed looks like).

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use storerank::error::{RankError, RankResult};
use storerank::rank::{RankOutcome, SearchTask, find_rank, run_batch, run_task};
use storerank::view::SearchView;
use storerank::RankConfig;

#[derive(Default)]
struct MockView {
    batches: Mutex<VecDeque<Vec<String>>>,
    last_batch: Mutex<Vec<String>>,
    calls: Mutex<Vec<&'static str>>,
    fail_next_scroll: AtomicBool,
}

impl MockView {
    fn scripted(batches: &[&[&str]]) -> Self {
        Self {
            batches: Mutex::new(
                batches
                    .iter()
                    .map(|batch| batch.iter().map(ToString::to_string).collect())
                    .collect(),
            ),
            ..Self::default()
        }
    }

    fn log(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    fn count(&self, call: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == call).count()
    }

    fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SearchView for MockView {
    async fn submit_query(&self, _text: &str) -> RankResult<()> {
        self.log("submit");
        Ok(())
    }

    async fn wait_for_any_result(&self) -> RankResult<()> {
        self.log("wait");
        Ok(())
    }

    async fn read_visible_entries(&self) -> RankResult<Vec<String>> {
        self.log("read");
        let mut batches = self.batches.lock().unwrap();
        let batch = match batches.pop_front() {
            Some(batch) => {
                *self.last_batch.lock().unwrap() = batch.clone();
                batch
            }
            None => self.last_batch.lock().unwrap().clone(),
        };
        Ok(batch)
    }

    async fn scroll_by_one_viewport(&self) -> RankResult<()> {
        self.log("scroll");
        if self.fail_next_scroll.swap(false, Ordering::SeqCst) {
            return Err(RankError::Browser("scroll eval rejected".to_string()));
        }
        Ok(())
    }

    async fn reset_search(&self) -> RankResult<()> {
        self.log("reset");
        Ok(())
    }
}

fn config() -> RankConfig {
    RankConfig::default()
}

#[tokio::test]
async fn empty_keyword_returns_skipped_without_view_calls() {
    let view = MockView::scripted(&[]);
    let outcome = find_rank(&config(), &view, &SearchTask::new("", "200"))
        .await
        .unwrap();
    assert_eq!(outcome, RankOutcome::Skipped);
    assert_eq!(view.total_calls(), 0);
}

#[tokio::test]
async fn skipped_task_also_skips_the_view_reset() {
    let view = MockView::scripted(&[]);
    let outcome = run_task(&config(), &view, &SearchTask::new("  ", "200")).await;
    assert_eq!(outcome, RankOutcome::Skipped);
    assert_eq!(view.total_calls(), 0);
}

#[tokio::test]
async fn match_on_first_render_needs_no_scroll() {
    let view = MockView::scripted(&[&["https://ohou.se/productions/100/selling?affect_id=3"]]);
    let outcome = find_rank(&config(), &view, &SearchTask::new("sofa", "100"))
        .await
        .unwrap();
    assert_eq!(outcome, RankOutcome::Found("3".to_string()));
    assert_eq!(view.count("scroll"), 0);
    assert_eq!(view.count("submit"), 1);
}

#[tokio::test]
async fn scrolls_until_the_target_is_appended() {
    let view = MockView::scripted(&[
        &["/productions/1?affect_id=1", "/productions/2?affect_id=2"],
        &[
            "/productions/1?affect_id=1",
            "/productions/2?affect_id=2",
            "/productions/3?affect_id=3",
        ],
        &[
            "/productions/2?affect_id=2",
            "/productions/3?affect_id=3",
            "/productions/77?affect_id=12",
        ],
    ]);
    let outcome = find_rank(&config(), &view, &SearchTask::new("lamp", "77"))
        .await
        .unwrap();
    assert_eq!(outcome, RankOutcome::Found("12".to_string()));
    assert_eq!(view.count("scroll"), 2);
    // Every read cycle waited for a render first.
    assert_eq!(view.count("wait"), view.count("read"));
}

#[tokio::test]
async fn stagnant_feed_exhausts_in_exactly_the_limit() {
    let view = MockView::scripted(&[&[
        "/productions/1?affect_id=1",
        "/productions/2?affect_id=2",
        "/productions/3?affect_id=3",
        "/productions/4?affect_id=4",
    ]]);
    let outcome = find_rank(&config(), &view, &SearchTask::new("lamp", "999999"))
        .await
        .unwrap();
    assert_eq!(outcome, RankOutcome::Exhausted);
    // The gauge reaches the limit of 100 on the 100th identical cycle; the
    // terminal cycle does not scroll.
    assert_eq!(view.count("read"), 100);
    assert_eq!(view.count("scroll"), 99);
}

#[tokio::test]
async fn first_match_wins_over_a_later_duplicate() {
    let view = MockView::scripted(&[&[
        "/productions/55?affect_id=7",
        "/productions/55?affect_id=9",
    ]]);
    let outcome = find_rank(&config(), &view, &SearchTask::new("chair", "55"))
        .await
        .unwrap();
    assert_eq!(outcome, RankOutcome::Found("7".to_string()));
}

#[tokio::test]
async fn duplicate_re_reads_do_not_shift_the_answer() {
    // The feed re-serves earlier entries every cycle; dedup must keep the
    // target's first-seen position even though it reappears later.
    let view = MockView::scripted(&[
        &["/productions/8?affect_id=1", "/productions/9?affect_id=2"],
        &[
            "/productions/8?affect_id=1",
            "/productions/9?affect_id=2",
            "/productions/10?affect_id=3",
            "/productions/9?affect_id=2",
        ],
    ]);
    let outcome = find_rank(&config(), &view, &SearchTask::new("desk", "10"))
        .await
        .unwrap();
    assert_eq!(outcome, RankOutcome::Found("3".to_string()));
}

#[tokio::test]
async fn leading_zeros_match_exactly() {
    let view = MockView::scripted(&[&["/productions/0042/selling?affect_id=007"]]);
    let outcome = find_rank(&config(), &view, &SearchTask::new("rug", "0042"))
        .await
        .unwrap();
    assert_eq!(outcome, RankOutcome::Found("007".to_string()));
}

#[tokio::test]
async fn task_failure_is_isolated_and_the_batch_continues() {
    let view = MockView::scripted(&[
        &["/productions/999?affect_id=1"],
        &["/productions/200?affect_id=5"],
    ]);
    view.fail_next_scroll.store(true, Ordering::SeqCst);

    let tasks = vec![
        SearchTask::new("sofa", "100"),
        SearchTask::new("lamp", "200"),
    ];
    let outcomes = run_batch(&config(), &view, &tasks).await;

    assert!(matches!(outcomes[0], RankOutcome::Failed(_)));
    assert_eq!(outcomes[1], RankOutcome::Found("5".to_string()));
    // The view was reset after the failed task as well as the successful one.
    assert_eq!(view.count("reset"), 2);
}

#[tokio::test]
async fn three_row_scenario_writes_rank_then_two_empty_cells() {
    let view = MockView::scripted(&[
        // "sofa" surfaces the target on the first render.
        &["/productions/100?affect_id=3"],
        // "lamp" never matches; this batch then repeats until exhaustion.
        &[
            "/productions/1?affect_id=1",
            "/productions/2?affect_id=2",
            "/productions/3?affect_id=3",
            "/productions/4?affect_id=4",
        ],
    ]);
    let tasks = vec![
        SearchTask::new("sofa", "100"),
        SearchTask::new("", "200"),
        SearchTask::new("lamp", "999999"),
    ];
    let outcomes = run_batch(&config(), &view, &tasks).await;

    let cells: Vec<&str> = outcomes.iter().map(RankOutcome::as_cell).collect();
    assert_eq!(cells, vec!["3", "", ""]);
    assert_eq!(outcomes[1], RankOutcome::Skipped);
    assert_eq!(outcomes[2], RankOutcome::Exhausted);
    // Two real searches ran; the keyword-less row never touched the view.
    assert_eq!(view.count("submit"), 2);
    assert_eq!(view.count("reset"), 2);
}

#[tokio::test]
async fn tasks_build_from_ragged_sheet_rows() {
    let full = SearchTask::from_row(&["sofa".to_string(), "100".to_string()]);
    assert_eq!(full, SearchTask::new("sofa", "100"));

    let keyword_only = SearchTask::from_row(&["lamp".to_string()]);
    assert_eq!(keyword_only, SearchTask::new("lamp", ""));

    let empty = SearchTask::from_row(&[]);
    assert_eq!(empty, SearchTask::new("", ""));
}

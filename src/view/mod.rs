//! The live-document view the rank finder drives
//!
//! The finder never talks to chromiumoxide directly; it goes through
//! [`SearchView`], which keeps the collection loop testable against a
//! scripted double and keeps every piece of shared mutable page state
//! (scroll position, query field) behind one explicit seam.

mod store_page;

pub use store_page::StorePage;

use async_trait::async_trait;

use crate::error::RankResult;

/// Operations the rank finder needs from a rendered search feed
///
/// One `SearchView` is shared sequentially across a batch of tasks; callers
/// must invoke [`SearchView::reset_search`] between tasks so the next task
/// starts from a neutral query field and scroll position.
#[async_trait]
pub trait SearchView: Send + Sync {
    /// Type `text` into the search input and trigger the search
    async fn submit_query(&self, text: &str) -> RankResult<()>;

    /// Block until at least one result entry is rendered
    ///
    /// A genuine wait condition, not a fixed delay; implementations poll the
    /// DOM until the first feed item exists or their render budget expires.
    async fn wait_for_any_result(&self) -> RankResult<()>;

    /// Read the reference strings of all currently-rendered entries, in feed order
    async fn read_visible_entries(&self) -> RankResult<Vec<String>>;

    /// Scroll the viewport down by one page height
    async fn scroll_by_one_viewport(&self) -> RankResult<()>;

    /// Return the view to neutral: clear the query (best-effort) and scroll to top
    async fn reset_search(&self) -> RankResult<()>;
}

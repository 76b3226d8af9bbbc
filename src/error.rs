//! Error types for rank discovery and spreadsheet I/O
//!
//! A single task's failure is recovered at the batch boundary (the row gets
//! an empty rank cell); these variants exist so the reason stays inspectable
//! for logging and tests rather than being swallowed.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for rank operations
pub type RankResult<T> = Result<T, RankError>;

/// Error types for rank discovery operations
#[derive(Debug, Error)]
pub enum RankError {
    /// Browser-level failure (CDP channel, page gone, eval rejected)
    #[error("browser error: {0}")]
    Browser(String),

    /// An expected element never appeared in the DOM
    #[error("element not found for selector '{0}'")]
    Selector(String),

    /// Page navigation failed
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// Results never rendered within the wait budget
    #[error("timed out after {0:?} waiting for results to render")]
    RenderTimeout(Duration),

    /// Sheets API rejected a request or returned an unusable body
    #[error("sheets API error: {0}")]
    Sheets(String),

    /// Non-success HTTP status from the Sheets API
    #[error("unexpected response ({status}): {body}")]
    Response { status: u16, body: String },

    /// Missing credential or environment configuration
    #[error("missing configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<chromiumoxide::error::CdpError> for RankError {
    fn from(error: chromiumoxide::error::CdpError) -> Self {
        RankError::Browser(error.to_string())
    }
}

impl RankError {
    /// Whether this error poisons the whole batch rather than a single task
    ///
    /// A dead browser channel means every later task on the same view would
    /// fail the same way; callers may choose to stop early and report a batch
    /// failure instead of writing a column of empty cells.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, RankError::Browser(msg) if msg.contains("channel") || msg.contains("closed"))
    }
}

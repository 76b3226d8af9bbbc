pub mod browser;
pub mod config;
pub mod error;
pub mod rank;
pub mod server;
pub mod sheets;
pub mod view;

pub use browser::{BrowserHandle, launch_browser, open_store_page};
pub use config::{RankConfig, RankConfigBuilder};
pub use error::{RankError, RankResult};
pub use rank::{RankOutcome, SearchTask, find_rank, run_batch, run_task};
pub use sheets::{RowStore, SheetsClient};
pub use view::{SearchView, StorePage};

//! Sheets v4 REST client
//!
//! Thin glue: read the keyword/target rows, insert and tint one rank column,
//! write the timestamp header plus rank cells. Authentication is outside the
//! process boundary; the client takes a ready bearer token (typically from
//! `GOOGLE_SHEETS_TOKEN`).

use async_trait::async_trait;
use chrono::Local;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::types::{self, BatchUpdateBody, SpreadsheetMeta, ValueRange, ValuesResponse};
use super::{RowStore, rank_header_at};
use crate::config::RankConfig;
use crate::error::{RankError, RankResult};
use crate::rank::{RankOutcome, SearchTask};

const SHEETS_API: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// One spreadsheet tab, bound to the configured read/write anchors
pub struct SheetsClient {
    http: reqwest::Client,
    token: String,
    spreadsheet_id: String,
    sheet_name: String,
    sheet_id: i64,
    read_range: String,
    rank_column_index: u32,
    header_row_index: u32,
}

impl SheetsClient {
    /// Bind to a spreadsheet tab, resolving the grid id by title when the
    /// caller only knows the tab name
    pub async fn connect(
        config: &RankConfig,
        spreadsheet_id: impl Into<String>,
        sheet_name: impl Into<String>,
        sheet_id: Option<i64>,
        token: impl Into<String>,
    ) -> RankResult<Self> {
        let mut client = Self {
            http: reqwest::Client::new(),
            token: token.into(),
            spreadsheet_id: spreadsheet_id.into(),
            sheet_name: sheet_name.into(),
            sheet_id: sheet_id.unwrap_or(-1),
            read_range: config.read_range().to_string(),
            rank_column_index: config.rank_column_index(),
            header_row_index: config.header_row_index(),
        };
        if sheet_id.is_none() {
            let title = client.sheet_name.clone();
            client.sheet_id = client.sheet_id_by_title(&title).await?;
        }
        Ok(client)
    }

    /// Bearer token for the Sheets API, read from the environment
    pub fn token_from_env() -> RankResult<String> {
        std::env::var("GOOGLE_SHEETS_TOKEN")
            .map_err(|_| RankError::Config("GOOGLE_SHEETS_TOKEN is not set".to_string()))
    }

    /// Numeric grid id of a tab, looked up by its title
    pub async fn sheet_id_by_title(&self, title: &str) -> RankResult<i64> {
        let url = format!(
            "{SHEETS_API}/{}?fields=sheets.properties",
            self.spreadsheet_id
        );
        let meta: SpreadsheetMeta = self.get_json(&url).await?;
        meta.sheets
            .into_iter()
            .map(|sheet| sheet.properties)
            .find(|properties| properties.title == title)
            .map(|properties| properties.sheet_id)
            .ok_or_else(|| RankError::Sheets(format!("sheet '{title}' not found")))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> RankResult<T> {
        let response = self
            .http
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .send()
            .await?;
        Self::check(response).await?.json::<T>().await.map_err(Into::into)
    }

    async fn check(response: reqwest::Response) -> RankResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(RankError::Response {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            })
        }
    }

    /// A1 range the rank cells land in, e.g. `오집!I6:I26`
    fn write_range(&self, rows: usize) -> String {
        let column = column_letter(self.rank_column_index);
        let first_row = self.header_row_index + 1;
        format!(
            "{}!{column}{first_row}:{column}{}",
            self.sheet_name,
            first_row as usize + rows
        )
    }
}

#[async_trait]
impl RowStore for SheetsClient {
    async fn read_tasks(&self) -> RankResult<Vec<SearchTask>> {
        let url = format!(
            "{SHEETS_API}/{}/values/{}!{}",
            self.spreadsheet_id, self.sheet_name, self.read_range
        );
        let body: ValuesResponse = self.get_json(&url).await?;
        let tasks: Vec<SearchTask> = body
            .values
            .iter()
            .map(|row| SearchTask::from_row(row))
            .collect();
        info!("Read {} keyword rows from sheet '{}'", tasks.len(), self.sheet_name);
        Ok(tasks)
    }

    async fn write_ranks(&self, outcomes: &[RankOutcome]) -> RankResult<()> {
        // Insert the new column and tint its header cell first, so the value
        // write below lands in a fresh column and older runs shift right.
        let requests: BatchUpdateBody = types::rank_column_requests(
            self.sheet_id,
            self.rank_column_index,
            self.header_row_index,
        );
        let url = format!("{SHEETS_API}/{}:batchUpdate", self.spreadsheet_id);
        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&requests)
            .send()
            .await?;
        Self::check(response).await?;
        debug!("Rank column inserted at index {}", self.rank_column_index);

        let mut values = Vec::with_capacity(outcomes.len() + 1);
        values.push(vec![rank_header_at(Local::now())]);
        values.extend(outcomes.iter().map(|o| vec![o.as_cell().to_string()]));

        let range = self.write_range(outcomes.len());
        let url = format!(
            "{SHEETS_API}/{}/values/{range}?valueInputOption=RAW",
            self.spreadsheet_id
        );
        let response = self
            .http
            .put(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&ValueRange { values })
            .send()
            .await?;
        Self::check(response).await?;
        info!("Wrote {} rank cells to {range}", outcomes.len());
        Ok(())
    }
}

/// A1 letter for a zero-based column index
fn column_letter(index: u32) -> String {
    let mut letters = Vec::new();
    let mut remainder = index;
    loop {
        letters.push(b'A' + (remainder % 26) as u8);
        if remainder < 26 {
            break;
        }
        remainder = remainder / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_letters() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(8), "I");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(27), "AB");
    }
}

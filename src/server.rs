//! Trigger endpoint
//!
//! `POST /trigger` with `{sheetId, sheetName, spreadsheetId}` runs one full
//! batch: read the keyword rows, drive the storefront, write the rank
//! column. Missing required fields are rejected before any task runs; a
//! batch that cannot start writes nothing.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::browser::{launch_browser, open_store_page};
use crate::config::RankConfig;
use crate::rank::run_batch;
use crate::sheets::{RowStore, SheetsClient};
use crate::view::StorePage;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerRequest {
    /// Numeric grid id; resolved from `sheet_name` when absent
    pub sheet_id: Option<i64>,
    pub sheet_name: Option<String>,
    pub spreadsheet_id: Option<String>,
}

pub fn router(config: Arc<RankConfig>) -> Router {
    Router::new()
        .route("/trigger", post(trigger))
        .layer(TraceLayer::new_for_http())
        .with_state(config)
}

async fn trigger(
    State(config): State<Arc<RankConfig>>,
    Json(request): Json<TriggerRequest>,
) -> Response {
    let (Some(sheet_name), Some(spreadsheet_id)) =
        (request.sheet_name.clone(), request.spreadsheet_id.clone())
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "sheetName and spreadsheetId are required" })),
        )
            .into_response();
    };

    match run_trigger(&config, &spreadsheet_id, &sheet_name, request.sheet_id).await {
        Ok(rows) => {
            info!("Batch complete: {rows} rows updated");
            (StatusCode::OK, Json(json!({ "status": "success" }))).into_response()
        }
        Err(e) => {
            error!("Batch failed: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// One whole batch, start to finish
///
/// Any error here is a batch failure: either nothing has been written yet
/// (rows unreadable, browser won't launch) or the final write itself failed.
/// Individual task failures never propagate this far.
async fn run_trigger(
    config: &RankConfig,
    spreadsheet_id: &str,
    sheet_name: &str,
    sheet_id: Option<i64>,
) -> anyhow::Result<usize> {
    let token = SheetsClient::token_from_env()?;
    let sheet = SheetsClient::connect(config, spreadsheet_id, sheet_name, sheet_id, token).await?;

    let tasks = sheet.read_tasks().await?;
    info!("Starting batch of {} tasks", tasks.len());

    let browser = launch_browser(config).await?;
    let page = open_store_page(&browser, config).await?;
    let view = StorePage::new(page, config);

    let outcomes = run_batch(config, &view, &tasks).await;
    drop(browser);

    sheet.write_ranks(&outcomes).await?;
    Ok(outcomes.len())
}

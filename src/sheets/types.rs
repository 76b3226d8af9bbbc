//! Wire types for the Sheets v4 REST API
//!
//! Only the slices of the API this crate touches: `values.get`,
//! `values.update`, the spreadsheet metadata lookup, and the `batchUpdate`
//! pair that inserts the rank column and tints its header cell.

use serde::{Deserialize, Serialize};

/// Header cell tint for a freshly inserted rank column
pub const HEADER_TINT: Color = Color {
    red: 1.0,
    green: 0.949,
    blue: 0.8,
};

#[derive(Debug, Clone, Deserialize)]
pub struct ValuesResponse {
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValueRange {
    pub values: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpreadsheetMeta {
    #[serde(default)]
    pub sheets: Vec<SheetMeta>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SheetMeta {
    pub properties: SheetProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    pub sheet_id: i64,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchUpdateBody {
    pub requests: Vec<Request>,
}

/// One batchUpdate request; exactly one field set per entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_dimension: Option<InsertDimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_cell: Option<RepeatCell>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertDimension {
    pub range: DimensionRange,
    pub inherit_from_before: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionRange {
    pub sheet_id: i64,
    pub dimension: String,
    pub start_index: u32,
    pub end_index: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatCell {
    pub range: GridRange,
    pub cell: CellData,
    pub fields: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRange {
    pub sheet_id: i64,
    pub start_row_index: u32,
    pub end_row_index: u32,
    pub start_column_index: u32,
    pub end_column_index: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellData {
    pub user_entered_format: CellFormat,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellFormat {
    pub background_color: Color,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

/// The insert-column + tint-header request pair for one rank column
#[must_use]
pub fn rank_column_requests(sheet_id: i64, column_index: u32, header_row_index: u32) -> BatchUpdateBody {
    BatchUpdateBody {
        requests: vec![
            Request {
                insert_dimension: Some(InsertDimension {
                    range: DimensionRange {
                        sheet_id,
                        dimension: "COLUMNS".to_string(),
                        start_index: column_index,
                        end_index: column_index + 1,
                    },
                    inherit_from_before: false,
                }),
                repeat_cell: None,
            },
            Request {
                insert_dimension: None,
                repeat_cell: Some(RepeatCell {
                    range: GridRange {
                        sheet_id,
                        start_row_index: header_row_index,
                        end_row_index: header_row_index + 1,
                        start_column_index: column_index,
                        end_column_index: column_index + 1,
                    },
                    cell: CellData {
                        user_entered_format: CellFormat {
                            background_color: HEADER_TINT,
                        },
                    },
                    fields: "userEnteredFormat.backgroundColor".to_string(),
                }),
            },
        ],
    }
}

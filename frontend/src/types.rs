//! Common types used across the frontend application.
//!
//! This module centralizes type definitions to avoid duplication
//! and ensure consistency across components.
//!
//! # Categories
//!
//! - **Notification Types** - Toast severities
//! - **API Types** - Request and response bodies of the spreadsheet server
//! - **Error Types** - Frontend error handling

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

// =============================================================================
// Notification Types
// =============================================================================

/// Toast severity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastKind {
    /// Neutral hint, also used for guards that stop a request
    #[default]
    Info,
    /// Completed step
    Success,
    /// Failed step or rejected input
    Error,
}

impl ToastKind {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Info => "toast-info",
            ToastKind::Success => "toast-success",
            ToastKind::Error => "toast-error",
        }
    }
}

// =============================================================================
// API Types - analysis workflow
// =============================================================================

/// Response of `/api/upload_for_analysis`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisUpload {
    /// Name the server stored the file under
    pub file_name: String,
    /// Sheet names, in workbook order
    pub sheets: Vec<String>,
    /// Columns of the first sheet
    #[serde(deserialize_with = "column_labels")]
    pub columns: Vec<String>,
}

/// Body of `/api/get_columns_for_analysis`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnsRequest {
    pub sheet_name: String,
}

/// Response of `/api/get_columns_for_analysis`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColumnsResponse {
    #[serde(deserialize_with = "column_labels")]
    pub columns: Vec<String>,
}

/// Body of `/api/analyze`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub sheet_title: String,
    pub columns: Vec<String>,
}

/// Response of `/api/analyze`: the rows the server flagged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Columns to display, in request order
    pub headers: Vec<String>,
    pub rows: Vec<FlaggedRow>,
}

/// A row flagged as inconsistent.
///
/// The server sends the checked cells as top-level keys next to `rowIndex`
/// and `issue`, so they are collected by flattening.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlaggedRow {
    /// Spreadsheet row number, as understood by the staging endpoint
    pub row_index: u32,
    /// Why the row was flagged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    #[serde(flatten)]
    pub cells: Map<String, Value>,
}

impl FlaggedRow {
    /// Display text of a cell; missing and null cells render empty.
    pub fn cell_text(&self, header: &str) -> String {
        match self.cells.get(header) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Body of `/api/stage_tab_changes`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageRequest {
    pub sheet_title: String,
    pub rows_to_remove: Vec<u32>,
}

/// Response of `/api/stage_tab_changes`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// API Types - update workflow
// =============================================================================

/// Response of `/api/upload_base` and `/api/upload_update`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetList {
    #[serde(default)]
    pub file_name: Option<String>,
    pub sheets: Vec<String>,
}

/// Body of `/api/get_common_columns`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonColumnsRequest {
    pub base_sheet: String,
    pub update_sheet: String,
}

/// Response of `/api/get_common_columns`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonColumnsResponse {
    #[serde(deserialize_with = "column_labels")]
    pub common_columns: Vec<String>,
}

/// Header labels come straight from the sheet, so a year or code in a
/// header cell arrives as a JSON number. Numbers and booleans are kept as
/// their text form.
fn column_labels<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<Value>::deserialize(deserializer)?
        .into_iter()
        .map(|label| match label {
            Value::String(text) => Ok(text),
            Value::Number(number) => Ok(number.to_string()),
            Value::Bool(flag) => Ok(flag.to_string()),
            other => Err(de::Error::custom(format!("unsupported column label: {}", other))),
        })
        .collect()
}

/// One queued merge: rows of `update_tab` replace rows of `base_tab`
/// matched on `key_column`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeInstruction {
    pub base_tab: String,
    pub update_tab: String,
    pub key_column: String,
}

impl MergeInstruction {
    /// Human-readable line shown in the queue.
    pub fn describe(&self) -> String {
        format!(
            "Update sheet {} with {} using key {}",
            self.base_tab, self.update_tab, self.key_column
        )
    }
}

/// Body of `/api/process_multi_tab_update`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MultiTabUpdateRequest {
    pub instructions: Vec<MergeInstruction>,
}

/// Error body returned with any non-2xx status.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
///
/// `Display` is the text shown to the user, so server messages pass through
/// untouched.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AppError {
    /// Input rejected before any request was sent.
    #[error("{0}")]
    Validation(String),

    /// Non-2xx response from the server.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The request never completed.
    #[error("{0}")]
    Network(String),

    /// The response body could not be read or decoded.
    #[error("{0}")]
    Parse(String),

    /// A browser API (Blob, object URL, location) failed.
    #[error("{0}")]
    Browser(String),
}

impl AppError {
    /// Build the error for a failed response from its status and raw body.
    ///
    /// Uses the body's `error` field when present and non-empty.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.error)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        AppError::Server { status, message }
    }
}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;

//! HTTP client for the spreadsheet server.
//!
//! Every call maps a non-2xx status to [`AppError::Server`] carrying the
//! body's `error` field, transport failures to [`AppError::Network`] and
//! undecodable bodies to [`AppError::Parse`].

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::File;

use super::disposition::file_name_from_disposition;
use super::upload::upload_spreadsheet;
use crate::{
    AnalysisReport, AnalysisUpload, AnalyzeRequest, AppError, AppResult, ColumnsRequest,
    ColumnsResponse, CommonColumnsRequest, CommonColumnsResponse, MultiTabUpdateRequest,
    SheetList, StageRequest, StageResponse, BACKEND_URL, DEFAULT_ANALYSIS_DOWNLOAD,
    DEFAULT_UPDATE_DOWNLOAD,
};

/// Endpoint paths, relative to the backend URL.
pub mod endpoint {
    pub const UPLOAD_FOR_ANALYSIS: &str = "/api/upload_for_analysis";
    pub const COLUMNS_FOR_ANALYSIS: &str = "/api/get_columns_for_analysis";
    pub const ANALYZE: &str = "/api/analyze";
    pub const STAGE_TAB_CHANGES: &str = "/api/stage_tab_changes";
    pub const PROCESS_ALL_STAGED_CHANGES: &str = "/api/process_all_staged_changes";
    pub const UPLOAD_BASE: &str = "/api/upload_base";
    pub const UPLOAD_UPDATE: &str = "/api/upload_update";
    pub const COMMON_COLUMNS: &str = "/api/get_common_columns";
    pub const PROCESS_MULTI_TAB_UPDATE: &str = "/api/process_multi_tab_update";
}

/// A file returned by one of the export endpoints.
#[derive(Clone, Debug, PartialEq)]
pub struct Download {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Client bound to one backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApiClient {
    base_url: &'static str,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(BACKEND_URL)
    }
}

impl ApiClient {
    pub fn new(base_url: &'static str) -> Self {
        Self { base_url }
    }

    /// Absolute (or same-origin) URL of an endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    // -------------------------------------------------------------------------
    // Analysis workflow
    // -------------------------------------------------------------------------

    pub async fn upload_for_analysis(&self, file: &File) -> AppResult<AnalysisUpload> {
        upload_spreadsheet(&self.url(endpoint::UPLOAD_FOR_ANALYSIS), file).await
    }

    pub async fn columns_for_analysis(&self, sheet_name: &str) -> AppResult<Vec<String>> {
        let body = ColumnsRequest { sheet_name: sheet_name.to_string() };
        let response: ColumnsResponse = self.post_json(endpoint::COLUMNS_FOR_ANALYSIS, &body).await?;
        Ok(response.columns)
    }

    pub async fn analyze(&self, request: &AnalyzeRequest) -> AppResult<AnalysisReport> {
        self.post_json(endpoint::ANALYZE, request).await
    }

    pub async fn stage_tab_changes(&self, request: &StageRequest) -> AppResult<StageResponse> {
        self.post_json(endpoint::STAGE_TAB_CHANGES, request).await
    }

    /// Consolidate every staged sheet into one workbook.
    pub async fn process_all_staged_changes(&self) -> AppResult<Download> {
        let response = Request::post(&self.url(endpoint::PROCESS_ALL_STAGED_CHANGES))
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;
        read_download(response, DEFAULT_ANALYSIS_DOWNLOAD).await
    }

    // -------------------------------------------------------------------------
    // Update workflow
    // -------------------------------------------------------------------------

    pub async fn upload_base(&self, file: &File) -> AppResult<SheetList> {
        upload_spreadsheet(&self.url(endpoint::UPLOAD_BASE), file).await
    }

    pub async fn upload_update(&self, file: &File) -> AppResult<SheetList> {
        upload_spreadsheet(&self.url(endpoint::UPLOAD_UPDATE), file).await
    }

    pub async fn common_columns(&self, request: &CommonColumnsRequest) -> AppResult<Vec<String>> {
        let response: CommonColumnsResponse = self.post_json(endpoint::COMMON_COLUMNS, request).await?;
        Ok(response.common_columns)
    }

    /// Run the whole merge queue and fetch the merged workbook.
    pub async fn process_multi_tab_update(&self, request: &MultiTabUpdateRequest) -> AppResult<Download> {
        let response = Request::post(&self.url(endpoint::PROCESS_MULTI_TAB_UPDATE))
            .json(request)
            .map_err(|e| AppError::Parse(format!("Failed to encode request: {}", e)))?
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;
        read_download(response, DEFAULT_UPDATE_DOWNLOAD).await
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> AppResult<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let response = Request::post(&self.url(path))
            .json(body)
            .map_err(|e| AppError::Parse(format!("Failed to encode request: {}", e)))?
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;
        read_json(response).await
    }
}

/// Decode a JSON success body, or turn the response into an error.
pub(crate) async fn read_json<R: DeserializeOwned>(response: Response) -> AppResult<R> {
    if !response.ok() {
        return Err(reject(response).await);
    }
    response
        .json::<R>()
        .await
        .map_err(|e| AppError::Parse(format!("Failed to parse response: {}", e)))
}

async fn read_download(response: Response, fallback: &str) -> AppResult<Download> {
    if !response.ok() {
        return Err(reject(response).await);
    }
    let headers = response.headers();
    let file_name = file_name_from_disposition(headers.get("content-disposition").as_deref(), fallback);
    let content_type = headers.get("content-type");
    let bytes = response
        .binary()
        .await
        .map_err(|e| AppError::Parse(format!("Failed to read file: {}", e)))?;
    log::info!("📥 Received {} ({} bytes)", file_name, bytes.len());
    Ok(Download { file_name, content_type, bytes })
}

async fn reject(response: Response) -> AppError {
    let status = response.status();
    let url = response.url();
    let body = response.text().await.unwrap_or_default();
    let err = AppError::from_response(status, &body);
    log::error!("❌ {} {}: {}", status, url, err);
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_origin_urls() {
        let client = ApiClient::new("");
        assert_eq!(client.url(endpoint::ANALYZE), "/api/analyze");
    }

    #[test]
    fn test_trailing_slash_is_not_doubled() {
        let client = ApiClient::new("http://localhost:5000/");
        assert_eq!(
            client.url(endpoint::PROCESS_MULTI_TAB_UPDATE),
            "http://localhost:5000/api/process_multi_tab_update"
        );
    }

    #[test]
    fn test_default_client_uses_configured_backend() {
        assert_eq!(ApiClient::default(), ApiClient::new(BACKEND_URL));
    }
}

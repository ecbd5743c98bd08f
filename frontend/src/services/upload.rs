//! Multipart upload of a spreadsheet to the backend.

use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use web_sys::{File, FormData};

use super::api::read_json;
use crate::{AppError, AppResult, MAX_FILE_SIZE};

/// Refuse files above [`MAX_FILE_SIZE`] before sending them.
pub fn check_file_size(size: f64) -> AppResult<()> {
    if size > MAX_FILE_SIZE as f64 {
        return Err(AppError::Validation(format!(
            "File is too large ({:.1} MB, limit {} MB).",
            size / (1024.0 * 1024.0),
            MAX_FILE_SIZE / (1024 * 1024)
        )));
    }
    Ok(())
}

/// Post `file` as the `file` field of a multipart form and decode the reply.
pub async fn upload_spreadsheet<R: DeserializeOwned>(url: &str, file: &File) -> AppResult<R> {
    check_file_size(file.size())?;

    let form_data = FormData::new()
        .map_err(|e| AppError::Browser(format!("Failed to create FormData: {:?}", e)))?;
    form_data
        .append_with_blob_and_filename("file", file, &file.name())
        .map_err(|e| AppError::Browser(format!("Failed to append file: {:?}", e)))?;

    log::info!("📤 Uploading {} to {}", file.name(), url);

    let response = Request::post(url)
        .body(form_data)
        .map_err(|e| AppError::Browser(format!("Failed to build request: {}", e)))?
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;

    read_json(response).await
}

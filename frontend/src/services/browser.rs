//! Browser-side effects: saving a download and reloading the page.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use super::api::Download;
use crate::{AppError, AppResult};

fn js_error(context: &str, value: JsValue) -> AppError {
    AppError::Browser(format!("{}: {:?}", context, value))
}

/// Hand the file to the browser as a download.
///
/// The object URL is revoked once the anchor was clicked.
pub fn save_download(download: &Download) -> AppResult<()> {
    let window = web_sys::window().ok_or_else(|| AppError::Browser("No global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| AppError::Browser("No document on window".into()))?;

    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(download.bytes.as_slice()));
    let options = BlobPropertyBag::new();
    if let Some(content_type) = &download.content_type {
        options.set_type(content_type);
    }
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| js_error("Failed to create file", e))?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| js_error("Failed to create download link", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| js_error("Failed to create download link", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| AppError::Browser("Download link is not an anchor".into()))?;
    anchor.set_href(&url);
    anchor.set_download(&download.file_name);
    anchor.click();
    anchor.remove();

    Url::revoke_object_url(&url).map_err(|e| js_error("Failed to release download link", e))?;
    log::info!("💾 Saved {}", download.file_name);
    Ok(())
}

/// Full page reload; the only way back to the workflow choice.
pub fn reload_page() -> AppResult<()> {
    let window = web_sys::window().ok_or_else(|| AppError::Browser("No global window".into()))?;
    window
        .location()
        .reload()
        .map_err(|e| js_error("Failed to reload", e))
}

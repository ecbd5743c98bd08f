//! Application configuration.
//!
//! Centralized configuration for the Sheetflow frontend. Values are fixed at
//! build time; only the backend URL can be overridden through the
//! `SHEETFLOW_BACKEND_URL` environment variable when running trunk.

/// Backend API base URL.
///
/// Empty means the page and the API share an origin, which is how the
/// spreadsheet server serves this bundle. When pointing at another origin the
/// server must expose the `Content-Disposition` header for downloads to keep
/// their names.
pub const BACKEND_URL: &str = match option_env!("SHEETFLOW_BACKEND_URL") {
    Some(url) => url,
    None => "",
};

/// Application name, used for the page title and header.
pub const APP_NAME: &str = "Sheetflow";

/// File types offered by the upload pickers.
pub const ACCEPTED_FILE_TYPES: &str = ".xlsx,.xls,.xlsm";

/// Maximum file size for upload (in bytes).
///
/// 50 MB limit.
pub const MAX_FILE_SIZE: usize = 50 * 1024 * 1024;

/// Delay before a freshly inserted toast gets its `show` class.
pub const TOAST_REVEAL_DELAY_MS: u32 = 100;

/// How long a toast stays fully visible.
pub const TOAST_DISPLAY_MS: u32 = 5_000;

/// Fade-out time between hiding a toast and removing it.
pub const TOAST_FADE_MS: u32 = 500;

/// Download name when the consolidated analysis export carries no filename.
pub const DEFAULT_ANALYSIS_DOWNLOAD: &str = "processed_final.xlsx";

/// Download name when the merged update export carries no filename.
pub const DEFAULT_UPDATE_DOWNLOAD: &str = "updated.xlsx";

//! Backend and browser services.
//!
//! This module provides services for external communication:
//!
//! # Services
//!
//! - [`api`] - JSON and download endpoints of the spreadsheet server
//! - [`upload`] - Multipart spreadsheet upload
//! - [`disposition`] - Download filename from `Content-Disposition`
//! - [`browser`] - Saving downloads and reloading the page

pub mod api;
pub mod browser;
pub mod disposition;
pub mod upload;

pub use api::*;
pub use browser::*;
pub use disposition::*;
pub use upload::*;

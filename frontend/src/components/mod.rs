//! UI Components for the Sheetflow application.
//!
//! This module contains all Leptos components organized by function:
//!
//! # Layout Components
//! - [`Header`] - Title bar showing the active workflow
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`WorkflowChoice`] / [`BackButton`] - Workflow selection and reset
//! - [`AnalysisWorkflow`] - Inconsistency review wizard
//! - [`UpdateWorkflow`] - Multi-sheet update wizard
//! - [`FileUploadForm`] - Spreadsheet picker shared by both wizards
//! - [`FlaggedRowsTable`] - Flagged rows with removal checkboxes
//! - [`MergeQueueList`] - Queued merge instructions
//! - [`LoaderOverlay`] / [`ToastStack`] - Notifications driven by [`Notifier`]

mod analysis;
mod choice;
mod flagged_rows;
mod footer;
mod header;
mod hero;
mod merge_queue;
mod notify;
mod update;
mod upload;

pub use analysis::*;
pub use choice::*;
pub use flagged_rows::*;
pub use footer::*;
pub use header::*;
pub use hero::*;
pub use merge_queue::*;
pub use notify::*;
pub use update::*;
pub use upload::*;

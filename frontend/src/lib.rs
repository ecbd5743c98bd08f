//! Sheetflow - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for reviewing spreadsheet inconsistencies and
//! merging updated workbooks. All spreadsheet processing happens on the
//! server; this crate drives the two wizards against its HTTP API.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (active workflow)                                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                                                 │
//! │  ├── Hero + WorkflowChoice (until a workflow is picked)      │
//! │  ├── AnalysisWorkflow  (upload → analyse → stage → export)   │
//! │  └── UpdateWorkflow    (base → update → queue → export)      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  LoaderOverlay + ToastStack (Notifier)                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - API bodies, toast kinds and errors
//! - [`state`] - Workflow sessions, merge queue, loader and toasts
//! - [`components`] - UI components
//! - [`services`] - Server calls, downloads and page reload

use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod state;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Notifications
    ToastKind,
    // API
    AnalysisReport, AnalysisUpload, AnalyzeRequest, ColumnsRequest, ColumnsResponse,
    CommonColumnsRequest, CommonColumnsResponse, ErrorBody, FlaggedRow, MergeInstruction,
    MultiTabUpdateRequest, SheetList, StageRequest, StageResponse,
    // Errors
    AppError, AppResult,
};

// State
pub use state::*;

// Components
pub use components::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// Install the panic hook and console logger, then mount the app.
pub fn start() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Sheetflow - Starting Leptos App");

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_NAME/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    let notifier = Notifier::new();
    let (workflow, set_workflow) = create_signal(None::<Workflow>);

    view! {
        <Header workflow=workflow/>

        <div class="container">
            <Show
                when=move || workflow.get().is_none()
                fallback=|| view! { }
            >
                <Hero/>
                <WorkflowChoice set_workflow=set_workflow/>
            </Show>

            <Show
                when=move || workflow.get() == Some(Workflow::Analysis)
                fallback=|| view! { }
            >
                <AnalysisWorkflow notifier=notifier/>
            </Show>

            <Show
                when=move || workflow.get() == Some(Workflow::Update)
                fallback=|| view! { }
            >
                <UpdateWorkflow notifier=notifier/>
            </Show>
        </div>

        <LoaderOverlay notifier=notifier/>
        <ToastStack notifier=notifier/>
        <Footer/>
    }
}

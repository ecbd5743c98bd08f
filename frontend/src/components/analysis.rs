//! Inconsistency review workflow.
//!
//! Upload → sheet and columns → analysis results → staged decisions, with
//! the consolidated export available once a file is loaded.

use leptos::*;
use web_sys::{Event, File};

use super::{BackButton, FileUploadForm, FlaggedRowsTable, Notifier};
use crate::services::{save_download, ApiClient};
use crate::{AnalysisSession, AnalysisStage, AppError, ToastKind};

#[component]
pub fn AnalysisWorkflow(notifier: Notifier) -> impl IntoView {
    let session = create_rw_signal(AnalysisSession::default());
    let client = ApiClient::default();

    let on_upload = move |file: File| {
        spawn_local(async move {
            let Some(upload) = notifier.track("Processing file...", client.upload_for_analysis(&file)).await
            else {
                return;
            };
            log::info!("📄 {} loaded with {} sheet(s)", upload.file_name, upload.sheets.len());
            session.update(|s| s.apply_upload(upload));
        });
    };

    let on_sheet_change = move |ev: Event| {
        let sheet = event_target_value(&ev);
        let Some(ticket) = session.try_update(|s| s.begin_sheet_change(sheet.clone())) else {
            return;
        };
        spawn_local(async move {
            let Some(columns) = notifier.track("Loading columns...", client.columns_for_analysis(&sheet)).await
            else {
                return;
            };
            let applied = session.try_update(|s| s.apply_columns(ticket, columns)).unwrap_or(false);
            if !applied {
                log::debug!("Discarded stale columns for sheet '{}'", sheet);
            }
        });
    };

    let on_analyze = move |_| {
        let request = match session.with(AnalysisSession::analyze_request) {
            Ok(request) => request,
            Err(e) => {
                notifier.toast(e.to_string(), ToastKind::Info);
                return;
            }
        };
        spawn_local(async move {
            let Some(report) = notifier.track("Analysing data...", client.analyze(&request)).await else {
                return;
            };
            log::info!("🔎 {} row(s) flagged in '{}'", report.rows.len(), request.sheet_title);
            let shown = session.try_update(|s| s.apply_report(request.sheet_title.clone(), report));
            if shown != Some(true) {
                log::debug!("Discarded report for '{}': sheet changed", request.sheet_title);
            }
        });
    };

    let on_confirm = move |_| {
        let Some(request) = session.with(AnalysisSession::staging_request) else {
            return;
        };
        spawn_local(async move {
            let message = format!("Saving decisions for sheet \"{}\"...", request.sheet_title);
            let Some(reply) = notifier.track(&message, client.stage_tab_changes(&request)).await else {
                return;
            };
            let confirmation = reply
                .message
                .unwrap_or_else(|| format!("Decisions for '{}' were saved.", request.sheet_title));
            notifier.toast(confirmation, ToastKind::Success);
            session.update(|s| s.record_staged(&request.sheet_title, request.rows_to_remove.len()));
        });
    };

    let on_process_all = move |_| {
        spawn_local(async move {
            let export = async {
                let download = client.process_all_staged_changes().await?;
                save_download(&download)?;
                Ok::<_, AppError>(download.file_name)
            };
            if let Some(file_name) = notifier
                .track("Processing every sheet and generating the file...", export)
                .await
            {
                notifier.toast(format!("Final file generated: {}", file_name), ToastKind::Success);
            }
        });
    };

    let stage_is = move |stage: AnalysisStage| session.with(|s| s.stage() == stage);

    view! {
        <div id="analysis-workflow-card" class="workflow-card">
            <BackButton/>

            <div id="analysis-step1-card" class="step-card" class:hidden=move || !stage_is(AnalysisStage::Upload)>
                <h2>"Step 1: upload a spreadsheet"</h2>
                <FileUploadForm
                    form_id="analysis-upload-form"
                    submit_label="Load file"
                    on_upload=on_upload
                    notifier=notifier
                />
            </div>

            <div id="analysis-step2-card" class="step-card" class:hidden=move || !stage_is(AnalysisStage::Configure)>
                <h2 id="analysis-step2-title">
                    {move || session.with(|s| format!("Step 2: analysing \"{}\"", s.file_name()))}
                </h2>

                <label for="analysis-sheet-select">"Sheet"</label>
                <select id="analysis-sheet-select" on:change=on_sheet_change>
                    <For
                        each=move || session.with(|s| s.sheets().to_vec())
                        key=|sheet| sheet.clone()
                        children=move |sheet| {
                            let value = sheet.clone();
                            let is_current = move || session.with(|s| s.current_sheet() == value);
                            view! { <option value=sheet.clone() selected=is_current>{sheet}</option> }
                        }
                    />
                </select>

                <div id="analysis-columns-container" class="checkbox-grid">
                    <For
                        each=move || session.with(|s| s.columns().to_vec())
                        key=|column| column.clone()
                        children=move |column| {
                            let checkbox_id = format!("col-{}", checkbox_slug(&column));
                            let checked_column = column.clone();
                            let toggled_column = column.clone();
                            view! {
                                <div class="checkbox-wrapper">
                                    <input
                                        type="checkbox"
                                        id=checkbox_id.clone()
                                        value=column.clone()
                                        prop:checked=move || session.with(|s| s.is_column_selected(&checked_column))
                                        on:change=move |ev| {
                                            let checked = event_target_checked(&ev);
                                            session.update(|s| s.set_column_selected(&toggled_column, checked));
                                        }
                                    />
                                    <label for=checkbox_id>{column}</label>
                                </div>
                            }
                        }
                    />
                </div>

                <button type="button" id="analyze-btn" class="btn btn-primary" on:click=on_analyze>
                    "Analyse"
                </button>
            </div>

            <div
                id="analysis-step3-card"
                class="step-card"
                class:hidden=move || session.with(|s| s.results().is_none())
            >
                <h2>
                    "Step 3: review sheet "
                    <span id="current-analysis-tab">
                        {move || session.with(|s| s.results().map(|r| r.sheet_title().to_string()).unwrap_or_default())}
                    </span>
                </h2>
                <FlaggedRowsTable session=session/>
                <button
                    type="button"
                    id="confirm-decisions-btn"
                    class="btn btn-primary"
                    disabled=move || !session.with(AnalysisSession::can_confirm)
                    on:click=on_confirm
                >
                    "Confirm decisions"
                </button>
            </div>

            <div
                id="analysis-summary-card"
                class="step-card"
                class:hidden=move || session.with(|s| s.summary().is_empty())
            >
                <h2>"Staged changes"</h2>
                <div id="analysis-summary-container">
                    <For
                        each=move || session.with(|s| s.summary().to_vec())
                        key=|entry| entry.clone()
                        children=move |entry| {
                            view! {
                                <div class="summary-item" data-sheet=entry.sheet.clone()>
                                    <strong>{entry.sheet.clone()} ":"</strong>
                                    " "
                                    <span>{format!("{} row(s) to remove", entry.removals)}</span>
                                </div>
                            }
                        }
                    />
                </div>
            </div>

            <div class="workflow-actions" class:hidden=move || stage_is(AnalysisStage::Upload)>
                <button type="button" id="process-all-btn" class="btn btn-success" on:click=on_process_all>
                    "Process all sheets & download"
                </button>
            </div>
        </div>
    }
}

/// Column name reduced to characters safe inside an element id.
fn checkbox_slug(column: &str) -> String {
    column
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

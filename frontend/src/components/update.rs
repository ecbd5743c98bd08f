//! Multi-sheet update workflow.
//!
//! Base upload → update upload → sheet pair and key column → merge queue →
//! batch export.

use leptos::*;
use web_sys::{Event, File};

use super::{BackButton, FileUploadForm, MergeQueueList, Notifier};
use crate::services::{save_download, ApiClient};
use crate::{AppError, KeyColumns, ToastKind, UpdateSession, UpdateStage};

#[component]
pub fn UpdateWorkflow(notifier: Notifier) -> impl IntoView {
    let session = create_rw_signal(UpdateSession::default());
    let client = ApiClient::default();

    let refresh_key_columns = move || {
        let Some((ticket, request)) = session.try_update(|s| s.begin_common_columns()) else {
            return;
        };
        spawn_local(async move {
            match notifier.track("Looking for common columns...", client.common_columns(&request)).await {
                Some(columns) => {
                    log::info!(
                        "🔑 {} common column(s) for '{}' / '{}'",
                        columns.len(),
                        request.base_sheet,
                        request.update_sheet
                    );
                    let applied = session.try_update(|s| s.apply_common_columns(ticket, columns));
                    if applied != Some(true) {
                        log::debug!("Discarded stale common columns");
                    }
                }
                None => session.update(|s| s.fail_common_columns(ticket)),
            }
        });
    };

    let on_base_upload = move |file: File| {
        spawn_local(async move {
            if let Some(list) = notifier.track("Loading base file...", client.upload_base(&file)).await {
                log::info!("📄 Base file has {} sheet(s)", list.sheets.len());
                session.update(|s| s.apply_base_upload(list.sheets));
            }
        });
    };

    let on_update_upload = move |file: File| {
        spawn_local(async move {
            if let Some(list) = notifier.track("Loading update file...", client.upload_update(&file)).await {
                log::info!("📄 Update file has {} sheet(s)", list.sheets.len());
                session.update(|s| s.apply_update_upload(list.sheets));
                refresh_key_columns();
            }
        });
    };

    let on_base_sheet_change = move |ev: Event| {
        let sheet = event_target_value(&ev);
        session.update(|s| s.select_base_sheet(sheet));
        refresh_key_columns();
    };

    let on_update_sheet_change = move |ev: Event| {
        let sheet = event_target_value(&ev);
        session.update(|s| s.select_update_sheet(sheet));
        refresh_key_columns();
    };

    let on_key_change = move |ev: Event| {
        let column = event_target_value(&ev);
        session.update(|s| s.select_key_column(column));
    };

    let on_enqueue = move |_| {
        let outcome = session.try_update(|s| s.enqueue().map(|instruction| instruction.describe()));
        match outcome {
            Some(Ok(description)) => log::info!("➕ Queued: {}", description),
            Some(Err(e)) => notifier.toast(e.to_string(), ToastKind::Error),
            None => {}
        }
    };

    let on_process_all = move |_| {
        let Some(request) = session.with(UpdateSession::batch_request) else {
            return;
        };
        spawn_local(async move {
            let export = async {
                let download = client.process_multi_tab_update(&request).await?;
                save_download(&download)?;
                Ok::<_, AppError>(download.file_name)
            };
            if let Some(file_name) = notifier.track("Processing every merge...", export).await {
                notifier.toast(format!("Final file generated: {}", file_name), ToastKind::Success);
            }
        });
    };

    let stage_is = move |stage: UpdateStage| session.with(|s| s.stage() == stage);

    view! {
        <div id="update-workflow-card" class="workflow-card">
            <BackButton/>

            <div id="update-stepA-card" class="step-card" class:hidden=move || !stage_is(UpdateStage::BaseUpload)>
                <h2>"Step A: upload the base file"</h2>
                <FileUploadForm
                    form_id="base-upload-form"
                    submit_label="Load base file"
                    on_upload=on_base_upload
                    notifier=notifier
                />
            </div>

            <div id="update-stepB-card" class="step-card" class:hidden=move || !stage_is(UpdateStage::UpdateUpload)>
                <h2>"Step B: upload the update file"</h2>
                <FileUploadForm
                    form_id="update-upload-form"
                    submit_label="Load update file"
                    on_upload=on_update_upload
                    notifier=notifier
                />
            </div>

            <div id="update-stepC-card" class="step-card" class:hidden=move || !stage_is(UpdateStage::Configure)>
                <h2>"Step C: build the merge queue"</h2>

                <div class="merge-form">
                    <label for="base-sheet-select">"Base sheet"</label>
                    <select id="base-sheet-select" on:change=on_base_sheet_change>
                        <SheetOptions
                            sheets=Signal::derive(move || session.with(|s| s.base_sheets().to_vec()))
                            current=Signal::derive(move || session.with(|s| s.base_sheet().to_string()))
                        />
                    </select>

                    <label for="update-sheet-select">"Update sheet"</label>
                    <select id="update-sheet-select" on:change=on_update_sheet_change>
                        <SheetOptions
                            sheets=Signal::derive(move || session.with(|s| s.update_sheets().to_vec()))
                            current=Signal::derive(move || session.with(|s| s.update_sheet().to_string()))
                        />
                    </select>

                    <label for="key-column-select">"Key column"</label>
                    <select
                        id="key-column-select"
                        disabled=move || !session.with(|s| s.key_columns().is_enabled())
                        on:change=on_key_change
                    >
                        {move || session.with(|s| key_column_options(s.key_columns()))}
                    </select>

                    <button type="button" id="add-to-queue-btn" class="btn btn-secondary" on:click=on_enqueue>
                        "Add to queue"
                    </button>
                </div>

                <MergeQueueList session=session/>

                <button
                    type="button"
                    id="process-all-update-btn"
                    class="btn btn-success"
                    disabled=move || !session.with(UpdateSession::can_process)
                    on:click=on_process_all
                >
                    "Process all & download"
                </button>
            </div>
        </div>
    }
}

#[component]
fn SheetOptions(sheets: Signal<Vec<String>>, current: Signal<String>) -> impl IntoView {
    view! {
        <For
            each=move || sheets.get()
            key=|sheet| sheet.clone()
            children=move |sheet| {
                let value = sheet.clone();
                view! {
                    <option value=sheet.clone() selected=move || current.with(|c| *c == value)>{sheet}</option>
                }
            }
        />
    }
}

fn key_column_options(key_columns: &KeyColumns) -> View {
    match key_columns {
        KeyColumns::Ready { columns, selected } => columns
            .iter()
            .map(|column| {
                let is_selected = column == selected;
                view! { <option value=column.clone() selected=is_selected>{column.clone()}</option> }
            })
            .collect_view(),
        other => {
            let placeholder = other.placeholder().unwrap_or_default();
            view! { <option value="" disabled=true selected=true>{placeholder}</option> }.into_view()
        }
    }
}

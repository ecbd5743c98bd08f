//! Spreadsheet upload form.
//!
//! Shows the chosen file name and hands the file to `on_upload` on submit.

use leptos::*;
use web_sys::{Event, File, HtmlInputElement};

use super::Notifier;
use crate::services::check_file_size;
use crate::{ToastKind, ACCEPTED_FILE_TYPES};

#[component]
pub fn FileUploadForm(
    /// Form id; the file input gets `<form_id>-input`
    #[prop(into)]
    form_id: String,
    #[prop(into)] submit_label: String,
    #[prop(into)] on_upload: Callback<File>,
    notifier: Notifier,
) -> impl IntoView {
    let input_ref = create_node_ref::<html::Input>();
    let (file_name, set_file_name) = create_signal(None::<String>);

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let chosen = input.files().and_then(|files| files.get(0)).map(|file| file.name());
        set_file_name.set(chosen);
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let file = input_ref
            .get()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        let Some(file) = file else {
            notifier.toast("Choose a spreadsheet file first.", ToastKind::Info);
            return;
        };
        match check_file_size(file.size()) {
            Ok(()) => on_upload.call(file),
            Err(e) => notifier.toast(e.to_string(), ToastKind::Error),
        }
    };

    let input_id = format!("{}-input", form_id);

    view! {
        <form id=form_id class="upload-form" on:submit=on_submit>
            <label for=input_id.clone() class="file-label">
                {move || file_name.get().unwrap_or_else(|| "Click to choose a file...".to_string())}
            </label>
            <input
                type="file"
                id=input_id
                name="file"
                class="file-input"
                accept=ACCEPTED_FILE_TYPES
                node_ref=input_ref
                on:change=on_file_change
            />
            <button type="submit" class="btn btn-primary">{submit_label}</button>
        </form>
    }
}

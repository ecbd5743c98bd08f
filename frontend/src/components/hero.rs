//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"Spreadsheet review & update"</h1>
            <p class="subtitle">
                "Flag inconsistent rows sheet by sheet, or merge an updated workbook into a base one. "
                "Choose a workflow to start."
            </p>
        </div>
    }
}

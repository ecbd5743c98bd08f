use leptos::*;

use crate::{Workflow, APP_NAME};

#[component]
pub fn Header(workflow: ReadSignal<Option<Workflow>>) -> impl IntoView {
    view! {
        <header>
            <div class="header-left">
                <a href="/" class="logo">{APP_NAME}</a>
                <span class="badge">
                    {move || workflow.get().map(|w| w.title()).unwrap_or("Choose a workflow")}
                </span>
            </div>
        </header>
    }
}

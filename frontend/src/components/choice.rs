//! Workflow selector and the back control.

use leptos::*;

use crate::services::reload_page;
use crate::Workflow;

/// Two cards; clicking one reveals its workflow panel.
///
/// The choice is final: only a page reload brings the cards back.
#[component]
pub fn WorkflowChoice(set_workflow: WriteSignal<Option<Workflow>>) -> impl IntoView {
    let choose = move |identifier: &str| {
        let Some(chosen) = Workflow::from_identifier(identifier) else {
            log::warn!("Unknown workflow '{}'", identifier);
            return;
        };
        set_workflow.update(|current| {
            if current.is_none() {
                log::info!("🧭 Workflow selected: {}", chosen.identifier());
                *current = Some(chosen);
            }
        });
    };

    view! {
        <div id="workflow-choice-container" class="choice-container">
            {Workflow::ALL
                .into_iter()
                .map(|workflow| {
                    view! {
                        <div
                            class="choice-card"
                            data-workflow=workflow.identifier()
                            on:click=move |_| choose(workflow.identifier())
                        >
                            <h2>{workflow.title()}</h2>
                            <p>{workflow.description()}</p>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// Reloads the page, discarding every session and queue.
#[component]
pub fn BackButton() -> impl IntoView {
    let on_back = move |_| {
        if let Err(e) = reload_page() {
            log::error!("❌ {}", e);
        }
    };

    view! {
        <button type="button" class="btn btn-back" on:click=on_back>"← Back"</button>
    }
}

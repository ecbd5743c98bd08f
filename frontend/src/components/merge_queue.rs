use leptos::*;

use crate::UpdateSession;

/// Queued merge instructions, each with a remove control.
#[component]
pub fn MergeQueueList(session: RwSignal<UpdateSession>) -> impl IntoView {
    view! {
        <ul id="merge-queue-list" class="merge-queue">
            // Keyed by position too, so every entry's remove button targets
            // its current index after a removal.
            <For
                each=move || session.with(|s| s.queue().iter().cloned().enumerate().collect::<Vec<_>>())
                key=|entry| entry.clone()
                children=move |(index, instruction)| {
                    let on_remove = move |_| {
                        session.update(|s| {
                            if let Some(removed) = s.remove_instruction(index) {
                                log::info!("🗑️ Removed from queue: {}", removed.describe());
                            }
                        });
                    };
                    view! {
                        <li>
                            <span class="queue-item-text">
                                "Update sheet " <span>{instruction.base_tab}</span>
                                " with " <span>{instruction.update_tab}</span>
                                " using key " <span>{instruction.key_column}</span>
                            </span>
                            <button
                                type="button"
                                class="queue-item-remove"
                                data-index=index.to_string()
                                on:click=on_remove
                            >
                                "×"
                            </button>
                        </li>
                    }
                }
            />
        </ul>
    }
}

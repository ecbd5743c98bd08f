//! Loader overlay and toast stack.
//!
//! [`Notifier`] is a `Copy` handle shared by every workflow component; the
//! [`LoaderOverlay`] and [`ToastStack`] components render its state.

use std::future::Future;

use gloo_timers::future::TimeoutFuture;
use leptos::*;

use crate::state::{run_toast_lifecycle, run_tracked, Feedback};
use crate::{AppResult, LoaderState, ToastKind, ToastQueue};

#[derive(Clone, Copy)]
pub struct Notifier {
    loader: RwSignal<LoaderState>,
    toasts: RwSignal<ToastQueue>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            loader: create_rw_signal(LoaderState::default()),
            toasts: create_rw_signal(ToastQueue::default()),
        }
    }

    /// Queue a toast: revealed shortly after insertion, faded after the
    /// display time, then removed.
    pub fn toast(&self, message: impl Into<String>, kind: ToastKind) {
        let toasts = self.toasts;
        let Some(id) = toasts.try_update(|queue| queue.push(message, kind)) else {
            return;
        };
        spawn_local(run_toast_lifecycle(TimeoutFuture::new, move |step| {
            toasts.update(|queue| step.apply(queue, id));
        }));
    }

    /// Run a request behind the loader.
    ///
    /// The loader is hidden whatever the outcome; errors are toasted and
    /// turned into `None`.
    pub async fn track<T, F>(&self, message: &str, task: F) -> Option<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        run_tracked(self, message, task).await
    }
}

impl Feedback for Notifier {
    fn show_loader(&self, message: &str) {
        self.loader.update(|loader| loader.show(message));
    }

    fn hide_loader(&self) {
        self.loader.update(LoaderState::hide);
    }

    fn push_toast(&self, message: String, kind: ToastKind) {
        self.toast(message, kind);
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn LoaderOverlay(notifier: Notifier) -> impl IntoView {
    let loader = notifier.loader;

    view! {
        <div id="loader" class="loader" class:hidden=move || !loader.with(LoaderState::is_visible)>
            <div class="spinner"></div>
            <p id="loader-text">{move || loader.with(|loader| loader.message().to_string())}</p>
        </div>
    }
}

#[component]
pub fn ToastStack(notifier: Notifier) -> impl IntoView {
    let toasts = notifier.toasts;

    view! {
        <div id="toast-container" class="toast-container">
            <For
                each=move || toasts.with(|queue| queue.iter().cloned().collect::<Vec<_>>())
                key=|toast| toast.id()
                children=move |toast| {
                    let id = toast.id();
                    view! {
                        <div
                            class=format!("toast {}", toast.kind().css_class())
                            class:show=move || toasts.with(|queue| queue.is_visible(id))
                            on:click=move |_| toasts.update(|queue| queue.remove(id))
                        >
                            {toast.message().to_string()}
                        </div>
                    }
                }
            />
        </div>
    }
}

//! Loader and toast state.

use std::future::Future;

use crate::{AppResult, ToastKind, TOAST_DISPLAY_MS, TOAST_FADE_MS, TOAST_REVEAL_DELAY_MS};

/// Loading overlay. Visible while it holds a message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoaderState {
    message: Option<String>,
}

impl LoaderState {
    /// Show the overlay, replacing any message already displayed.
    pub fn show(&mut self, message: &str) {
        self.message = Some(message.to_string());
    }

    pub fn hide(&mut self) {
        self.message = None;
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }

    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}

/// A single notification in the stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    id: u64,
    message: String,
    kind: ToastKind,
    visible: bool,
}

impl Toast {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> ToastKind {
        self.kind
    }

    /// Whether the toast currently carries the `show` class.
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Stack of toasts in insertion order.
///
/// A toast goes through `push` (inserted, not yet shown), `reveal`, `fade`
/// and `remove`; the component drives those steps with timers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastQueue {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    /// Append a toast and return its id. Identical messages are not merged.
    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast { id, message: message.into(), kind, visible: false });
        id
    }

    pub fn reveal(&mut self, id: u64) {
        if let Some(toast) = self.toasts.iter_mut().find(|toast| toast.id == id) {
            toast.visible = true;
        }
    }

    /// Drop the `show` class so the fade-out transition runs.
    pub fn fade(&mut self, id: u64) {
        if let Some(toast) = self.toasts.iter_mut().find(|toast| toast.id == id) {
            toast.visible = false;
        }
    }

    /// Remove a toast; unknown ids (already dismissed) are ignored.
    pub fn remove(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }

    pub fn is_visible(&self, id: u64) -> bool {
        self.toasts.iter().any(|toast| toast.id == id && toast.visible)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

/// A timed step of a toast after it is pushed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastStep {
    Reveal,
    Fade,
    Remove,
}

impl ToastStep {
    /// Delay in milliseconds before each step, in the order they run.
    pub const SCHEDULE: [(u32, ToastStep); 3] = [
        (TOAST_REVEAL_DELAY_MS, ToastStep::Reveal),
        (TOAST_DISPLAY_MS, ToastStep::Fade),
        (TOAST_FADE_MS, ToastStep::Remove),
    ];

    pub fn apply(self, queue: &mut ToastQueue, id: u64) {
        match self {
            ToastStep::Reveal => queue.reveal(id),
            ToastStep::Fade => queue.fade(id),
            ToastStep::Remove => queue.remove(id),
        }
    }
}

/// Walk a toast through [`ToastStep::SCHEDULE`], awaiting `sleep` before
/// each step.
pub async fn run_toast_lifecycle<S, W, A>(mut sleep: S, mut apply: A)
where
    S: FnMut(u32) -> W,
    W: Future<Output = ()>,
    A: FnMut(ToastStep),
{
    for (delay_ms, step) in ToastStep::SCHEDULE {
        sleep(delay_ms).await;
        apply(step);
    }
}

/// Where loader and toast updates go.
pub trait Feedback {
    fn show_loader(&self, message: &str);
    fn hide_loader(&self);
    fn push_toast(&self, message: String, kind: ToastKind);
}

/// Run `task` behind the loader.
///
/// The loader is hidden whatever the outcome. An error becomes a single
/// error toast carrying its message, and `None`.
pub async fn run_tracked<B, T, F>(feedback: &B, message: &str, task: F) -> Option<T>
where
    B: Feedback + ?Sized,
    F: Future<Output = AppResult<T>>,
{
    feedback.show_loader(message);
    let outcome = task.await;
    feedback.hide_loader();
    match outcome {
        Ok(value) => Some(value),
        Err(err) => {
            log::error!("❌ {}: {}", message, err);
            feedback.push_toast(err.to_string(), ToastKind::Error);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppError;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::future::ready;

    #[derive(Default)]
    struct Recorder {
        loader: RefCell<LoaderState>,
        toasts: RefCell<ToastQueue>,
    }

    impl Feedback for Recorder {
        fn show_loader(&self, message: &str) {
            self.loader.borrow_mut().show(message);
        }

        fn hide_loader(&self) {
            self.loader.borrow_mut().hide();
        }

        fn push_toast(&self, message: String, kind: ToastKind) {
            self.toasts.borrow_mut().push(message, kind);
        }
    }

    #[test]
    fn test_loader_overwrites_message() {
        let mut loader = LoaderState::default();
        assert!(!loader.is_visible());

        loader.show("Processing file...");
        loader.show("Loading columns...");
        assert!(loader.is_visible());
        assert_eq!(loader.message(), "Loading columns...");

        loader.hide();
        assert!(!loader.is_visible());
        assert_eq!(loader.message(), "");
    }

    #[test]
    fn test_toasts_stack_without_dedup() {
        let mut queue = ToastQueue::default();
        let a = queue.push("Saved", ToastKind::Success);
        let b = queue.push("Saved", ToastKind::Success);
        assert_ne!(a, b);
        assert_eq!(queue.len(), 2);
        assert!(queue.iter().all(|toast| !toast.is_visible()));
    }

    #[test]
    fn test_toast_lifecycle() {
        let mut queue = ToastQueue::default();
        let id = queue.push("Select at least one column.", ToastKind::Info);
        let other = queue.push("Boom", ToastKind::Error);

        queue.reveal(id);
        assert!(queue.is_visible(id));
        assert!(!queue.is_visible(other));

        queue.fade(id);
        assert!(!queue.is_visible(id));
        assert_eq!(queue.len(), 2);

        queue.remove(id);
        let remaining: Vec<_> = queue.iter().map(Toast::message).collect();
        assert_eq!(remaining, vec!["Boom"]);

        // A timer firing after a manual dismissal is a no-op.
        queue.remove(id);
        queue.reveal(id);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_default_kind_is_info() {
        assert_eq!(ToastKind::default(), ToastKind::Info);
        assert_eq!(ToastKind::Error.css_class(), "toast-error");
    }

    #[test]
    fn test_tracked_success_hides_loader_without_toast() {
        let recorder = Recorder::default();
        let columns = block_on(run_tracked(&recorder, "Loading columns...", async {
            assert_eq!(recorder.loader.borrow().message(), "Loading columns...");
            Ok::<_, AppError>(vec!["Region".to_string()])
        }));

        assert_eq!(columns, Some(vec!["Region".to_string()]));
        assert!(!recorder.loader.borrow().is_visible());
        assert!(recorder.toasts.borrow().is_empty());
    }

    #[test]
    fn test_tracked_failure_hides_loader_and_toasts_once() {
        let recorder = Recorder::default();
        let outcome = block_on(run_tracked(&recorder, "Analysing data...", async {
            assert!(recorder.loader.borrow().is_visible());
            Err::<(), _>(AppError::Server { status: 400, message: "Sheet not found".into() })
        }));

        assert_eq!(outcome, None);
        assert!(!recorder.loader.borrow().is_visible());

        let toasts = recorder.toasts.borrow();
        assert_eq!(toasts.len(), 1);
        let toast = toasts.iter().next().unwrap();
        assert_eq!(toast.kind(), ToastKind::Error);
        assert_eq!(toast.message(), "Sheet not found");
    }

    #[derive(Debug, PartialEq)]
    enum Event {
        Sleep(u32),
        Step(ToastStep, bool),
    }

    #[test]
    fn test_toast_lifecycle_timing() {
        let mut queue = ToastQueue::default();
        let id = queue.push("Decisions saved.", ToastKind::Success);
        let queue = RefCell::new(queue);
        let events = RefCell::new(Vec::new());

        block_on(run_toast_lifecycle(
            |ms| {
                events.borrow_mut().push(Event::Sleep(ms));
                ready(())
            },
            |step| {
                let mut queue = queue.borrow_mut();
                step.apply(&mut queue, id);
                events.borrow_mut().push(Event::Step(step, queue.is_visible(id)));
            },
        ));

        assert_eq!(
            events.into_inner(),
            vec![
                Event::Sleep(100),
                Event::Step(ToastStep::Reveal, true),
                Event::Sleep(5_000),
                Event::Step(ToastStep::Fade, false),
                Event::Sleep(500),
                Event::Step(ToastStep::Remove, false),
            ]
        );
        assert!(queue.into_inner().is_empty());
    }
}

use crate::api::ApiError;
use leptos::*;
use uuid::Uuid;

pub const TOAST_DISMISS_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn css_class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
            ToastKind::Info => "toast toast-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
}

/// Queue of transient notifications shared through context.
#[derive(Clone, Copy)]
pub struct ToastState {
    toasts: RwSignal<Vec<Toast>>,
}

impl ToastState {
    pub fn new() -> Self {
        Self {
            toasts: create_rw_signal(Vec::new()),
        }
    }

    pub fn toasts(&self) -> Signal<Vec<Toast>> {
        self.toasts.into()
    }

    pub fn push(&self, kind: ToastKind, message: impl Into<String>) -> Uuid {
        let toast = Toast {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
        };
        let id = toast.id;
        self.toasts.update(|queue| queue.push(toast));
        schedule_dismiss(*self, id);
        id
    }

    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.push(ToastKind::Success, message)
    }

    pub fn info(&self, message: impl Into<String>) -> Uuid {
        self.push(ToastKind::Info, message)
    }

    pub fn error(&self, err: &ApiError) -> Uuid {
        self.push(ToastKind::Error, err.error.clone())
    }

    pub fn dismiss(&self, id: Uuid) {
        // The owner may already be gone when a late timer fires.
        let _ = self.toasts.try_update(|queue| queue.retain(|toast| toast.id != id));
    }
}

impl Default for ToastState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
fn schedule_dismiss(state: ToastState, id: Uuid) {
    gloo_timers::callback::Timeout::new(TOAST_DISMISS_MS, move || state.dismiss(id)).forget();
}

// Host renders are one-shot; toasts stay until dismissed by hand.
#[cfg(not(target_arch = "wasm32"))]
fn schedule_dismiss(_state: ToastState, _id: Uuid) {}

pub fn provide_toasts() -> ToastState {
    let state = ToastState::new();
    provide_context(state);
    state
}

pub fn use_toasts() -> ToastState {
    use_context::<ToastState>().unwrap_or_else(provide_toasts)
}

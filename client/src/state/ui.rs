//! Local UI chrome state (theme, plate search, toasts).
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of the camera and record
//! stores so the navbar and toast stack can evolve independently of
//! backend data.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use crate::util::theme::Theme;

/// How long a toast stays up.
pub const TOAST_TIMEOUT_MS: u32 = 4_000;

/// Toast severity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Error,
}

impl ToastKind {
    pub fn class(self) -> &'static str {
        match self {
            Self::Info => "toast toast--info",
            Self::Success => "toast toast--success",
            Self::Error => "toast toast--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// UI state shared through context.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub theme: Theme,
    /// Plate search from the navbar; filters the active vehicles panel.
    pub search: String,
    pub toasts: Vec<Toast>,
    next_toast_id: u64,
}

impl UiState {
    /// Queue a toast and return its id for later dismissal.
    pub fn push_toast(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_toast_id += 1;
        let id = self.next_toast_id;
        self.toasts.push(Toast {
            id,
            kind,
            message: message.into(),
        });
        id
    }

    pub fn dismiss_toast(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }
}

/// Show a toast and schedule its dismissal.
pub fn notify(ui: leptos::prelude::RwSignal<UiState>, kind: ToastKind, message: impl Into<String>) {
    use leptos::prelude::Update;

    let message = message.into();
    let mut id = 0;
    ui.update(|u| id = u.push_toast(kind, message));

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(TOAST_TIMEOUT_MS).await;
        let _ = ui.try_update(|u| u.dismiss_toast(id));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = id;
}

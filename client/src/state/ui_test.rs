use super::*;

// =============================================================
// UiState defaults
// =============================================================

#[test]
fn ui_state_default_is_light_with_no_toasts() {
    let state = UiState::default();
    assert_eq!(state.theme, Theme::Light);
    assert!(state.search.is_empty());
    assert!(state.toasts.is_empty());
}

// =============================================================
// Toasts
// =============================================================

#[test]
fn push_toast_assigns_increasing_ids() {
    let mut state = UiState::default();
    let first = state.push_toast(ToastKind::Info, "Camera added");
    let second = state.push_toast(ToastKind::Error, "camera create failed: 500");
    assert!(second > first);
    assert_eq!(state.toasts.len(), 2);
    assert_eq!(state.toasts[1].kind, ToastKind::Error);
}

#[test]
fn dismiss_toast_removes_only_that_toast() {
    let mut state = UiState::default();
    let first = state.push_toast(ToastKind::Info, "a");
    let second = state.push_toast(ToastKind::Success, "b");
    state.dismiss_toast(first);
    assert_eq!(state.toasts.len(), 1);
    assert_eq!(state.toasts[0].id, second);
    state.dismiss_toast(first);
    assert_eq!(state.toasts.len(), 1);
}

#[test]
fn ids_are_not_reused_after_dismiss() {
    let mut state = UiState::default();
    let first = state.push_toast(ToastKind::Info, "a");
    state.dismiss_toast(first);
    let second = state.push_toast(ToastKind::Info, "b");
    assert_ne!(first, second);
}

#[test]
fn toast_kind_classes_are_distinct() {
    assert_eq!(ToastKind::default(), ToastKind::Info);
    assert_ne!(ToastKind::Info.class(), ToastKind::Error.class());
    assert!(ToastKind::Success.class().starts_with("toast "));
}

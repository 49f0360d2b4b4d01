use super::*;

#[test]
fn push_assigns_unique_ids() {
    let mut state = ToastState::default();
    let first = state.push(ToastKind::Success, "saved".to_owned());
    let second = state.push(ToastKind::Success, "saved".to_owned());
    assert_ne!(first, second);
    assert_eq!(state.items.len(), 2);
}

#[test]
fn dismiss_removes_only_target() {
    let mut state = ToastState::default();
    let keep = state.push(ToastKind::Success, "kept".to_owned());
    let drop = state.push(ToastKind::Error, "dropped".to_owned());
    state.dismiss(drop);
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id, keep);
}

#[test]
fn dismiss_unknown_id_is_noop() {
    let mut state = ToastState::default();
    state.push(ToastKind::Success, "kept".to_owned());
    state.dismiss(Uuid::new_v4());
    assert_eq!(state.items.len(), 1);
}

#[test]
fn queue_evicts_oldest_past_cap() {
    let mut state = ToastState::default();
    for n in 0..6 {
        state.push(ToastKind::Success, format!("toast {n}"));
    }
    assert_eq!(state.items.len(), MAX_TOASTS);
    assert_eq!(state.items[0].message, "toast 2");
    assert_eq!(state.items.last().map(|t| t.message.as_str()), Some("toast 5"));
}

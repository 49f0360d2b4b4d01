//! Transient toast notification queue.
//!
//! DESIGN
//! ======
//! Row actions report success or failure through this queue instead of
//! inline status text, so the table grid never reflows on save. The queue is
//! bounded; old entries are dropped first.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use uuid::Uuid;

/// Oldest entries are evicted once the queue passes this length.
pub const MAX_TOASTS: usize = 4;

/// Visual flavor of a toast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// One queued notification.
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
}

/// The visible notification queue, newest last.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastState {
    pub items: Vec<Toast>,
}

impl ToastState {
    /// Queue a toast and return its id for later dismissal.
    pub fn push(&mut self, kind: ToastKind, message: String) -> Uuid {
        let id = Uuid::new_v4();
        self.items.push(Toast { id, kind, message });
        while self.items.len() > MAX_TOASTS {
            self.items.remove(0);
        }
        id
    }

    /// Remove a toast by id. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: Uuid) {
        self.items.retain(|toast| toast.id != id);
    }
}

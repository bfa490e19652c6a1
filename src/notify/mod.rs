use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Which view a mutation came from; only affects notification wording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ViewKind {
    Card,
    Table,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ToastLevel {
    Success,
    Error,
}

/// Outcome of a user-initiated mutation, as shown to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Notice {
    Created(ViewKind),
    Updated(ViewKind),
    Deleted(ViewKind),
    SaveFailed,
    DeleteFailed(ViewKind),
}

impl Notice {
    pub fn level(self) -> ToastLevel {
        match self {
            Notice::Created(_) | Notice::Updated(_) | Notice::Deleted(_) => ToastLevel::Success,
            Notice::SaveFailed | Notice::DeleteFailed(_) => ToastLevel::Error,
        }
    }

    pub fn message(self) -> &'static str {
        use ViewKind::{Card, Table};
        match self {
            Notice::Created(Card) => "Card created successfully!",
            Notice::Updated(Card) => "Card updated successfully!",
            Notice::Deleted(Card) => "Card deleted successfully!",
            Notice::Created(Table) => "Table entry created successfully!",
            Notice::Updated(Table) => "Table entry updated successfully!",
            Notice::Deleted(Table) => "Table entry deleted successfully!",
            Notice::SaveFailed => "An error occurred!",
            Notice::DeleteFailed(Card) => "Failed to delete the card.",
            Notice::DeleteFailed(Table) => "Failed to delete the table entry.",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

/// Visible toast stack, newest last.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Toasts {
    next_id: u64,
    pub items: Vec<Toast>,
}

impl Toasts {
    pub fn push(&mut self, notice: Notice) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast {
            id,
            level: notice.level(),
            message: notice.message().to_string(),
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }
}

/// Handle on the app-wide toast stack. Outlives the views that report to it.
#[derive(Clone, Copy)]
pub(crate) struct Notifier {
    pub toasts: RwSignal<Toasts>,
    pub toast_ms: i32,
}

impl Notifier {
    /// Shows `notice` and schedules its removal after `toast_ms`.
    pub fn notify(self, notice: Notice) {
        let toasts = self.toasts;
        let mut id = 0;
        toasts.update(|t| id = t.push(notice));

        let Some(win) = web_sys::window() else {
            return;
        };
        let cb = wasm_bindgen::closure::Closure::once_into_js(move || {
            let _ = toasts.try_update(|t| t.dismiss(id));
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            self.toast_ms,
        );
    }
}

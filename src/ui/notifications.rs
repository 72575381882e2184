use std::cell::Cell;

use dioxus::prelude::*;

use crate::domain::entities::notice::Notice;
use crate::ui::state::app_state::{push_toast, Toast};
use crate::usecase::ports::notifier::Notifier;

/// Feeds notices into the toast stack rendered by the shell.
pub struct ToastNotifier {
    toasts: Signal<Vec<Toast>>,
    next_id: Cell<u64>,
}

impl ToastNotifier {
    pub fn new(toasts: Signal<Vec<Toast>>) -> Self {
        Self {
            toasts,
            next_id: Cell::new(0),
        }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, notice: Notice) {
        tracing::debug!(kind = notice.kind.as_str(), title = %notice.title, "toast");
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let mut toasts = self.toasts;
        push_toast(&mut toasts.write(), Toast { id, notice });
    }
}

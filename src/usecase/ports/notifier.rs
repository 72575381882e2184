use crate::domain::entities::notice::Notice;

/// Fire-and-forget sink for user-facing notifications.
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

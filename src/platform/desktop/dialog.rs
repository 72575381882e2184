use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

/// Native yes/no prompt shown before a record is deleted.
pub fn confirm_delete(entity_name: &str, label: &str) -> bool {
    let answer = MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title(format!("Delete {entity_name}"))
        .set_description(format!(
            "Are you sure you want to delete \"{label}\"? This action cannot be undone."
        ))
        .set_buttons(MessageButtons::YesNo)
        .show();
    matches!(answer, MessageDialogResult::Yes)
}

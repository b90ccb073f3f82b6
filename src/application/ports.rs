use std::path::PathBuf;

use crate::domain::Notice;

/// Asks the user where to save a download. Blocks until answered.
pub trait SavePrompt {
    /// `None` when the user dismisses the dialog.
    fn choose_save_path(&self, suggested_filename: &str) -> Option<PathBuf>;
}

/// Shows a modal notice to the user.
pub trait Notifier {
    fn notify(&self, notice: &Notice);
}

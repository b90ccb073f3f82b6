use std::path::PathBuf;

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};

use crate::{
    application::{Notifier, SavePrompt},
    domain::{Notice, NoticeLevel},
};

/// Native save dialog.
#[derive(Debug, Clone, Copy, Default)]
pub struct RfdSavePrompt;

impl SavePrompt for RfdSavePrompt {
    fn choose_save_path(&self, suggested_filename: &str) -> Option<PathBuf> {
        FileDialog::new()
            .set_title("Save File")
            .set_file_name(suggested_filename)
            .save_file()
    }
}

/// Native modal message boxes.
#[derive(Debug, Clone, Copy, Default)]
pub struct RfdNotifier;

impl Notifier for RfdNotifier {
    fn notify(&self, notice: &Notice) {
        let level = match notice.level {
            NoticeLevel::Info => MessageLevel::Info,
            NoticeLevel::Warning => MessageLevel::Warning,
            NoticeLevel::Error => MessageLevel::Error,
        };

        MessageDialog::new()
            .set_level(level)
            .set_title(&notice.title)
            .set_description(&notice.message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

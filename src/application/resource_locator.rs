use std::path::{Path, PathBuf};

use tracing::{error, info};
use url::Url;

use crate::{
    application::Notifier,
    config::LaunchContext,
    domain::{AppError, Notice},
};

/// Location of the bundled editor, relative to the resource base directory.
pub const ENTRY_DOCUMENT: [&str; 2] = ["ArkIDE", "editor.html"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDocument {
    pub path: PathBuf,
    pub exists: bool,
}

impl EntryDocument {
    pub fn locate(launch: &LaunchContext) -> Self {
        let path = entry_document_path(&launch.base_dir);
        let exists = path.is_file();
        info!(
            run_mode = %launch.run_mode,
            base_dir = %launch.base_dir.display(),
            path = %path.display(),
            exists,
            "Resolved entry document"
        );
        Self { path, exists }
    }

    pub fn ensure_present(&self) -> Result<&Path, AppError> {
        if self.exists {
            Ok(&self.path)
        } else {
            Err(AppError::MissingEntryDocument(self.path.clone()))
        }
    }

    /// `file://` URL for the engine. Handed over even when the file is missing.
    pub fn url(&self) -> String {
        Url::from_file_path(&self.path)
            .map(String::from)
            .unwrap_or_else(|_| format!("file://{}", self.path.display()))
    }
}

pub fn entry_document_path(base_dir: &Path) -> PathBuf {
    ENTRY_DOCUMENT
        .iter()
        .fold(base_dir.to_path_buf(), |path, part| path.join(part))
}

/// Report a missing entry document once. Never stops startup.
///
/// Returns whether the document is usable.
pub fn report_missing_entry(document: &EntryDocument, notifier: &dyn Notifier) -> bool {
    match document.ensure_present() {
        Ok(_) => true,
        Err(e) => {
            error!("{}", e);
            notifier.notify(&Notice::error(
                "File Not Found",
                format!(
                    "The ArkIDE editor file was not found at:\n{}\n\
                     Please ensure the 'ArkIDE' folder is correctly bundled with the application.",
                    document.path.display()
                ),
            ));
            false
        }
    }
}

use std::path::PathBuf;

use thiserror::Error;

use super::model::DownloadId;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Entry document not found at {}", .0.display())]
    MissingEntryDocument(PathBuf),

    #[error("Download of '{file_name}' failed: {reason}")]
    DownloadInterrupted { file_name: String, reason: String },

    #[error("Unknown download request #{0}")]
    UnknownDownload(DownloadId),

    #[error("Download request #{0} was already resolved")]
    AlreadyResolved(DownloadId),

    #[error("Window error: {0}")]
    Window(String),

    #[error("WebView error: {0}")]
    WebView(String),
}

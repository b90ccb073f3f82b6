use std::fmt;
use std::path::PathBuf;

use crate::utils::file_name_of;

/// How the process was launched; fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Packaged,
    FromSource,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Packaged => f.write_str("packaged"),
            RunMode::FromSource => f.write_str("from source"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DownloadId(pub u64);

impl fmt::Display for DownloadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadState {
    Requested,
    Accepted,
    Cancelled,
    Finished,
    Interrupted,
}

/// One user-initiated download, tracked until the engine reports a terminal state.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub id: DownloadId,
    pub url: String,
    pub suggested_filename: String,
    pub state: DownloadState,
    pub destination: Option<PathBuf>,
    pub interrupt_reason: Option<String>,
}

impl DownloadRequest {
    pub fn new(id: DownloadId, url: String, suggested_filename: String) -> Self {
        Self {
            id,
            url,
            suggested_filename,
            state: DownloadState::Requested,
            destination: None,
            interrupt_reason: None,
        }
    }

    /// Base name of the bound destination, or the suggested name before one is chosen.
    pub fn display_name(&self) -> String {
        self.destination
            .as_deref()
            .and_then(file_name_of)
            .unwrap_or_else(|| self.suggested_filename.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A modal message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

pub mod error;
pub mod model;

pub use error::AppError;
pub use model::{DownloadId, DownloadRequest, DownloadState, Notice, NoticeLevel, RunMode};

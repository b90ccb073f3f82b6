pub mod download_mediator;
pub mod ports;
pub mod resource_locator;

pub use download_mediator::DownloadMediator;
pub use ports::{Notifier, SavePrompt};
pub use resource_locator::{report_missing_entry, EntryDocument};

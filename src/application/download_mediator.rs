use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::{
    application::{Notifier, SavePrompt},
    domain::{AppError, DownloadId, DownloadRequest, DownloadState, Notice},
    utils::suggested_filename,
};

/// Terminal report from the engine for an accepted download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Finished,
    Interrupted(String),
}

/// WebKitGTK reports a refused download back through its completion callback.
pub const ENGINE_REPORTS_CANCELLED: bool = cfg!(any(
    target_os = "linux",
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd"
));

/// Upper bound on requests waiting for an engine report.
pub const MAX_TRACKED: usize = 64;

/// Download requests and their lifecycle, without any UI.
#[derive(Debug)]
pub struct DownloadTracker {
    requests: BTreeMap<DownloadId, DownloadRequest>,
    next_id: u64,
    keep_cancelled: bool,
    capacity: usize,
}

impl Default for DownloadTracker {
    fn default() -> Self {
        Self::new(ENGINE_REPORTS_CANCELLED)
    }
}

impl DownloadTracker {
    /// `keep_cancelled` holds cancelled requests until the engine reports them,
    /// so that report is not mistaken for another request with the same URL.
    pub fn new(keep_cancelled: bool) -> Self {
        Self {
            requests: BTreeMap::new(),
            next_id: 0,
            keep_cancelled,
            capacity: MAX_TRACKED,
        }
    }

    #[cfg(test)]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Register a new request in the `Requested` state.
    pub fn request(&mut self, url: &str, suggested_path: &Path) -> DownloadRequest {
        self.next_id += 1;
        let id = DownloadId(self.next_id);
        let request = DownloadRequest::new(
            id,
            url.to_string(),
            suggested_filename(suggested_path, url),
        );
        info!(%id, url, filename = %request.suggested_filename, "Download requested");
        self.requests.insert(id, request.clone());
        self.evict_stale();
        request
    }

    /// Drop the oldest settled requests whose engine report never came.
    fn evict_stale(&mut self) {
        while self.requests.len() > self.capacity {
            let stale = self
                .requests
                .values()
                .find(|r| r.state != DownloadState::Requested)
                .map(|r| r.id);
            let Some(id) = stale else { break };
            if let Some(dropped) = self.requests.remove(&id) {
                warn!(
                    %id,
                    url = %dropped.url,
                    state = ?dropped.state,
                    "No engine report for download, no longer tracking it"
                );
            }
        }
    }

    /// Apply the user's answer to the save prompt. A request can be resolved once.
    pub fn resolve(&mut self, id: DownloadId, choice: Option<PathBuf>) -> Result<Notice, AppError> {
        let request = self
            .requests
            .get_mut(&id)
            .ok_or(AppError::UnknownDownload(id))?;
        if request.state != DownloadState::Requested {
            return Err(AppError::AlreadyResolved(id));
        }

        match choice {
            Some(path) => {
                request.destination = Some(path);
                request.state = DownloadState::Accepted;
                let name = request.display_name();
                info!(%id, file = %name, "Download accepted");
                Ok(Notice::info(
                    "Download Started",
                    format!("Download of '{}' started.", name),
                ))
            }
            None => {
                request.state = DownloadState::Cancelled;
                info!(%id, "Download cancelled by user");
                if !self.keep_cancelled {
                    self.requests.remove(&id);
                }
                Ok(Notice::warning(
                    "Download Cancelled",
                    "File download was cancelled by the user.",
                ))
            }
        }
    }

    /// Close out the oldest accepted or cancelled request for `url`.
    ///
    /// Returns the closed request and the notice to show, if any. Cancelled
    /// requests close silently. `None` when nothing matches.
    pub fn complete(
        &mut self,
        url: &str,
        outcome: DownloadOutcome,
    ) -> Option<(DownloadRequest, Option<Notice>)> {
        let id = self
            .requests
            .values()
            .find(|r| {
                r.url == url
                    && matches!(r.state, DownloadState::Accepted | DownloadState::Cancelled)
            })
            .map(|r| r.id)?;
        let mut request = self.requests.remove(&id)?;
        if request.state == DownloadState::Cancelled {
            debug!(%id, ?outcome, "Engine closed cancelled download");
            return Some((request, None));
        }
        let name = request.display_name();

        let notice = match outcome {
            DownloadOutcome::Finished => {
                request.state = DownloadState::Finished;
                info!(%id, file = %name, "Download finished");
                Notice::info(
                    "Download Complete",
                    format!("Download of '{}' finished successfully.", name),
                )
            }
            DownloadOutcome::Interrupted(reason) => {
                request.state = DownloadState::Interrupted;
                request.interrupt_reason = Some(reason.clone());
                let err = AppError::DownloadInterrupted {
                    file_name: name,
                    reason,
                };
                warn!(%id, "{}", err);
                Notice::error("Download Failed", err.to_string())
            }
        };

        Some((request, Some(notice)))
    }

    #[cfg(test)]
    pub fn get(&self, id: DownloadId) -> Option<&DownloadRequest> {
        self.requests.get(&id)
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }
}

/// Reason text for a download the engine reported as unsuccessful.
pub fn interrupt_reason(path: Option<&Path>) -> String {
    match path {
        Some(_) => "the download did not complete".to_string(),
        None => "no file was written".to_string(),
    }
}

/// Bridges engine download callbacks to the save prompt and user notices.
pub struct DownloadMediator<P, N> {
    prompt: P,
    notifier: N,
    tracker: RefCell<DownloadTracker>,
}

impl<P: SavePrompt, N: Notifier> DownloadMediator<P, N> {
    pub fn new(prompt: P, notifier: N) -> Self {
        Self::with_tracker(prompt, notifier, DownloadTracker::default())
    }

    pub fn with_tracker(prompt: P, notifier: N, tracker: DownloadTracker) -> Self {
        Self {
            prompt,
            notifier,
            tracker: RefCell::new(tracker),
        }
    }

    /// Engine asked to start a download. `destination` holds the engine's
    /// suggestion on entry and the chosen path on acceptance.
    ///
    /// Returns whether the engine should proceed.
    pub fn on_download_started(&self, url: &str, destination: &mut PathBuf) -> bool {
        // Dialogs run nested event loops; the tracker must not stay borrowed across them.
        let request = self.tracker.borrow_mut().request(url, destination.as_path());

        // Step 1: Ask where to save
        let choice = self.prompt.choose_save_path(&request.suggested_filename);
        let accepted = choice.clone();

        // Step 2: Record the answer
        let resolved = self.tracker.borrow_mut().resolve(request.id, choice);
        match resolved {
            Ok(notice) => {
                if let Some(path) = accepted.as_ref() {
                    *destination = path.clone();
                }
                self.notifier.notify(&notice);
                accepted.is_some()
            }
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }

    /// Engine finished with a download, successfully or not.
    pub fn on_download_completed(&self, url: &str, path: Option<PathBuf>, success: bool) {
        let outcome = if success {
            DownloadOutcome::Finished
        } else {
            DownloadOutcome::Interrupted(interrupt_reason(path.as_deref()))
        };

        let completed = self.tracker.borrow_mut().complete(url, outcome);
        match completed {
            Some((request, notice)) => {
                debug!(
                    id = %request.id,
                    state = ?request.state,
                    reason = ?request.interrupt_reason,
                    "Download closed"
                );
                if let Some(notice) = notice {
                    self.notifier.notify(&notice);
                }
            }
            None => warn!(url, "Completion for a download that was never accepted"),
        }
        debug!(in_flight = self.tracker.borrow().len(), "Download bookkeeping");
    }

    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.tracker.borrow().len()
    }
}

pub mod dialogs;

use serde::Deserialize;
use wry::WebView;

use crate::domain::AppError;

pub use dialogs::{RfdNotifier, RfdSavePrompt};

/// Messages posted by the toolbar strip over IPC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum NavAction {
    Back,
    Forward,
    Reload,
}

impl NavAction {
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

/// Navigation operations provided by the rendering engine.
pub trait Navigator {
    fn back(&self) -> Result<(), AppError>;
    fn forward(&self) -> Result<(), AppError>;
    fn reload(&self) -> Result<(), AppError>;

    fn navigate(&self, action: NavAction) -> Result<(), AppError> {
        match action {
            NavAction::Back => self.back(),
            NavAction::Forward => self.forward(),
            NavAction::Reload => self.reload(),
        }
    }
}

impl Navigator for WebView {
    fn back(&self) -> Result<(), AppError> {
        self.evaluate_script("history.back();")
            .map_err(|e| AppError::WebView(e.to_string()))
    }

    fn forward(&self) -> Result<(), AppError> {
        self.evaluate_script("history.forward();")
            .map_err(|e| AppError::WebView(e.to_string()))
    }

    fn reload(&self) -> Result<(), AppError> {
        WebView::reload(self).map_err(|e| AppError::WebView(e.to_string()))
    }
}

/// Navigation strip shown above the editor.
pub const TOOLBAR_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<style>
  html, body { margin: 0; height: 100%; overflow: hidden; }
  body {
    display: flex; align-items: center; gap: 4px; padding: 0 6px;
    background: #f3f3f3; border-bottom: 1px solid #d0d0d0;
    font: 13px system-ui, sans-serif; user-select: none;
  }
  button {
    height: 28px; min-width: 32px; border: 1px solid transparent;
    border-radius: 4px; background: transparent; font-size: 16px; cursor: pointer;
  }
  button:hover { background: #e2e2e2; border-color: #c8c8c8; }
  button:active { background: #d5d5d5; }
</style>
</head>
<body>
  <button data-action="back" title="Go back to the previous page">&#8592;</button>
  <button data-action="forward" title="Go forward to the next page">&#8594;</button>
  <button data-action="reload" title="Reload current page">&#8635;</button>
  <script>
    document.querySelectorAll('button[data-action]').forEach(function (button) {
      button.addEventListener('click', function () {
        window.ipc.postMessage(JSON.stringify({ action: button.dataset.action }));
      });
    });
  </script>
</body>
</html>
"#;

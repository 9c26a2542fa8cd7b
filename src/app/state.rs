// MailTriage - app/state.rs
//
// Application state management. Holds the form drafts, the latest
// classification result, service availability, and the request flags
// panels use to talk to the app shell.
// Owned by the eframe::App implementation.

use crate::core::draft::{EmailDraft, UploadDraft};
use crate::core::model::{ClassificationResult, ServiceLimits, ServiceStatus, Submission, Tab};
use std::path::PathBuf;

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Base URL of the classification service (CLI > config > default).
    pub api_base_url: String,

    /// Which input tab is active.
    pub active_tab: Tab,

    /// Compose tab form state.
    pub compose: EmailDraft,

    /// Upload tab form state.
    pub upload: UploadDraft,

    /// Whether a classification request is currently in flight.
    pub classify_in_progress: bool,

    /// Most recently applied classification result.
    pub result: Option<ClassificationResult>,

    /// One-shot flag: scroll the result into view on the next frame.
    /// Set when a result arrives while the narrow layout is active.
    pub scroll_to_result: bool,

    /// Modal error text. While this is Some, a dialog blocks the UI.
    pub error_dialog: Option<String>,

    /// Status message for the status bar.
    pub status_message: String,

    /// Last known service availability.
    pub service_status: ServiceStatus,

    /// Whether to show the About dialog.
    pub show_about: bool,

    // -- Request flags (panels write, the app shell consumes) --
    /// A panel submitted a validated draft for classification.
    pub pending_submit: Option<Submission>,

    /// A panel requested cancellation of the in-flight request.
    pub request_cancel: bool,

    /// A panel requested the native file picker for the upload tab.
    pub request_pick_file: bool,

    /// A panel (or startup) requested a service availability check.
    pub request_health_check: bool,
}

impl AppState {
    /// Create initial state.
    ///
    /// `preload_file` is an email file passed on the command line; when
    /// present the application opens on the upload tab with it attached.
    pub fn new(api_base_url: String, preload_file: Option<PathBuf>) -> Self {
        let active_tab = if preload_file.is_some() {
            Tab::Upload
        } else {
            Tab::Compose
        };

        Self {
            api_base_url,
            active_tab,
            compose: EmailDraft::default(),
            upload: UploadDraft {
                file: preload_file,
                ..UploadDraft::default()
            },
            classify_in_progress: false,
            result: None,
            scroll_to_result: false,
            error_dialog: None,
            status_message: "Ready. Compose an email or attach a file to classify.".to_string(),
            service_status: ServiceStatus::Unknown,
            show_about: false,
            pending_submit: None,
            request_cancel: false,
            request_pick_file: false,
            request_health_check: true,
        }
    }

    /// Switch the active input tab.
    ///
    /// Takes the target tab explicitly so startup preloads and menu
    /// actions share one path with the tab buttons.  Always clears the
    /// previous result: a result lingering next to the other form's
    /// content reads as a result for that form.
    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
        self.result = None;
        self.scroll_to_result = false;
    }

    /// Upload limits currently in force: the live ones after a
    /// successful availability check, compiled-in defaults otherwise.
    pub fn upload_limits(&self) -> ServiceLimits {
        self.service_status.limits()
    }
}

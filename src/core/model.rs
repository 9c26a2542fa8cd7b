// MailTriage - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no UI
// or platform dependencies.
//
// These types are the shared vocabulary across all layers.  The wire
// types mirror the classification service's JSON schemas exactly; field
// names here are field names on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::util::constants::{DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_UPLOAD_EXTENSIONS};

// =============================================================================
// Classification request (wire format, POST /classify)
// =============================================================================

/// JSON body of a text classification request.
///
/// Exactly these three fields; the service rejects bodies with a missing
/// sender, subject, or body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRequest {
    /// Sender email address.
    pub sender: String,

    /// Email subject line.
    pub subject: String,

    /// Full email body text.
    pub body: String,
}

// =============================================================================
// Submission (validated, ready to transmit)
// =============================================================================

/// A validated classification job, produced from a draft and consumed by
/// the classify worker.  Building one of these is the only way to start
/// a request, so anything in flight has already passed validation.
#[derive(Debug, Clone)]
pub enum Submission {
    /// Pasted email text, sent as JSON to /classify.
    Text(ClassificationRequest),

    /// An email file, sent as a multipart form to /classify/upload.
    /// `subject` is already defaulted: blank subjects are substituted
    /// with the service's placeholder before a Submission is built.
    Upload {
        sender: String,
        subject: String,
        file: PathBuf,
    },
}

impl Submission {
    /// Short mode name for logs and status messages.
    pub fn mode(&self) -> &'static str {
        match self {
            Submission::Text(_) => "text",
            Submission::Upload { .. } => "upload",
        }
    }
}

// =============================================================================
// Classification result (wire format, response body)
// =============================================================================

/// A successful classification response.
///
/// `category` and `suggested_reply` are always present.  The remaining
/// fields are optional extras; the upload endpoint additionally reports
/// file metadata.  Category strings are owned by the service and shown
/// verbatim, never re-translated client-side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClassificationResult {
    /// Assigned category (e.g. "Produtivo", "Improdutivo").
    pub category: String,

    /// Model confidence in the 0.0-1.0 range.
    pub confidence: Option<f64>,

    /// Ready-to-send reply text for this category.
    pub suggested_reply: String,

    /// Keywords the classifier keyed on.
    pub keywords: Option<Vec<String>>,

    /// Normalised text the classifier actually saw.
    pub processed_text: Option<String>,

    /// Original name of the uploaded file (upload endpoint only).
    pub filename: Option<String>,

    /// Extension of the uploaded file, with leading dot (upload endpoint only).
    pub file_type: Option<String>,

    /// First part of the text extracted from the file (upload endpoint only).
    pub extracted_text_preview: Option<String>,
}

impl ClassificationResult {
    /// Lowercased category used to pick the badge colour.  The mapping is
    /// case-insensitive so "Produtivo" and "PRODUTIVO" style the same.
    pub fn badge_key(&self) -> String {
        self.category.to_lowercase()
    }
}

/// Error body the service attaches to non-success responses.
/// `detail` is the human-readable explanation; absent or unparseable
/// bodies fall back to a generic client-side message.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub detail: Option<String>,
}

// =============================================================================
// Service health (wire format, GET /health)
// =============================================================================

/// Raw health endpoint response.  Every field is optional so a sparse or
/// older service build still parses.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: Option<String>,
    pub message: Option<String>,
    pub supported_formats: Option<Vec<String>>,
    pub max_file_size_mb: Option<f64>,
}

/// A completed availability check, normalised for display and for
/// deriving upload limits.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceHealth {
    /// Service-reported status string (usually "ok").
    pub status: String,

    /// Service-reported banner message, if any.
    pub message: Option<String>,

    /// Accepted extensions as reported, normalised to lowercase without
    /// the leading dot.  Empty when the service did not report any.
    pub supported_extensions: Vec<String>,

    /// Reported upload size limit in megabytes.
    pub max_file_size_mb: Option<f64>,

    /// When this check completed.
    pub checked_at: DateTime<Utc>,
}

impl ServiceHealth {
    /// Builds a normalised health record from a raw response.
    pub fn from_response(response: HealthResponse, checked_at: DateTime<Utc>) -> Self {
        let supported_extensions = response
            .supported_formats
            .unwrap_or_default()
            .iter()
            .map(|f| f.trim_start_matches('.').to_lowercase())
            .filter(|f| !f.is_empty())
            .collect();

        ServiceHealth {
            status: response.status.unwrap_or_else(|| "ok".to_string()),
            message: response.message,
            supported_extensions,
            max_file_size_mb: response.max_file_size_mb,
            checked_at,
        }
    }

    /// Upload limits derived from this check.  Fields the service did not
    /// report fall back to the compiled-in defaults.
    pub fn limits(&self) -> ServiceLimits {
        let supported_extensions = if self.supported_extensions.is_empty() {
            ServiceLimits::default().supported_extensions
        } else {
            self.supported_extensions.clone()
        };

        let max_file_size_bytes = match self.max_file_size_mb {
            Some(mb) if mb > 0.0 => (mb * 1024.0 * 1024.0) as u64,
            _ => DEFAULT_MAX_UPLOAD_BYTES,
        };

        ServiceLimits {
            supported_extensions,
            max_file_size_bytes,
        }
    }
}

/// What the service will accept on the upload endpoint.  Validation uses
/// these so a file the service would reject never leaves the client.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceLimits {
    /// Accepted extensions, lowercase without the leading dot.
    pub supported_extensions: Vec<String>,

    /// Maximum file size in bytes.
    pub max_file_size_bytes: u64,
}

impl Default for ServiceLimits {
    fn default() -> Self {
        ServiceLimits {
            supported_extensions: DEFAULT_UPLOAD_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            max_file_size_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ServiceLimits {
    /// Case-insensitive extension check.  `extension` is without the dot.
    pub fn allows_extension(&self, extension: &str) -> bool {
        let ext = extension.to_lowercase();
        self.supported_extensions.iter().any(|e| *e == ext)
    }
}

// =============================================================================
// Service status (availability state machine)
// =============================================================================

/// Where the client currently stands with the service.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceStatus {
    /// No check has completed yet.
    Unknown,

    /// A check is in flight.
    Checking,

    /// Last check succeeded.
    Online(ServiceHealth),

    /// Last check failed.
    Unreachable {
        error: String,
        checked_at: DateTime<Utc>,
    },
}

impl ServiceStatus {
    /// Short label for the status bar.
    pub fn short_label(&self) -> &'static str {
        match self {
            ServiceStatus::Unknown => "Service: unknown",
            ServiceStatus::Checking => "Service: checking…",
            ServiceStatus::Online(_) => "Service: online",
            ServiceStatus::Unreachable { .. } => "Service: offline",
        }
    }

    /// Upload limits to validate against right now.  Anything short of a
    /// successful check falls back to the compiled-in defaults.
    pub fn limits(&self) -> ServiceLimits {
        match self {
            ServiceStatus::Online(health) => health.limits(),
            _ => ServiceLimits::default(),
        }
    }
}

// =============================================================================
// Tabs
// =============================================================================

/// The two input modes of the main window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// Paste email text into a form.
    #[default]
    Compose,

    /// Attach an email file.
    Upload,
}

impl Tab {
    /// All tabs in display order.
    pub fn all() -> &'static [Tab] {
        &[Tab::Compose, Tab::Upload]
    }

    /// Tab button label.
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Compose => "Compose",
            Tab::Upload => "Upload file",
        }
    }
}

// =============================================================================
// Classify progress (for UI updates)
// =============================================================================

/// Progress messages sent from a classify worker thread to the UI thread.
///
/// Every worker sends `Started` followed by exactly one terminal message
/// (`Completed`, `Failed`, or `Cancelled`), whatever happens in between.
/// The UI relies on that to clear its in-progress state.
#[derive(Debug, Clone)]
pub enum ClassifyProgress {
    /// The worker thread picked up the request.
    Started { request_id: u64 },

    /// The service answered with a classification.
    Completed {
        request_id: u64,
        result: ClassificationResult,
        elapsed: Duration,
    },

    /// The request failed; `error` is already display-ready.
    Failed { request_id: u64, error: String },

    /// The request was superseded or cancelled before its response was
    /// applied.
    Cancelled { request_id: u64 },
}

impl ClassifyProgress {
    /// The request this message belongs to.  Stale messages are dropped
    /// by comparing this against the newest issued id.
    pub fn request_id(&self) -> u64 {
        match self {
            ClassifyProgress::Started { request_id }
            | ClassifyProgress::Completed { request_id, .. }
            | ClassifyProgress::Failed { request_id, .. }
            | ClassifyProgress::Cancelled { request_id } => *request_id,
        }
    }

    /// True for the message that ends a request.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ClassifyProgress::Started { .. })
    }
}

/// Progress messages from a health-check worker thread.
#[derive(Debug, Clone)]
pub enum HealthProgress {
    /// The probe succeeded.
    Completed { health: ServiceHealth },

    /// The probe failed; `error` is already display-ready.
    Failed { error: String },
}

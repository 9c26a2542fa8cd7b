// MailTriage - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "MailTriage";

/// Application identifier used for config directories.
pub const APP_ID: &str = "MailTriage";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Classification service
// =============================================================================

/// Base URL of the hosted classification service.  Overridable via
/// `--api-url` on the command line or `[service] base_url` in config.toml.
pub const DEFAULT_API_URL: &str = "https://email-classifier-ai-production.up.railway.app";

/// Endpoint for classifying pasted email text (JSON body).
pub const CLASSIFY_PATH: &str = "/classify";

/// Endpoint for classifying an uploaded email file (multipart body).
pub const CLASSIFY_UPLOAD_PATH: &str = "/classify/upload";

/// Endpoint reporting service availability and upload limits.
pub const HEALTH_PATH: &str = "/health";

/// Subject transmitted when the upload form's subject field is left blank.
/// The service treats this exact byte sequence as its own default; do not
/// translate or re-case it.
pub const DEFAULT_UPLOAD_SUBJECT: &str = "Email importado";

// =============================================================================
// Upload limits
// =============================================================================

/// File extensions the service accepts, lowercase without the leading dot.
/// Used until a successful health check reports the live list.
pub const DEFAULT_UPLOAD_EXTENSIONS: &[&str] = &["txt", "pdf"];

/// Maximum upload size in bytes the service accepts.  Used until a
/// successful health check reports the live limit.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024; // 5 MiB

// =============================================================================
// Timeouts
// =============================================================================

/// Deadline for the availability probe (seconds).  Classification requests
/// deliberately carry no deadline: the service may take tens of seconds on
/// large attachments, and a slow answer is still an answer.
pub const HEALTH_CHECK_TIMEOUT_SECS: u64 = 10;

/// Repaint interval while a request or probe is outstanding (milliseconds),
/// so worker messages are noticed promptly without input events.
pub const PROGRESS_POLL_INTERVAL_MS: u64 = 100;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

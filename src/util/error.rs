// MailTriage - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Worker threads flatten these to display strings only at the channel
// boundary; everywhere else the structured variants are propagated.

use std::fmt;
use std::io;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Service API errors
// ---------------------------------------------------------------------------

/// Errors produced while talking to the classification service.
#[derive(Debug)]
pub enum ApiError {
    /// The HTTP client itself could not be constructed (TLS backend init).
    ClientBuild { source: reqwest::Error },

    /// The request never received an HTTP response (DNS, refused
    /// connection, dropped socket).
    Transport { url: String, source: reqwest::Error },

    /// The service answered with a non-success status.  `detail` carries
    /// the service's own explanation when the error body provided one.
    Status { status: u16, detail: Option<String> },

    /// The response status was success but the body did not decode as a
    /// classification result.
    Decode { url: String, source: reqwest::Error },

    /// The attachment could not be read while building the upload form.
    Attachment { path: PathBuf, source: io::Error },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientBuild { source } => {
                write!(f, "Cannot initialise the HTTP client: {source}")
            }
            Self::Transport { url, source } => {
                write!(
                    f,
                    "Cannot reach the classification service at '{url}': {source}"
                )
            }
            // The service's own wording is shown verbatim when present;
            // otherwise a generic message naming the status code.
            Self::Status {
                detail: Some(detail),
                ..
            } => write!(f, "{detail}"),
            Self::Status { status, .. } => {
                write!(
                    f,
                    "The classification service returned an error (HTTP {status})"
                )
            }
            Self::Decode { url, source } => {
                write!(f, "Unexpected response from '{url}': {source}")
            }
            Self::Attachment { path, source } => {
                write!(f, "Cannot read attachment '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ClientBuild { source } => Some(source),
            Self::Transport { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
            Self::Attachment { source, .. } => Some(source),
            Self::Status { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Draft validation errors
// ---------------------------------------------------------------------------

/// Errors raised when a compose or upload draft is not fit to submit.
/// Displayed to the user as-is, so messages are written as complete,
/// actionable sentences.
#[derive(Debug)]
pub enum DraftError {
    /// Sender field is empty.
    MissingSender,

    /// Sender field is present but not shaped like an email address.
    InvalidSender,

    /// Subject field is empty (compose tab only; uploads substitute a
    /// default subject instead).
    MissingSubject,

    /// Body field is empty.
    MissingBody,

    /// No file has been chosen on the upload tab.
    NoFileSelected,

    /// The chosen file no longer exists on disk.
    FileNotFound { path: PathBuf },

    /// The chosen path exists but is not a regular file (a directory
    /// passed on the command line, for instance).
    NotAFile { path: PathBuf },

    /// The chosen file exists but its metadata could not be read.
    FileUnreadable { path: PathBuf, source: io::Error },

    /// The chosen file's extension is not accepted by the service.
    UnsupportedExtension {
        extension: String,
        supported: Vec<String>,
    },

    /// The chosen file exceeds the service's upload size limit.
    FileTooLarge { size: u64, max: u64 },
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSender => write!(f, "Enter a sender email address"),
            Self::InvalidSender => {
                write!(f, "The sender address must contain an '@'")
            }
            Self::MissingSubject => write!(f, "Enter a subject"),
            Self::MissingBody => write!(f, "Enter the email text to classify"),
            Self::NoFileSelected => write!(f, "Choose an email file to upload"),
            Self::FileNotFound { path } => {
                write!(f, "File '{}' no longer exists", path.display())
            }
            Self::NotAFile { path } => {
                write!(f, "'{}' is not a file", path.display())
            }
            Self::FileUnreadable { path, source } => {
                write!(f, "Cannot read file '{}': {source}", path.display())
            }
            Self::UnsupportedExtension {
                extension,
                supported,
            } => {
                let accepted = supported
                    .iter()
                    .map(|e| format!(".{e}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                if extension.is_empty() {
                    write!(f, "The file has no extension. Accepted: {accepted}")
                } else {
                    write!(
                        f,
                        "Files of type '.{extension}' are not supported. Accepted: {accepted}"
                    )
                }
            }
            Self::FileTooLarge { size, max } => {
                let mb = |b: u64| b as f64 / (1024.0 * 1024.0);
                write!(
                    f,
                    "The file is {:.1} MB; the service accepts at most {:.1} MB",
                    mb(*size),
                    mb(*max)
                )
            }
        }
    }
}

impl std::error::Error for DraftError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileUnreadable { source, .. } => Some(source),
            _ => None,
        }
    }
}

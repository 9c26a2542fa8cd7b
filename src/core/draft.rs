// MailTriage - core/draft.rs
//
// Compose and upload form state, plus the validation that turns a draft
// into a transmittable Submission.  Building a Submission is the only
// way to start a request, so the classify worker never sees an invalid
// draft and a file the service would reject never leaves the machine.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::model::{ClassificationRequest, ServiceLimits, Submission};
use crate::util::constants::DEFAULT_UPLOAD_SUBJECT;
use crate::util::error::DraftError;

// =============================================================================
// Compose draft
// =============================================================================

/// Form state of the Compose tab.  Field values are transmitted exactly
/// as typed; nothing is trimmed or re-encoded on the way out.
#[derive(Debug, Clone, Default)]
pub struct EmailDraft {
    pub sender: String,
    pub subject: String,
    pub body: String,
}

impl EmailDraft {
    /// Checks the draft without building a submission.  Pure field
    /// checks only, cheap enough to run every frame for button
    /// enablement.
    pub fn validate(&self) -> Result<(), DraftError> {
        validate_sender(&self.sender)?;
        if self.subject.trim().is_empty() {
            return Err(DraftError::MissingSubject);
        }
        if self.body.trim().is_empty() {
            return Err(DraftError::MissingBody);
        }
        Ok(())
    }

    /// Builds the JSON submission for the /classify endpoint.
    pub fn to_submission(&self) -> Result<Submission, DraftError> {
        self.validate()?;
        Ok(Submission::Text(ClassificationRequest {
            sender: self.sender.clone(),
            subject: self.subject.clone(),
            body: self.body.clone(),
        }))
    }
}

// =============================================================================
// Upload draft
// =============================================================================

/// Form state of the Upload tab.
#[derive(Debug, Clone, Default)]
pub struct UploadDraft {
    pub sender: String,
    pub subject: String,
    pub file: Option<PathBuf>,
}

impl UploadDraft {
    /// Cheap completeness check for button enablement.  Touches no
    /// filesystem; the file checks run in `to_submission` at submit
    /// time, when staleness actually matters.
    pub fn is_complete(&self) -> bool {
        validate_sender(&self.sender).is_ok() && self.file.is_some()
    }

    /// Subject that will be transmitted.  A blank subject is replaced
    /// with the service's own placeholder here, exactly once, so the
    /// worker and the wire always carry a concrete subject.
    pub fn effective_subject(&self) -> String {
        if self.subject.trim().is_empty() {
            DEFAULT_UPLOAD_SUBJECT.to_string()
        } else {
            self.subject.clone()
        }
    }

    /// Builds the multipart submission for the /classify/upload
    /// endpoint, enforcing `limits` on the chosen file.
    pub fn to_submission(&self, limits: &ServiceLimits) -> Result<Submission, DraftError> {
        validate_sender(&self.sender)?;
        let file = self.file.as_ref().ok_or(DraftError::NoFileSelected)?;
        check_file(file, limits)?;
        Ok(Submission::Upload {
            sender: self.sender.clone(),
            subject: self.effective_subject(),
            file: file.clone(),
        })
    }
}

// =============================================================================
// Shared checks
// =============================================================================

/// Same shallow shape check the service applies on its side; full
/// address validation is the service's job.
fn validate_sender(sender: &str) -> Result<(), DraftError> {
    if sender.trim().is_empty() {
        return Err(DraftError::MissingSender);
    }
    if !sender.contains('@') {
        return Err(DraftError::InvalidSender);
    }
    Ok(())
}

/// Existence, type, extension, and size checks against the service's
/// current limits.  Checked in the same order the service checks them
/// so the local message matches what a round trip would have said.
fn check_file(path: &Path, limits: &ServiceLimits) -> Result<(), DraftError> {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(DraftError::FileNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => {
            return Err(DraftError::FileUnreadable {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    if !metadata.is_file() {
        return Err(DraftError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if !limits.allows_extension(&extension) {
        return Err(DraftError::UnsupportedExtension {
            extension,
            supported: limits.supported_extensions.clone(),
        });
    }

    if metadata.len() > limits.max_file_size_bytes {
        return Err(DraftError::FileTooLarge {
            size: metadata.len(),
            max: limits.max_file_size_bytes,
        });
    }

    Ok(())
}

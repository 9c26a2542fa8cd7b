// MailTriage - app/classify.rs
//
// Classification request lifecycle. Each submission runs on its own
// background thread, sending progress messages to the UI thread via an
// mpsc channel.
//
// Architecture:
//   - `ClassifyManager` lives on the UI thread; `run_classification` runs
//     on a background thread.
//   - Every request gets a fresh id.  Starting a new request supersedes
//     the previous one; the UI drops messages whose id is not current, so
//     a slow response can never overwrite a newer one.
//   - An `Arc<AtomicBool>` cancel flag lets the UI abandon a request; the
//     HTTP call itself is not aborted, but its outcome is discarded.
//   - Every worker sends `Started` and then exactly one terminal message
//     (`Completed`, `Failed`, or `Cancelled`), so in-progress state in
//     the UI always clears.

use crate::core::model::{
    ApiErrorBody, ClassificationRequest, ClassificationResult, ClassifyProgress, Submission,
};
use crate::util::constants::{
    APP_NAME, APP_VERSION, CLASSIFY_PATH, CLASSIFY_UPLOAD_PATH,
};
use crate::util::error::ApiError;
use reqwest::blocking::{multipart, Client};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

// =============================================================================
// ClassifyManager
// =============================================================================

/// Manages classification requests on background threads.
pub struct ClassifyManager {
    /// Channel receiver for the UI to poll progress messages.
    pub progress_rx: Option<mpsc::Receiver<ClassifyProgress>>,

    /// Cancel flag shared with the current request's background thread.
    cancel_flag: Option<Arc<AtomicBool>>,

    /// Id handed to the next request.
    next_request_id: u64,

    /// Newest issued request id.  Messages from any other id are stale.
    current_request_id: Option<u64>,
}

impl ClassifyManager {
    pub fn new() -> Self {
        Self {
            progress_rx: None,
            cancel_flag: None,
            next_request_id: 1,
            current_request_id: None,
        }
    }

    /// Start classifying `submission` against the service at `base_url`.
    ///
    /// Spawns a background thread immediately; progress is sent over the
    /// channel.  Any request still in flight is superseded first.
    /// Returns the new request's id.
    pub fn start_classification(&mut self, base_url: &str, submission: Submission) -> u64 {
        // Supersede the previous request; its response is stale now.
        self.cancel_current();

        let request_id = self.next_request_id;
        self.next_request_id += 1;

        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));

        self.progress_rx = Some(rx);
        self.cancel_flag = Some(Arc::clone(&cancel));
        self.current_request_id = Some(request_id);

        tracing::info!(request_id, mode = submission.mode(), "Classification started");

        let base_url = base_url.to_string();
        std::thread::spawn(move || {
            run_classification(request_id, &base_url, submission, tx, cancel);
        });

        request_id
    }

    /// Abandon the in-flight request, if any.
    ///
    /// The worker thread is not interrupted mid-call; it will notice the
    /// flag when its response arrives and send `Cancelled` instead of a
    /// result.  Clearing the current id makes anything it already sent
    /// stale.
    pub fn cancel_current(&mut self) {
        if let Some(flag) = &self.cancel_flag {
            flag.store(true, Ordering::SeqCst);
        }
        self.cancel_flag = None;
        self.current_request_id = None;
    }

    /// True when `request_id` is the newest issued request.  Messages
    /// from any other id must be discarded, never applied.
    pub fn is_current(&self, request_id: u64) -> bool {
        self.current_request_id == Some(request_id)
    }

    /// Poll for progress messages without blocking. Returns all pending messages.
    pub fn poll_progress(&self) -> Vec<ClassifyProgress> {
        let mut messages = Vec::new();
        if let Some(ref rx) = self.progress_rx {
            while let Ok(msg) = rx.try_recv() {
                messages.push(msg);
            }
        }
        messages
    }
}

impl Default for ClassifyManager {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Background request pipeline
// =============================================================================

/// Full request pipeline: build client → transmit → decode → deliver.
///
/// Runs on a background thread. Sends `ClassifyProgress` messages to `tx`.
fn run_classification(
    request_id: u64,
    base_url: &str,
    submission: Submission,
    tx: mpsc::Sender<ClassifyProgress>,
    cancel: Arc<AtomicBool>,
) {
    macro_rules! send {
        ($msg:expr) => {
            if tx.send($msg).is_err() {
                return; // Receiver dropped (superseded or UI closed); exit quietly.
            }
        };
    }

    send!(ClassifyProgress::Started { request_id });

    let started = Instant::now();

    // No overall deadline on classification: the service may take tens of
    // seconds on large attachments, and a slow answer is still an answer.
    let client = match build_client(None) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(request_id, error = %e, "HTTP client construction failed");
            send!(ClassifyProgress::Failed {
                request_id,
                error: e.to_string(),
            });
            return;
        }
    };

    let outcome = match &submission {
        Submission::Text(request) => classify_text(&client, base_url, request),
        Submission::Upload {
            sender,
            subject,
            file,
        } => classify_upload(&client, base_url, sender, subject, file),
    };

    // A response that lands after cancellation is discarded here, so a
    // result can never race a cancel the user already saw take effect.
    if cancel.load(Ordering::SeqCst) {
        tracing::debug!(request_id, "Response discarded after cancellation");
        send!(ClassifyProgress::Cancelled { request_id });
        return;
    }

    match outcome {
        Ok(result) => {
            let elapsed = started.elapsed();
            tracing::info!(
                request_id,
                category = %result.category,
                reply_len = result.suggested_reply.len(),
                elapsed_ms = elapsed.as_millis() as u64,
                "Classification complete"
            );
            send!(ClassifyProgress::Completed {
                request_id,
                result,
                elapsed,
            });
        }
        Err(e) => {
            tracing::error!(request_id, error = %e, "Classification failed");
            send!(ClassifyProgress::Failed {
                request_id,
                error: e.to_string(),
            });
        }
    }
}

/// POST the draft as JSON to /classify.
fn classify_text(
    client: &Client,
    base_url: &str,
    request: &ClassificationRequest,
) -> Result<ClassificationResult, ApiError> {
    let url = join_endpoint(base_url, CLASSIFY_PATH);
    tracing::debug!(
        url = %url,
        subject_len = request.subject.len(),
        body_len = request.body.len(),
        "Transmitting text classification request"
    );

    let response = client
        .post(&url)
        .json(request)
        .send()
        .map_err(|e| ApiError::Transport {
            url: url.clone(),
            source: e,
        })?;

    decode_json_response(response, &url)
}

/// POST the file and its metadata as a multipart form to /classify/upload.
/// The form carries exactly three parts: sender, subject, file.
fn classify_upload(
    client: &Client,
    base_url: &str,
    sender: &str,
    subject: &str,
    file: &Path,
) -> Result<ClassificationResult, ApiError> {
    let url = join_endpoint(base_url, CLASSIFY_UPLOAD_PATH);
    tracing::debug!(url = %url, file = %file.display(), "Transmitting upload classification request");

    let form = multipart::Form::new()
        .text("sender", sender.to_string())
        .text("subject", subject.to_string())
        .file("file", file)
        .map_err(|e| ApiError::Attachment {
            path: file.to_path_buf(),
            source: e,
        })?;

    let response = client
        .post(&url)
        .multipart(form)
        .send()
        .map_err(|e| ApiError::Transport {
            url: url.clone(),
            source: e,
        })?;

    decode_json_response(response, &url)
}

// =============================================================================
// Shared HTTP helpers (also used by the health checker)
// =============================================================================

/// Build a blocking HTTP client.  `timeout` of `None` means no overall
/// deadline.
pub(crate) fn build_client(timeout: Option<Duration>) -> Result<Client, ApiError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(format!("{APP_NAME}/{APP_VERSION}"))
        .build()
        .map_err(|e| ApiError::ClientBuild { source: e })
}

/// Map a raw HTTP response to a decoded body or a typed error.
///
/// Non-success statuses become `ApiError::Status`, carrying the service's
/// `detail` string when the error body provides one; a body that is not
/// JSON simply yields no detail.
pub(crate) fn decode_json_response<T: serde::de::DeserializeOwned>(
    response: reqwest::blocking::Response,
    url: &str,
) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let detail = response
            .json::<ApiErrorBody>()
            .ok()
            .and_then(|body| body.detail);
        return Err(ApiError::Status {
            status: status.as_u16(),
            detail,
        });
    }

    response.json::<T>().map_err(|e| ApiError::Decode {
        url: url.to_string(),
        source: e,
    })
}

/// Join the configured base URL with an endpoint path.  Tolerates a
/// trailing slash on the base so config values round-trip unchanged.
pub(crate) fn join_endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_endpoint_with_and_without_trailing_slash() {
        assert_eq!(
            join_endpoint("http://localhost:8000", "/classify"),
            "http://localhost:8000/classify"
        );
        assert_eq!(
            join_endpoint("http://localhost:8000/", "/classify"),
            "http://localhost:8000/classify"
        );
        assert_eq!(
            join_endpoint("http://localhost:8000//", "/classify/upload"),
            "http://localhost:8000/classify/upload"
        );
    }

    #[test]
    fn test_request_ids_increase_and_supersede() {
        let mut manager = ClassifyManager::new();
        assert!(!manager.is_current(1));

        // Ids are only compared, never dereferenced, so exercising the
        // bookkeeping without a live service is fine: the spawned workers
        // fail on transport and their messages land in replaced channels.
        let first = manager.start_classification(
            "http://127.0.0.1:9",
            Submission::Text(ClassificationRequest {
                sender: "a@b.com".to_string(),
                subject: "Hi".to_string(),
                body: "test".to_string(),
            }),
        );
        assert!(manager.is_current(first));

        let second = manager.start_classification(
            "http://127.0.0.1:9",
            Submission::Text(ClassificationRequest {
                sender: "a@b.com".to_string(),
                subject: "Hi".to_string(),
                body: "test".to_string(),
            }),
        );
        assert!(second > first);
        assert!(!manager.is_current(first));
        assert!(manager.is_current(second));

        manager.cancel_current();
        assert!(!manager.is_current(second));
    }
}

// MailTriage - app/health.rs
//
// Service availability probing.  A probe is a single GET /health on a
// background thread with a short deadline; the outcome feeds the status
// bar and the upload limits used for file validation.

use crate::app::classify::{build_client, decode_json_response, join_endpoint};
use crate::core::model::{HealthProgress, HealthResponse, ServiceHealth};
use crate::util::constants::{HEALTH_CHECK_TIMEOUT_SECS, HEALTH_PATH};
use crate::util::error::ApiError;
use std::sync::mpsc;
use std::time::Duration;

/// Manages availability probes on background threads.
pub struct HealthManager {
    /// Channel receiver for the UI to poll probe outcomes.
    pub progress_rx: Option<mpsc::Receiver<HealthProgress>>,
}

impl HealthManager {
    pub fn new() -> Self {
        Self { progress_rx: None }
    }

    /// Start a probe against the service at `base_url`.
    ///
    /// Starting a new probe replaces the previous channel, so a stale
    /// probe's outcome is silently dropped.  Probes carry their own
    /// short deadline and need no cancel flag.
    pub fn start_check(&mut self, base_url: &str) {
        let (tx, rx) = mpsc::channel();
        self.progress_rx = Some(rx);

        tracing::debug!(url = %base_url, "Service health check started");

        let base_url = base_url.to_string();
        std::thread::spawn(move || {
            let message = match fetch_health(&base_url) {
                Ok(health) => {
                    tracing::info!(status = %health.status, "Service reachable");
                    HealthProgress::Completed { health }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Service health check failed");
                    HealthProgress::Failed {
                        error: e.to_string(),
                    }
                }
            };
            // Send failure means the receiver was replaced or the UI
            // closed; either way the outcome is already irrelevant.
            let _ = tx.send(message);
        });
    }

    /// Poll for probe outcomes without blocking.
    pub fn poll_progress(&self) -> Vec<HealthProgress> {
        let mut messages = Vec::new();
        if let Some(ref rx) = self.progress_rx {
            while let Ok(msg) = rx.try_recv() {
                messages.push(msg);
            }
        }
        messages
    }
}

impl Default for HealthManager {
    fn default() -> Self {
        Self::new()
    }
}

/// GET /health and normalise the response.
fn fetch_health(base_url: &str) -> Result<ServiceHealth, ApiError> {
    let client = build_client(Some(Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS)))?;
    let url = join_endpoint(base_url, HEALTH_PATH);

    let response = client.get(&url).send().map_err(|e| ApiError::Transport {
        url: url.clone(),
        source: e,
    })?;

    let raw: HealthResponse = decode_json_response(response, &url)?;
    Ok(ServiceHealth::from_response(raw, chrono::Utc::now()))
}

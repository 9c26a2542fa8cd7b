// MailTriage - tests/e2e_classify.rs
//
// End-to-end tests for the classification pipeline.
//
// These tests run the real worker threads and the real HTTP client
// against a local stand-in for the classification service -- real
// sockets, real multipart encoding, real JSON decoding. No mocks on
// the client side. The stand-in records everything that reaches it so
// wire shapes can be asserted exactly.

use mailtriage::app::classify::ClassifyManager;
use mailtriage::app::health::HealthManager;
use mailtriage::core::draft::UploadDraft;
use mailtriage::core::model::{
    ClassificationRequest, ClassifyProgress, HealthProgress, ServiceLimits, Submission,
};

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

// =============================================================================
// Stand-in classification service
// =============================================================================

/// Everything the stand-in has received, for exact wire-shape asserts.
#[derive(Debug, Default)]
struct Recorded {
    /// Raw JSON bodies POSTed to /classify.
    classify_bodies: Vec<serde_json::Value>,

    /// Decoded multipart forms POSTed to /classify/upload.
    uploads: Vec<RecordedUpload>,
}

#[derive(Debug, Clone)]
struct RecordedUpload {
    sender: String,
    subject: String,
    file_name: String,
    bytes: Vec<u8>,
}

type Shared = Arc<Mutex<Recorded>>;

/// Scripted behaviour is keyed off the subject so one stand-in serves
/// every test path: "fail-detail" answers 400 with a detail body,
/// "fail-plain" answers 500 with a non-JSON body, "slow" delays the
/// answer, anything else classifies successfully.
async fn scripted_failure(subject: &str) -> Option<Response> {
    match subject {
        "fail-detail" => Some(
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"detail": "Formato de e-mail inválido"})),
            )
                .into_response(),
        ),
        "fail-plain" => Some((StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()),
        "slow" => {
            tokio::time::sleep(Duration::from_millis(250)).await;
            None
        }
        _ => None,
    }
}

async fn classify_handler(
    State(recorded): State<Shared>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let subject = body
        .get("subject")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    recorded
        .lock()
        .expect("recorder lock")
        .classify_bodies
        .push(body);

    if let Some(failure) = scripted_failure(&subject).await {
        return failure;
    }
    Json(json!({
        "category": "Produtivo",
        "confidence": 0.93,
        "suggested_reply": "Obrigado pelo contato. Vamos analisar e retornamos em breve.",
        "keywords": ["contato", "retorno"],
    }))
    .into_response()
}

async fn upload_handler(State(recorded): State<Shared>, mut multipart: Multipart) -> Response {
    let mut sender = String::new();
    let mut subject = String::new();
    let mut file_name = String::new();
    let mut bytes: Vec<u8> = Vec::new();

    while let Some(field) = multipart.next_field().await.expect("next multipart field") {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "sender" => sender = field.text().await.expect("sender part"),
            "subject" => subject = field.text().await.expect("subject part"),
            "file" => {
                file_name = field.file_name().unwrap_or_default().to_string();
                bytes = field.bytes().await.expect("file part").to_vec();
            }
            _ => {}
        }
    }

    let preview = String::from_utf8_lossy(&bytes).to_string();
    recorded.lock().expect("recorder lock").uploads.push(RecordedUpload {
        sender,
        subject: subject.clone(),
        file_name: file_name.clone(),
        bytes,
    });

    if let Some(failure) = scripted_failure(&subject).await {
        return failure;
    }
    Json(json!({
        "category": "Produtivo",
        "confidence": 0.91,
        "suggested_reply": "Obrigado pelo contato. Vamos analisar e retornamos em breve.",
        "filename": file_name,
        "file_type": ".txt",
        "extracted_text_preview": preview,
    }))
    .into_response()
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Email Classifier AI está funcionando",
        "supported_formats": [".txt", ".pdf"],
        "max_file_size_mb": 5.0,
    }))
}

/// Start the stand-in on an ephemeral port. Returns its base URL and
/// the shared recorder. The server thread lives until the test process
/// exits; each test gets its own isolated instance.
fn spawn_stub() -> (String, Shared) {
    let recorded: Shared = Arc::new(Mutex::new(Recorded::default()));
    let recorded_for_app = Arc::clone(&recorded);
    let (addr_tx, addr_rx) = std::sync::mpsc::channel();

    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("build stand-in runtime");
        runtime.block_on(async move {
            let app = Router::new()
                .route("/classify", post(classify_handler))
                .route("/classify/upload", post(upload_handler))
                .route("/health", get(health_handler))
                .with_state(recorded_for_app);
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind stand-in listener");
            let addr = listener.local_addr().expect("stand-in local addr");
            addr_tx.send(addr).expect("publish stand-in addr");
            axum::serve(listener, app).await.expect("serve stand-in");
        });
    });

    let addr = addr_rx.recv().expect("receive stand-in addr");
    (format!("http://{addr}"), recorded)
}

// =============================================================================
// Helpers
// =============================================================================

fn text_submission(sender: &str, subject: &str, body: &str) -> Submission {
    Submission::Text(ClassificationRequest {
        sender: sender.to_string(),
        subject: subject.to_string(),
        body: body.to_string(),
    })
}

/// Poll the manager until a terminal message for `request_id` arrives,
/// returning every message seen on the way. Panics when `deadline`
/// elapses first.
fn wait_for_terminal(
    manager: &ClassifyManager,
    request_id: u64,
    deadline: Duration,
) -> Vec<ClassifyProgress> {
    let started = Instant::now();
    let mut seen = Vec::new();
    loop {
        for msg in manager.poll_progress() {
            let terminal = msg.is_terminal() && msg.request_id() == request_id;
            seen.push(msg);
            if terminal {
                return seen;
            }
        }
        assert!(
            started.elapsed() < deadline,
            "no terminal message for request {request_id} within {deadline:?}; saw {seen:?}"
        );
        thread::sleep(Duration::from_millis(10));
    }
}

/// Poll the health manager until a probe outcome arrives.
fn wait_for_health(manager: &HealthManager, deadline: Duration) -> HealthProgress {
    let started = Instant::now();
    loop {
        if let Some(msg) = manager.poll_progress().into_iter().next() {
            return msg;
        }
        assert!(
            started.elapsed() < deadline,
            "no probe outcome within {deadline:?}"
        );
        thread::sleep(Duration::from_millis(10));
    }
}

// =============================================================================
// Text classification E2E
// =============================================================================

/// A pasted email travels to /classify as exactly three JSON fields and
/// comes back as a Completed message carrying the service's result.
#[test]
fn e2e_text_classification_round_trip() {
    let (base_url, recorded) = spawn_stub();
    let mut manager = ClassifyManager::new();

    let id = manager.start_classification(&base_url, text_submission("a@b.com", "Hi", "test"));
    let messages = wait_for_terminal(&manager, id, Duration::from_secs(5));

    assert!(
        matches!(messages.first(), Some(ClassifyProgress::Started { .. })),
        "first message should be Started, got {:?}",
        messages.first()
    );
    match messages.last() {
        Some(ClassifyProgress::Completed { result, .. }) => {
            assert_eq!(result.category, "Produtivo");
            assert_eq!(result.badge_key(), "produtivo");
            assert_eq!(result.confidence, Some(0.93));
            assert_eq!(
                result.suggested_reply,
                "Obrigado pelo contato. Vamos analisar e retornamos em breve."
            );
        }
        other => panic!("expected Completed, got {other:?}"),
    }

    // The wire shape is load-bearing: the service rejects anything else.
    let bodies = recorded.lock().expect("recorder lock").classify_bodies.clone();
    assert_eq!(
        bodies,
        vec![json!({"sender": "a@b.com", "subject": "Hi", "body": "test"})]
    );
}

// =============================================================================
// Upload classification E2E
// =============================================================================

/// An attached file travels to /classify/upload as a three-part form,
/// with a blank subject replaced by the service's placeholder.
#[test]
fn e2e_upload_transmits_file_with_placeholder_subject() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let path = dir.path().join("mensagem.txt");
    std::fs::write(&path, "Feliz Natal a todos").expect("write email file");

    let draft = UploadDraft {
        sender: "a@b.com".to_string(),
        subject: "   ".to_string(),
        file: Some(path),
    };
    let submission = draft
        .to_submission(&ServiceLimits::default())
        .expect("draft should build a submission");

    let (base_url, recorded) = spawn_stub();
    let mut manager = ClassifyManager::new();
    let id = manager.start_classification(&base_url, submission);
    let messages = wait_for_terminal(&manager, id, Duration::from_secs(5));

    match messages.last() {
        Some(ClassifyProgress::Completed { result, .. }) => {
            assert_eq!(result.filename.as_deref(), Some("mensagem.txt"));
            assert_eq!(result.file_type.as_deref(), Some(".txt"));
        }
        other => panic!("expected Completed, got {other:?}"),
    }

    let uploads = recorded.lock().expect("recorder lock").uploads.clone();
    assert_eq!(uploads.len(), 1, "exactly one upload should be recorded");
    assert_eq!(uploads[0].sender, "a@b.com");
    assert_eq!(
        uploads[0].subject, "Email importado",
        "blank subjects must be substituted before transmission"
    );
    assert_eq!(uploads[0].file_name, "mensagem.txt");
    assert_eq!(uploads[0].bytes, b"Feliz Natal a todos");
}

// =============================================================================
// Failure paths E2E
// =============================================================================

/// The service's own `detail` wording reaches the failure message verbatim.
#[test]
fn e2e_service_detail_is_shown_verbatim_on_failure() {
    let (base_url, _recorded) = spawn_stub();
    let mut manager = ClassifyManager::new();

    let id =
        manager.start_classification(&base_url, text_submission("a@b.com", "fail-detail", "x"));
    let messages = wait_for_terminal(&manager, id, Duration::from_secs(5));

    match messages.last() {
        Some(ClassifyProgress::Failed { error, .. }) => {
            assert_eq!(error, "Formato de e-mail inválido");
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

/// A non-JSON error body falls back to a message naming the status code.
#[test]
fn e2e_error_without_detail_names_the_status() {
    let (base_url, _recorded) = spawn_stub();
    let mut manager = ClassifyManager::new();

    let id =
        manager.start_classification(&base_url, text_submission("a@b.com", "fail-plain", "x"));
    let messages = wait_for_terminal(&manager, id, Duration::from_secs(5));

    match messages.last() {
        Some(ClassifyProgress::Failed { error, .. }) => {
            assert!(
                error.contains("HTTP 500"),
                "fallback message should name the status, got: {error}"
            );
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

// =============================================================================
// Supersede and cancel E2E
// =============================================================================

/// Starting a new request makes the old one's messages unobservable, so
/// a slow earlier response can never overwrite a newer result.
#[test]
fn e2e_newer_request_supersedes_older() {
    let (base_url, _recorded) = spawn_stub();
    let mut manager = ClassifyManager::new();

    let first = manager.start_classification(&base_url, text_submission("a@b.com", "slow", "x"));
    let second = manager.start_classification(&base_url, text_submission("a@b.com", "Hi", "test"));
    assert!(second > first, "ids must increase");
    assert!(!manager.is_current(first));
    assert!(manager.is_current(second));

    let messages = wait_for_terminal(&manager, second, Duration::from_secs(5));
    for msg in &messages {
        assert_eq!(
            msg.request_id(),
            second,
            "only the newest request's messages may be observable, saw {msg:?}"
        );
    }
    assert!(
        matches!(messages.last(), Some(ClassifyProgress::Completed { .. })),
        "the superseding request should complete normally"
    );
}

/// Cancelling marks the request stale and its late response is
/// discarded; the worker still closes out with a terminal message.
#[test]
fn e2e_cancel_discards_the_response() {
    let (base_url, _recorded) = spawn_stub();
    let mut manager = ClassifyManager::new();

    let id = manager.start_classification(&base_url, text_submission("a@b.com", "slow", "x"));
    thread::sleep(Duration::from_millis(50));
    manager.cancel_current();
    assert!(!manager.is_current(id), "a cancelled request is not current");

    let messages = wait_for_terminal(&manager, id, Duration::from_secs(5));
    assert!(
        matches!(messages.last(), Some(ClassifyProgress::Cancelled { .. })),
        "the worker should close out with Cancelled, got {:?}",
        messages.last()
    );
}

// =============================================================================
// Health probe E2E
// =============================================================================

/// A reachable service yields Online with its reported upload limits.
#[test]
fn e2e_health_probe_reports_service_limits() {
    let (base_url, _recorded) = spawn_stub();
    let mut manager = HealthManager::new();

    manager.start_check(&base_url);
    match wait_for_health(&manager, Duration::from_secs(5)) {
        HealthProgress::Completed { health } => {
            assert_eq!(health.status, "ok");
            assert_eq!(health.supported_extensions, vec!["txt", "pdf"]);
            let limits = health.limits();
            assert_eq!(limits.max_file_size_bytes, 5 * 1024 * 1024);
            assert!(limits.allows_extension("TXT"));
        }
        HealthProgress::Failed { error } => panic!("probe should succeed, got: {error}"),
    }
}

/// An unreachable service yields Failed with a transport message.
#[test]
fn e2e_health_probe_flags_unreachable_service() {
    // Port 9 (discard) refuses connections on loopback.
    let mut manager = HealthManager::new();
    manager.start_check("http://127.0.0.1:9");

    match wait_for_health(&manager, Duration::from_secs(15)) {
        HealthProgress::Failed { error } => {
            assert!(
                error.contains("Cannot reach"),
                "transport failures should say the service is unreachable, got: {error}"
            );
        }
        HealthProgress::Completed { .. } => panic!("probe against a dead port should fail"),
    }
}

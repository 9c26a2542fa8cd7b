// MailTriage - ui/panels/upload.rs
//
// Upload tab: sender, optional subject, and an email file to send to
// the upload endpoint.  This panel writes `state.pending_submit` and
// `state.request_pick_file`; the app shell owns dispatch and the native
// file dialog (no I/O from the ui layer).

use crate::app::state::AppState;
use crate::util::constants::DEFAULT_UPLOAD_SUBJECT;

/// Render the upload form.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Classify an email file");
    ui.add_space(4.0);

    egui::Grid::new("upload_grid")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui| {
            ui.label("From:");
            ui.add(
                egui::TextEdit::singleline(&mut state.upload.sender)
                    .hint_text("sender@example.com")
                    .desired_width(f32::INFINITY),
            );
            ui.end_row();

            ui.label("Subject:");
            // The hint shows what a blank subject will be transmitted as.
            ui.add(
                egui::TextEdit::singleline(&mut state.upload.subject)
                    .hint_text(DEFAULT_UPLOAD_SUBJECT)
                    .desired_width(f32::INFINITY),
            );
            ui.end_row();

            ui.label("File:");
            ui.horizontal(|ui| {
                if ui.button("Choose file…").clicked() {
                    state.request_pick_file = true;
                }
                match &state.upload.file {
                    Some(path) => {
                        let name = path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_else(|| path.display().to_string());
                        ui.label(egui::RichText::new(name).monospace());
                        if ui.small_button("✕").on_hover_text("Remove file").clicked() {
                            state.upload.file = None;
                        }
                    }
                    None => {
                        ui.label(egui::RichText::new("no file selected").weak());
                    }
                }
            });
            ui.end_row();
        });

    let limits = state.upload_limits();
    let accepted = limits
        .supported_extensions
        .iter()
        .map(|e| format!(".{e}"))
        .collect::<Vec<_>>()
        .join(", ");
    ui.add_space(2.0);
    ui.label(
        egui::RichText::new(format!(
            "Accepted: {accepted} · up to {:.1} MB",
            limits.max_file_size_bytes as f64 / (1024.0 * 1024.0)
        ))
        .small()
        .weak(),
    );

    ui.add_space(8.0);

    let ready = state.upload.is_complete();
    let busy = state.classify_in_progress;

    ui.horizontal(|ui| {
        ui.add_enabled_ui(ready, |ui| {
            if ui.button("Classify file").clicked() {
                // Extension and size are checked now, at submit time,
                // against the limits currently in force.
                match state.upload.to_submission(&limits) {
                    Ok(submission) => state.pending_submit = Some(submission),
                    Err(e) => state.error_dialog = Some(e.to_string()),
                }
            }
        });

        if busy {
            ui.label(egui::RichText::new("Classifying…").weak());
        } else if !ready {
            ui.label(
                egui::RichText::new("Sender (with '@') and a file are required.")
                    .small()
                    .weak(),
            );
        }
    });
}

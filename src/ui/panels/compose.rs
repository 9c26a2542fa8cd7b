// MailTriage - ui/panels/compose.rs
//
// Compose tab: sender, subject, and body fields for pasted email text.
// This panel writes `state.pending_submit`; the app shell owns the
// actual dispatch.

use crate::app::state::AppState;

/// Render the compose form.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Classify email text");
    ui.add_space(4.0);

    egui::Grid::new("compose_grid")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui| {
            ui.label("From:");
            ui.add(
                egui::TextEdit::singleline(&mut state.compose.sender)
                    .hint_text("sender@example.com")
                    .desired_width(f32::INFINITY),
            );
            ui.end_row();

            ui.label("Subject:");
            ui.add(
                egui::TextEdit::singleline(&mut state.compose.subject)
                    .hint_text("Subject")
                    .desired_width(f32::INFINITY),
            );
            ui.end_row();
        });

    ui.add_space(4.0);
    ui.label("Body:");
    ui.add(
        egui::TextEdit::multiline(&mut state.compose.body)
            .hint_text("Paste the full email text here")
            .desired_rows(12)
            .desired_width(f32::INFINITY),
    );

    ui.add_space(8.0);

    let ready = state.compose.validate().is_ok();
    let busy = state.classify_in_progress;

    ui.horizontal(|ui| {
        ui.add_enabled_ui(ready, |ui| {
            if ui.button("Classify email").clicked() {
                match state.compose.to_submission() {
                    Ok(submission) => state.pending_submit = Some(submission),
                    // Validation can still fail between frames (the user
                    // edited after the enablement check ran); surface it
                    // the same way as any other submit problem.
                    Err(e) => state.error_dialog = Some(e.to_string()),
                }
            }
        });

        if busy {
            ui.label(egui::RichText::new("Classifying…").weak());
        } else if !ready {
            ui.label(
                egui::RichText::new("Sender (with '@'), subject, and body are required.")
                    .small()
                    .weak(),
            );
        }
    });
}

// MailTriage - ui/panels/result.rs
//
// Classification result view: category badge, confidence, keywords,
// the suggested reply with a copy button, and file metadata for
// uploads.  Renders in the right side panel on wide windows and below
// the form on narrow ones; `state.scroll_to_result` is consumed here.

use crate::app::state::AppState;
use crate::ui::theme;

/// Render the result view.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    // Cloned so the copy button below can mutate state freely.
    let Some(result) = state.result.clone() else {
        ui.centered_and_justified(|ui| {
            ui.label(
                egui::RichText::new("No classification yet. Submit an email to see the result.")
                    .weak(),
            );
        });
        return;
    };

    let heading = ui.heading("Result");
    if state.scroll_to_result {
        // One-shot: set when a result arrives in the narrow layout.
        heading.scroll_to_me(Some(egui::Align::Min));
        state.scroll_to_result = false;
    }
    ui.add_space(6.0);

    let badge_key = result.badge_key();
    egui::Grid::new("result_grid")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui| {
            ui.label("Category:");
            ui.label(
                egui::RichText::new(&result.category)
                    .strong()
                    .color(theme::badge_colour(&badge_key))
                    .background_color(theme::badge_bg_colour(&badge_key)),
            );
            ui.end_row();

            if let Some(confidence) = result.confidence {
                ui.label("Confidence:");
                ui.label(format!("{:.0}%", confidence * 100.0));
                ui.end_row();
            }

            if let Some(ref keywords) = result.keywords {
                if !keywords.is_empty() {
                    ui.label("Keywords:");
                    ui.label(keywords.join(", "));
                    ui.end_row();
                }
            }
        });

    ui.add_space(6.0);
    ui.separator();
    ui.label("Suggested reply:");
    egui::ScrollArea::vertical()
        .id_salt("reply_scroll")
        .max_height(theme::REPLY_SCROLL_HEIGHT)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            ui.label(egui::RichText::new(&result.suggested_reply).monospace());
        });

    ui.add_space(6.0);
    if ui.button("📋 Copy reply").clicked() {
        ui.ctx().copy_text(result.suggested_reply.clone());
        state.status_message = "Suggested reply copied to clipboard.".to_string();
        tracing::debug!(
            reply_len = result.suggested_reply.len(),
            "Suggested reply copied"
        );
    }

    // Upload responses also describe the file the service processed.
    let has_file_info = result.filename.is_some()
        || result.file_type.is_some()
        || result.extracted_text_preview.is_some();
    if has_file_info {
        ui.add_space(6.0);
        ui.separator();
        egui::Grid::new("result_file_grid")
            .num_columns(2)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                if let Some(ref filename) = result.filename {
                    ui.label("File:");
                    ui.label(egui::RichText::new(filename).monospace());
                    ui.end_row();
                }
                if let Some(ref file_type) = result.file_type {
                    ui.label("Type:");
                    ui.label(file_type);
                    ui.end_row();
                }
            });

        if let Some(ref preview) = result.extracted_text_preview {
            ui.add_space(4.0);
            ui.label("Extracted text:");
            egui::ScrollArea::vertical()
                .id_salt("preview_scroll")
                .max_height(120.0)
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(preview).monospace().weak());
                });
        }
    }
}

// MailTriage - ui/panels/alert.rs
//
// Error alert dialog: shown while `state.error_dialog` is Some.
// Rendered as a centred, non-resizable, non-collapsible window the user
// dismisses explicitly; submission failures, validation failures, and
// service errors all land here.

use crate::app::state::AppState;

/// Render the error alert (if `state.error_dialog` is set).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    let Some(message) = state.error_dialog.clone() else {
        return;
    };

    let mut open = true;
    let mut dismissed = false;

    egui::Window::new("⚠ Classification error")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .min_width(320.0)
        .max_width(460.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(6.0);
            ui.label(&message);
            ui.add_space(10.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
            ui.add_space(4.0);
        });

    if dismissed || !open {
        state.error_dialog = None;
    }
}

// MailTriage - ui/panels/about.rs
//
// About dialog: shown from the Help menu.  Also surfaces the full
// service health detail behind the status bar's one-line indicator.
// Rendered as a centred, non-resizable, non-collapsible modal window.

use crate::app::state::AppState;
use crate::core::model::ServiceStatus;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Render the About dialog (if `state.show_about` is true).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_about {
        return;
    }

    let mut open = true;
    egui::Window::new("About MailTriage")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .min_width(360.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(8.0);

            // Large app name
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("✉  MailTriage").size(28.0).strong());
                ui.add_space(4.0);
                ui.label(egui::RichText::new(format!("v{VERSION}")).size(14.0).weak());
            });

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(8.0);

            ui.vertical_centered(|ui| {
                ui.label("A desktop client for an email classification service:");
                ui.label("compose or upload an email, get back a category");
                ui.label("and a ready-to-send suggested reply.");
            });

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(6.0);

            egui::Grid::new("about_service_grid")
                .num_columns(2)
                .spacing([8.0, 4.0])
                .show(ui, |ui| {
                    ui.label("Service:");
                    ui.label(egui::RichText::new(&state.api_base_url).monospace().small());
                    ui.end_row();

                    ui.label("Status:");
                    match &state.service_status {
                        ServiceStatus::Unknown => {
                            ui.label(egui::RichText::new("not checked yet").weak());
                        }
                        ServiceStatus::Checking => {
                            ui.label("checking…");
                        }
                        ServiceStatus::Online(health) => {
                            ui.label(format!(
                                "online (checked {})",
                                health.checked_at.format("%H:%M:%S UTC")
                            ));
                        }
                        ServiceStatus::Unreachable { error, checked_at } => {
                            ui.label(format!(
                                "offline (checked {}): {error}",
                                checked_at.format("%H:%M:%S UTC")
                            ));
                        }
                    }
                    ui.end_row();

                    if let ServiceStatus::Online(health) = &state.service_status {
                        if let Some(ref message) = health.message {
                            ui.label("Message:");
                            ui.label(egui::RichText::new(message).weak());
                            ui.end_row();
                        }

                        let limits = health.limits();
                        ui.label("Uploads:");
                        ui.label(format!(
                            "{} · up to {:.1} MB",
                            limits
                                .supported_extensions
                                .iter()
                                .map(|e| format!(".{e}"))
                                .collect::<Vec<_>>()
                                .join(", "),
                            limits.max_file_size_bytes as f64 / (1024.0 * 1024.0)
                        ));
                        ui.end_row();
                    }
                });

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(6.0);

            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("MIT License").small().weak());
                ui.label(egui::RichText::new("Built with Rust & egui").small().weak());
            });

            ui.add_space(8.0);
        });

    if !open {
        state.show_about = false;
    }
}

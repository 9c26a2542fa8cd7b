// MailTriage - gui.rs
//
// Top-level eframe::App implementation.
// Wires together all UI panels and manages the request lifecycle.

use crate::app::classify::ClassifyManager;
use crate::app::health::HealthManager;
use crate::app::state::AppState;
use crate::core::model::{ServiceStatus, Tab};
use crate::ui;

/// The MailTriage application.
pub struct MailTriageApp {
    pub state: AppState,
    pub classify_manager: ClassifyManager,
    pub health_manager: HealthManager,
}

impl MailTriageApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            classify_manager: ClassifyManager::new(),
            health_manager: HealthManager::new(),
        }
    }

    /// Drain worker progress and consume the request flags set by panels.
    ///
    /// Returns true while a request or probe is outstanding.  Decided
    /// after the flag handlers have run, so the frame that starts work
    /// also schedules the next poll instead of waiting for an input
    /// event to paint one.
    fn process_events(&mut self, wide: bool) -> bool {
        // Poll for classification progress
        let messages = self.classify_manager.poll_progress();
        let had_messages = !messages.is_empty();
        for msg in messages {
            // Messages from a superseded request must not touch state;
            // applying them would clobber the newer request's outcome.
            if !self.classify_manager.is_current(msg.request_id()) {
                tracing::debug!(
                    request_id = msg.request_id(),
                    "Stale progress message dropped"
                );
                continue;
            }
            match msg {
                crate::core::model::ClassifyProgress::Started { .. } => {
                    self.state.classify_in_progress = true;
                }
                crate::core::model::ClassifyProgress::Completed {
                    result, elapsed, ..
                } => {
                    self.state.status_message = format!(
                        "Classified as {} in {:.1}s",
                        result.category,
                        elapsed.as_secs_f64()
                    );
                    self.state.result = Some(result);
                    self.state.classify_in_progress = false;
                    // In the narrow layout the result renders below the
                    // form, possibly off-screen; bring it into view once.
                    self.state.scroll_to_result = !wide;
                }
                crate::core::model::ClassifyProgress::Failed { error, .. } => {
                    self.state.status_message = "Classification failed.".to_string();
                    self.state.error_dialog = Some(error);
                    self.state.classify_in_progress = false;
                }
                crate::core::model::ClassifyProgress::Cancelled { .. } => {
                    self.state.status_message = "Classification cancelled.".to_string();
                    self.state.classify_in_progress = false;
                }
            }
        }

        // Poll for availability probe outcomes
        let health_messages = self.health_manager.poll_progress();
        let had_health = !health_messages.is_empty();
        for msg in health_messages {
            match msg {
                crate::core::model::HealthProgress::Completed { health } => {
                    self.state.service_status = ServiceStatus::Online(health);
                }
                crate::core::model::HealthProgress::Failed { error } => {
                    self.state.service_status = ServiceStatus::Unreachable {
                        error,
                        checked_at: chrono::Utc::now(),
                    };
                }
            }
        }

        // ---- Handle flags set by panels ----
        // pending_submit: a tab produced a validated draft to classify.
        if let Some(submission) = self.state.pending_submit.take() {
            self.state.result = None;
            self.state.scroll_to_result = false;
            self.state.classify_in_progress = true;
            self.state.status_message = format!("Classifying email ({})…", submission.mode());
            self.classify_manager
                .start_classification(&self.state.api_base_url, submission);
        }
        // request_cancel: the user abandoned the in-flight request.
        // The flag flips the UI back immediately; the worker's terminal
        // message arrives later and is dropped as stale.
        if self.state.request_cancel {
            self.state.request_cancel = false;
            self.classify_manager.cancel_current();
            self.state.classify_in_progress = false;
            self.state.status_message = "Classification cancelled.".to_string();
            tracing::info!("Classification cancelled by user");
        }
        // request_pick_file: the upload tab wants the native file picker.
        if self.state.request_pick_file {
            self.state.request_pick_file = false;
            let limits = self.state.upload_limits();
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Email files", &limits.supported_extensions)
                .pick_file()
            {
                tracing::debug!(file = %path.display(), "Email file attached");
                self.state.upload.file = Some(path);
            }
        }
        // request_health_check: startup or the Service menu asked for a probe.
        if self.state.request_health_check {
            self.state.request_health_check = false;
            self.state.service_status = ServiceStatus::Checking;
            self.health_manager.start_check(&self.state.api_base_url);
        }

        had_messages
            || had_health
            || self.state.classify_in_progress
            || matches!(self.state.service_status, ServiceStatus::Checking)
    }
}

impl eframe::App for MailTriageApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Window width decides where the result lives this frame: a side
        // panel when wide, inline under the form when narrow.
        let wide = ctx.screen_rect().width() >= ui::theme::WIDE_LAYOUT_MIN_WIDTH;

        // Keep repainting while a request or probe is outstanding so
        // channel messages are noticed promptly even without input events.
        if self.process_events(wide) {
            ctx.request_repaint_after(std::time::Duration::from_millis(
                crate::util::constants::PROGRESS_POLL_INTERVAL_MS,
            ));
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Attach email file\u{2026}").clicked() {
                        self.state.select_tab(Tab::Upload);
                        self.state.request_pick_file = true;
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("Service", |ui| {
                    if ui.button("Re-check availability").clicked() {
                        self.state.request_health_check = true;
                        ui.close_menu();
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("About MailTriage").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                egui::Frame::new()
                    .fill(ui::theme::STATUS_BG)
                    .inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if self.state.classify_in_progress {
                        ui.spinner();
                    }
                    ui.label(
                        egui::RichText::new(&self.state.status_message)
                            .color(ui::theme::STATUS_TEXT),
                    );
                    // Cancel button visible only while a request is in flight
                    if self.state.classify_in_progress && ui.small_button("Cancel").clicked() {
                        self.state.request_cancel = true;
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let status = &self.state.service_status;
                        let hover = match status {
                            ServiceStatus::Unknown => {
                                "No availability check has completed yet.".to_string()
                            }
                            ServiceStatus::Checking => "Availability check in flight.".to_string(),
                            ServiceStatus::Online(health) => {
                                format!("Last checked {} UTC.", health.checked_at.format("%H:%M:%S"))
                            }
                            ServiceStatus::Unreachable { error, checked_at } => {
                                format!("{} (checked {} UTC)", error, checked_at.format("%H:%M:%S"))
                            }
                        };
                        ui.label(
                            egui::RichText::new(status.short_label())
                                .small()
                                .color(ui::theme::STATUS_TEXT),
                        )
                        .on_hover_text(&hover);
                        ui.label(
                            egui::RichText::new("\u{25cf}")
                                .color(ui::theme::service_status_colour(status)),
                        )
                        .on_hover_text(&hover);
                    });
                });
            });

        // Result side panel -- wide layout only. Must be added before the
        // central panel or egui gives it no room.
        if wide {
            egui::SidePanel::right("result_panel")
                .default_width(ui::theme::RESULT_PANEL_WIDTH)
                .resizable(true)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical()
                        .id_salt("result_panel_scroll")
                        .auto_shrink([false; 2])
                        .show(ui, |ui| {
                            ui::panels::result::render(ui, &mut self.state);
                        });
                });
        }

        // Central panel: tab strip, then the active tab's form.
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                for tab in Tab::all() {
                    let selected = self.state.active_tab == *tab;
                    if ui.selectable_label(selected, tab.label()).clicked() {
                        self.state.select_tab(*tab);
                    }
                }
            });
            ui.separator();

            egui::ScrollArea::vertical()
                .id_salt("main_scroll")
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    match self.state.active_tab {
                        Tab::Compose => ui::panels::compose::render(ui, &mut self.state),
                        Tab::Upload => ui::panels::upload::render(ui, &mut self.state),
                    }
                    // Narrow layout: the result renders under the form,
                    // and only once one exists.
                    if !wide && self.state.result.is_some() {
                        ui.add_space(12.0);
                        ui.separator();
                        ui::panels::result::render(ui, &mut self.state);
                    }
                });
        });

        // Dialogs (modal-ish)
        ui::panels::alert::render(ctx, &mut self.state);
        ui::panels::about::render(ctx, &mut self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{ClassificationRequest, ClassificationResult, Submission};

    // No listener at this address; spawned workers fail on transport and
    // their messages are never polled by these tests.
    fn make_app() -> MailTriageApp {
        MailTriageApp::new(AppState::new("http://127.0.0.1:9".to_string(), None))
    }

    fn make_result() -> ClassificationResult {
        ClassificationResult {
            category: "Produtivo".to_string(),
            confidence: Some(0.9),
            suggested_reply: "Obrigado pelo contato".to_string(),
            keywords: None,
            processed_text: None,
            filename: None,
            file_type: None,
            extracted_text_preview: None,
        }
    }

    #[test]
    fn test_idle_frame_schedules_no_polling() {
        let mut app = make_app();
        app.state.request_health_check = false; // discard the startup check
        assert!(!app.process_events(true));
        assert!(matches!(app.state.service_status, ServiceStatus::Unknown));
        assert!(!app.state.classify_in_progress);
    }

    #[test]
    fn test_health_check_starts_polling_in_the_same_frame() {
        let mut app = make_app();
        // A fresh state carries the startup availability check.
        assert!(app.state.request_health_check);
        assert!(app.process_events(true));
        assert!(!app.state.request_health_check);
        assert!(matches!(app.state.service_status, ServiceStatus::Checking));
    }

    #[test]
    fn test_submission_starts_polling_in_the_same_frame() {
        let mut app = make_app();
        app.state.request_health_check = false;
        app.state.result = Some(make_result());
        app.state.pending_submit = Some(Submission::Text(ClassificationRequest {
            sender: "a@b.com".to_string(),
            subject: "Hi".to_string(),
            body: "test".to_string(),
        }));

        assert!(app.process_events(true));
        assert!(app.state.pending_submit.is_none());
        assert!(app.state.classify_in_progress);
        // The stale result clears the moment a new request starts.
        assert_eq!(app.state.result, None);
        assert!(app.state.status_message.starts_with("Classifying email"));
    }
}

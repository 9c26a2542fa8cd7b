// MailTriage - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading (config.toml)
// 3. Logging initialisation (debug mode support)
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use mailtriage::app;

pub use mailtriage::core;
pub use mailtriage::platform;
pub use mailtriage::ui;
pub use mailtriage::util;

use clap::Parser;
use std::path::PathBuf;

/// MailTriage - Desktop client for the email classification service.
///
/// Sorts an email into productive or unproductive and drafts a suggested
/// reply, from pasted text or an attached email file.
#[derive(Parser, Debug)]
#[command(name = "MailTriage", version, about)]
struct Cli {
    /// Email file to attach on the upload tab at startup.
    file: Option<PathBuf>,

    /// Base URL of the classification service (overrides config.toml).
    #[arg(long = "api-url")]
    api_url: Option<String>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Resolve platform paths and load config before logging so the
    // configured [logging] level can take effect from the first line.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    // Initialise logging subsystem
    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "MailTriage starting"
    );

    // Config problems were collected before logging existed; surface them now.
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Configuration warning");
    }

    // Determine the service URL: CLI override > config.toml > default
    let base_url = platform::config::resolve_base_url(cli.api_url, &config);

    tracing::info!(url = %base_url, "Ready to launch GUI");

    // Create application state. A file passed on the CLI is attached
    // unchecked; validation happens at submit time like any other file.
    let state = app::state::AppState::new(base_url, cli.file);

    // Launch the GUI
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([760.0, 480.0]),
        ..Default::default()
    };

    let dark_mode = config.dark_mode;
    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            let visuals = if dark_mode {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            };
            cc.egui_ctx.set_visuals(visuals);
            Ok(Box::new(gui::MailTriageApp::new(state)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch MailTriage GUI: {e}");
        std::process::exit(1);
    }
}

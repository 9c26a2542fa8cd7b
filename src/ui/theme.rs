// MailTriage - ui/theme.rs
//
// Colour scheme, category badge colours, and layout constants.
// No dependencies on app state or business logic.

use crate::core::model::ServiceStatus;
use egui::Color32;

/// Badge text colour for a badge key (the lowercased category).
/// Unrecognised categories get the neutral accent so a new server-side
/// category still renders reasonably without a client update.
pub fn badge_colour(badge_key: &str) -> Color32 {
    match badge_key {
        "produtivo" => Color32::from_rgb(34, 197, 94),   // Green 500
        "improdutivo" => Color32::from_rgb(217, 119, 6), // Amber 600
        _ => Color32::from_rgb(96, 165, 250),            // Blue 400
    }
}

/// Translucent fill behind the badge text.
pub fn badge_bg_colour(badge_key: &str) -> Color32 {
    match badge_key {
        "produtivo" => Color32::from_rgba_premultiplied(34, 197, 94, 25),
        "improdutivo" => Color32::from_rgba_premultiplied(217, 119, 6, 25),
        _ => Color32::from_rgba_premultiplied(96, 165, 250, 25),
    }
}

/// Dot colour for the service availability indicator.
pub fn service_status_colour(status: &ServiceStatus) -> Color32 {
    match status {
        ServiceStatus::Unknown => Color32::from_rgb(107, 114, 128), // Gray 500
        ServiceStatus::Checking => Color32::from_rgb(217, 119, 6),  // Amber 600
        ServiceStatus::Online(_) => Color32::from_rgb(34, 197, 94), // Green 500
        ServiceStatus::Unreachable { .. } => Color32::from_rgb(220, 38, 38), // Red 600
    }
}

/// Status bar colours.
pub const STATUS_BG: Color32 = Color32::from_rgb(31, 41, 55); // Gray 800
pub const STATUS_TEXT: Color32 = Color32::from_rgb(209, 213, 219); // Gray 300

/// Layout constants.
pub const RESULT_PANEL_WIDTH: f32 = 380.0;
pub const REPLY_SCROLL_HEIGHT: f32 = 220.0;

/// Window width at or above which the result moves to a side panel.
/// Below it the result renders under the form and is scrolled into view.
pub const WIDE_LAYOUT_MIN_WIDTH: f32 = 1200.0;

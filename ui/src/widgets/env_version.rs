use egui::{Color32, Response, Ui};
use quizdesk_business::version_info;

/// Displays the current environment and version/info in the UI.
///
/// Display format varies by environment:
/// - Prod (stable): `stable:{version}`
/// - Staging: `staging:{commit}`
/// - Test: `test:{commit}`
pub fn env_version(ui: &mut Ui) -> Response {
    let display_text = version_info::format_env_version();
    let (env_name, _) = version_info::env_version_info();

    // Color based on environment
    let color = match env_name {
        "stable" => Color32::GREEN,
        "staging" => Color32::from_rgb(255, 165, 0), // Orange
        "test" => Color32::from_rgb(200, 200, 200),  // Light gray
        _ => Color32::WHITE,
    };

    ui.colored_label(color, display_text)
}

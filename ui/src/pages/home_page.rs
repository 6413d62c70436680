//! Homepage shown outside the admin area.
//!
//! Displays the product heading and the entry point into the dashboard.

use egui::{Response, Ui};
use quizdesk_business::Route;

use crate::{state::State, widgets};

/// Renders the homepage.
///
/// The "Admin area" button routes into the dashboard; everything the
/// admin area caches (directory results, tab selection) survives the
/// round trip because routing only swaps which page renders.
pub fn home_page(state: &mut State, ui: &mut Ui) -> Response {
    let mut enter_admin = false;

    let response = ui.vertical(|ui| {
        ui.add_space(24.0);
        ui.heading("Quizdesk");
        ui.label("Quiz administration for your platform.");
        ui.add_space(16.0);

        if ui.button("Admin area").clicked() {
            enter_admin = true;
        }

        ui.add_space(16.0);
        widgets::powered_by_egui_and_eframe(ui);
    });

    if enter_admin {
        state.ctx.update::<Route>(|route| *route = Route::AdminArea);
    }

    response.response
}

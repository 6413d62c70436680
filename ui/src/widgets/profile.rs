//! Profile panel: the signed-in user's fields behind a placeholder avatar.

use egui::{Align2, Color32, FontId, Response, Sense, Ui, Vec2};
use quizdesk_business::ProfileCompute;
use quizdesk_states::StateCtx;

/// Avatar backdrop (indigo).
const AVATAR_BG_COLOR: Color32 = Color32::from_rgb(63, 81, 181);

const AVATAR_RADIUS: f32 = 36.0;

/// Uppercase initials for the avatar, `?` when no name is known.
fn initials(nome: &str, cognome: &str) -> String {
    let initials: String = [nome, cognome]
        .iter()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect();

    if initials.is_empty() {
        "?".to_string()
    } else {
        initials
    }
}

/// Painted placeholder avatar: a filled circle carrying the initials.
fn avatar(ui: &mut Ui, nome: &str, cognome: &str) -> Response {
    let size = Vec2::splat(AVATAR_RADIUS * 2.0);
    let (rect, response) = ui.allocate_exact_size(size, Sense::hover());

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        painter.circle_filled(rect.center(), AVATAR_RADIUS, AVATAR_BG_COLOR);
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            initials(nome, cognome),
            FontId::proportional(24.0),
            Color32::WHITE,
        );
    }

    response
}

/// Displays the signed-in user's profile fields.
///
/// Reads the cached [`ProfileCompute`] view, so every field is already a
/// present string; absent upstream data arrives here as the display
/// defaults rather than as `Option`s.
pub fn profile_panel(state_ctx: &StateCtx, ui: &mut Ui) -> Response {
    let view = state_ctx
        .cached::<ProfileCompute>()
        .map(|compute| compute.view.clone())
        .unwrap_or_default();

    ui.vertical(|ui| {
        ui.add_space(8.0);
        avatar(ui, &view.nome, &view.cognome);
        ui.add_space(12.0);

        egui::Grid::new("profile_fields")
            .num_columns(2)
            .spacing([24.0, 8.0])
            .show(ui, |ui| {
                ui.strong("First name");
                ui.label(&view.nome);
                ui.end_row();

                ui.strong("Last name");
                ui.label(&view.cognome);
                ui.end_row();

                ui.strong("Email");
                ui.label(&view.email);
                ui.end_row();

                ui.strong("Quizzes passed");
                ui.label(&view.quiz_superati);
                ui.end_row();
            });
    })
    .response
}

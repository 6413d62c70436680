//! Platform user directory panel for the Manage Users tab.

use egui::{Color32, Response, ScrollArea, Ui};
use quizdesk_business::{FetchUsersCommand, UserDirectoryCompute, UserListResult};
use quizdesk_states::StateCtx;

/// Admins stand out in the role column (orange).
const ADMIN_LABEL_COLOR: Color32 = Color32::from_rgb(230, 126, 34);

/// Displays the user directory in its current fetch status.
///
/// Renders exactly one of: the loading indicator, the fixed error message,
/// the empty placeholder, or the user table. `Idle` renders as loading
/// because the owning tab dispatches a fetch the moment it activates.
pub fn users_panel(state_ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    let directory = state_ctx
        .cached::<UserDirectoryCompute>()
        .cloned()
        .unwrap_or_default();

    let mut refresh = false;

    let response = ui.vertical(|ui| {
        ui.horizontal(|ui| {
            if ui.button("Refresh").clicked() {
                refresh = true;
            }
            if let Some(fetched_at) = directory.last_fetch {
                ui.weak(format!(
                    "Last updated {}",
                    fetched_at.format("%H:%M:%S UTC")
                ));
            }
        });
        ui.add_space(8.0);

        match &directory.result {
            UserListResult::Idle | UserListResult::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading users...");
                });
            }
            UserListResult::Error(message) => {
                ui.colored_label(Color32::RED, message);
            }
            UserListResult::Loaded(users) if users.is_empty() => {
                ui.label("No users found.");
            }
            UserListResult::Loaded(users) => {
                ScrollArea::vertical().show(ui, |ui| {
                    egui::Grid::new("users_table")
                        .num_columns(3)
                        .striped(true)
                        .spacing([16.0, 6.0])
                        .min_col_width(80.0)
                        .show(ui, |ui| {
                            ui.strong("Name");
                            ui.strong("Email");
                            ui.strong("Role");
                            ui.end_row();

                            for user in users {
                                ui.label(user.full_name());
                                ui.label(&user.email);
                                if user.ruolo {
                                    ui.colored_label(ADMIN_LABEL_COLOR, user.role_label());
                                } else {
                                    ui.label(user.role_label());
                                }
                                ui.end_row();
                            }
                        });
                });
            }
        }
    });

    if refresh {
        state_ctx.dispatch::<FetchUsersCommand>();
    }

    response.response
}

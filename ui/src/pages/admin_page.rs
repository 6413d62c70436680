//! Admin area page: a two-tab view over the signed-in user's profile and
//! the platform user directory.

use egui::{Align, Layout, Response, Ui};
use quizdesk_business::{AdminTab, FetchUsersCommand, Route};

use crate::{state::State, widgets};

/// Renders the admin area.
///
/// The tab bar and the "Return to home" control stay outside the tab
/// content, so they are present no matter which panel is active. Entering
/// the Manage Users tab dispatches one directory fetch; clicking the tab
/// that is already active does nothing.
pub fn admin_page(state: &mut State, ui: &mut Ui) -> Response {
    let active = *state.ctx.state::<AdminTab>();

    // Interactions are collected during rendering and applied afterwards,
    // so the frame never observes a half-switched tab.
    let mut selected_tab: Option<AdminTab> = None;
    let mut go_home = false;

    let response = ui.vertical(|ui| {
        ui.horizontal(|ui| {
            for tab in [AdminTab::Profile, AdminTab::ManageUsers] {
                if ui.selectable_label(active == tab, tab.label()).clicked() {
                    selected_tab = Some(tab);
                }
            }
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.link("Return to home").clicked() {
                    go_home = true;
                }
            });
        });
        ui.separator();

        match active {
            AdminTab::Profile => widgets::profile_panel(&state.ctx, ui),
            AdminTab::ManageUsers => widgets::users_panel(&mut state.ctx, ui),
        };
    });

    if let Some(tab) = selected_tab {
        let activated_users = tab == AdminTab::ManageUsers && active != AdminTab::ManageUsers;
        state.ctx.update::<AdminTab>(|current| *current = tab);
        if activated_users {
            state.ctx.dispatch::<FetchUsersCommand>();
        }
    }
    if go_home {
        state.ctx.update::<Route>(|route| *route = Route::Homepage);
    }

    response.response
}

#[cfg(test)]
mod admin_page_tests {
    use egui_kittest::Harness;
    use kittest::Queryable;
    use quizdesk_business::{SessionState, SessionUser};

    use super::*;

    /// Nothing listens on the discard port, so a dispatched fetch fails
    /// fast instead of reaching out to a real backend.
    fn test_state() -> State {
        State::test("http://127.0.0.1:9".to_string())
    }

    fn admin_harness<'a>(state: State) -> Harness<'a, State> {
        Harness::new_ui_state(
            |ui, state| {
                admin_page(state, ui);
            },
            state,
        )
    }

    #[test]
    fn test_profile_tab_is_the_default() {
        let mut harness = admin_harness(test_state());
        harness.step();

        assert!(
            harness.query_by_label("First name").is_some(),
            "profile fields should render on the default tab"
        );
        assert!(
            harness.query_by_label("Refresh").is_none(),
            "directory toolbar belongs to the other tab"
        );
    }

    #[test]
    fn test_clicking_manage_users_switches_the_tab() {
        let mut harness = admin_harness(test_state());
        harness.step();

        harness.get_by_label("Manage Users").click();
        harness.step();

        assert_eq!(
            *harness.state().ctx.state::<AdminTab>(),
            AdminTab::ManageUsers
        );

        harness.step();
        assert!(
            harness.query_by_label("First name").is_none(),
            "profile content must not leak into the directory tab"
        );
        assert!(harness.query_by_label("Refresh").is_some());
    }

    #[test]
    fn test_switching_back_keeps_profile_values() {
        let mut state = test_state();
        state.ctx.update::<SessionState>(|session| {
            session.user = Some(SessionUser {
                id: 1,
                nome: Some("Mario".to_string()),
                cognome: Some("Rossi".to_string()),
                email: Some("m@example.com".to_string()),
                quiz_superati: Some("5".to_string()),
            });
        });
        // Settle the profile compute before the first render.
        state.ctx.run_computed();
        state.ctx.sync_computes();

        let mut harness = admin_harness(state);
        harness.step();

        harness.get_by_label("Manage Users").click();
        harness.step();
        harness.get_by_label("Profile").click();
        harness.step();
        harness.step();

        assert!(harness.query_by_label("Mario").is_some());
        assert!(harness.query_by_label("Rossi").is_some());
    }

    #[test]
    fn test_return_home_routes_to_the_homepage() {
        let mut harness = admin_harness(test_state());
        harness.step();

        harness.get_by_label("Return to home").click();
        harness.step();

        assert_eq!(*harness.state().ctx.state::<Route>(), Route::Homepage);
    }

    #[test]
    fn test_return_home_is_present_on_both_tabs() {
        let mut harness = admin_harness(test_state());
        harness.step();
        assert!(harness.query_by_label("Return to home").is_some());

        harness.get_by_label("Manage Users").click();
        harness.step();
        harness.step();
        assert!(
            harness.query_by_label("Return to home").is_some(),
            "the return control must stay outside the tab content"
        );
    }
}

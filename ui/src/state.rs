use quizdesk_business::{
    AdminTab, BusinessConfig, FetchUsersCommand, ProfileCompute, Route, SessionState,
    UserDirectoryCompute,
};
use quizdesk_states::{StateCtx, Time};

/// The main application state.
///
/// Owns the [`StateCtx`] with every state, compute, and command the pages
/// read or dispatch. Registration happens once here; pages and widgets only
/// ever look things up.
pub struct State {
    /// The state context for business logic.
    pub ctx: StateCtx,
}

impl Default for State {
    fn default() -> Self {
        Self::with_config(BusinessConfig::default())
    }
}

impl State {
    /// State wired against an arbitrary backend base URL, for tests.
    pub fn test(base_url: String) -> Self {
        Self::with_config(BusinessConfig::new(base_url))
    }

    fn with_config(config: BusinessConfig) -> Self {
        let mut ctx = StateCtx::new();

        ctx.add_state(Time::default());
        ctx.add_state(config);
        ctx.add_state(SessionState::default());
        ctx.add_state(AdminTab::default());
        ctx.add_state(Route::default());

        ctx.record_compute(ProfileCompute::default());
        ctx.record_compute(UserDirectoryCompute::default());

        ctx.record_command(FetchUsersCommand);

        ctx.verify_deps()
            .expect("registered dependency graph must be acyclic");

        Self { ctx }
    }
}

//! Profile presentation data derived from the session.

use std::any::{Any, TypeId};

use quizdesk_states::{
    Compute, ComputeDeps, ComputeStage, Dep, SnapshotClone, Updater, assign_impl,
};

use crate::SessionState;

/// Display-ready profile fields for the signed-in user.
///
/// The identifier plus four always-present strings: absent upstream fields
/// render as an empty string, except the quiz counter where absent or empty
/// falls back to `"0"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileView {
    pub id: i64,
    pub nome: String,
    pub cognome: String,
    pub email: String,
    pub quiz_superati: String,
}

impl ProfileView {
    pub fn from_session(session: &SessionState) -> Self {
        match session.user() {
            Some(user) => Self {
                id: user.id,
                nome: user.nome.clone().unwrap_or_default(),
                cognome: user.cognome.clone().unwrap_or_default(),
                email: user.email.clone().unwrap_or_default(),
                quiz_superati: user
                    .quiz_superati
                    .as_deref()
                    .filter(|count| !count.is_empty())
                    .unwrap_or("0")
                    .to_string(),
            },
            None => Self::default(),
        }
    }
}

/// Compute-shaped cache of the profile view.
///
/// Re-derives whenever the session changes. The view is replaced wholesale,
/// so a sign-out clears every field in the same pass instead of leaving
/// stale values behind.
#[derive(Debug, Clone, Default)]
pub struct ProfileCompute {
    pub view: ProfileView,
}

impl SnapshotClone for ProfileCompute {}

impl Compute for ProfileCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn deps(&self) -> ComputeDeps {
        const STATE_IDS: [TypeId; 1] = [TypeId::of::<SessionState>()];
        (&STATE_IDS, &[])
    }

    fn compute(&self, deps: Dep, updater: Updater) -> ComputeStage {
        let session = deps.get_state_ref::<SessionState>();
        updater.set(Self {
            view: ProfileView::from_session(session),
        });
        ComputeStage::Finished
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

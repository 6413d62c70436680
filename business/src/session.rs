//! Session state fed by the authentication layer.
//!
//! The admin area never authenticates anyone itself: whatever the auth
//! layer reports lands here wholesale, and profile data is derived from it
//! downstream.

use std::any::Any;

use quizdesk_states::{SnapshotClone, State, state_assign_impl};
use serde::{Deserialize, Serialize};

/// The signed-in user as reported by the auth layer.
///
/// Every profile field except `id` may be absent upstream, so they all stay
/// optional here; presentation defaults are applied when deriving the
/// profile view, not at this boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub cognome: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Count of passed quizzes. The backend serves this as a string and it
    /// is only ever displayed, so it stays a string here too.
    #[serde(default)]
    pub quiz_superati: Option<String>,
}

/// Holder for the current session, `None` while nobody is signed in.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub user: Option<SessionUser>,
}

impl SessionState {
    pub fn signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn clear(&mut self) {
        self.user = None;
    }
}

impl SnapshotClone for SessionState {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl State for SessionState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

//! Tab state for the admin area.

use std::any::Any;

use quizdesk_states::{SnapshotClone, State, state_assign_impl};
use serde::{Deserialize, Serialize};

/// The active tab inside the admin area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminTab {
    /// The signed-in user's own record.
    #[default]
    Profile,
    /// The platform-wide user directory.
    ManageUsers,
}

impl AdminTab {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Profile => "Profile",
            Self::ManageUsers => "Manage Users",
        }
    }
}

impl SnapshotClone for AdminTab {}

impl State for AdminTab {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tab_is_profile() {
        assert_eq!(AdminTab::default(), AdminTab::Profile);
    }

    #[test]
    fn test_tab_labels() {
        assert_eq!(AdminTab::Profile.label(), "Profile");
        assert_eq!(AdminTab::ManageUsers.label(), "Manage Users");
    }
}

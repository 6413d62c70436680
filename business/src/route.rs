//! Route state for page navigation.
//!
//! This module defines the route enum that determines which page to display.

use quizdesk_states::{SnapshotClone, State, state_assign_impl};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Represents the current page/route of the application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// Admin dashboard - the landing page for signed-in administrators
    #[default]
    AdminArea,
    /// Public homepage - reached through the return control
    Homepage,
}

impl SnapshotClone for Route {}

impl State for Route {
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

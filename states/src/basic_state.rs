use std::any::Any;

use chrono::{DateTime, Utc};

use crate::{SnapshotClone, State, state::state_assign_impl};

/// Wall-clock instant observed at the top of the current frame.
///
/// The app refreshes this once per update pass, so everything downstream
/// reads one consistent instant instead of sampling the clock mid-frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Time {
    virt: DateTime<Utc>,
}

impl AsMut<DateTime<Utc>> for Time {
    fn as_mut(&mut self) -> &mut DateTime<Utc> {
        &mut self.virt
    }
}

impl AsRef<DateTime<Utc>> for Time {
    fn as_ref(&self) -> &DateTime<Utc> {
        &self.virt
    }
}

impl SnapshotClone for Time {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(*self))
    }
}

impl State for Time {
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

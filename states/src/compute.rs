use std::any::{Any, TypeId, type_name};

use log::error;

use crate::{Dep, SnapshotClone, Updater};

/// Dependency declaration of a compute: `(state type ids, compute type ids)`.
pub type ComputeDeps = (&'static [TypeId], &'static [TypeId]);

/// Outcome of a single [`Compute::compute`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeStage {
    /// The compute started asynchronous work and will publish its value
    /// through the updater later; it stays pending until that value lands.
    Pending,
    /// The value is settled for the current inputs.
    Finished,
}

/// A derived or command-fed cached value.
///
/// Computes re-run when any declared dependency changes (or on first
/// registration) and publish replacement values through the [`Updater`].
/// They must not perform side effects directly: `compute` can run implicitly
/// at any frame, so network or disk work belongs in a [`crate::Command`]
/// that feeds the compute instead.
pub trait Compute: SnapshotClone + Any + Send {
    fn as_any(&self) -> &dyn Any;

    fn deps(&self) -> ComputeDeps;

    fn compute(&self, deps: Dep, updater: Updater) -> ComputeStage;

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Shared `assign_box` body for [`Compute`] impls.
pub fn assign_impl<T: Compute>(this: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *this = *value,
        Err(_) => error!(
            "dropped compute update for {}: payload type mismatch",
            type_name::<T>()
        ),
    }
}

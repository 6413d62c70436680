use std::any::{Any, type_name};

use log::error;

/// Opt-in cloning for command snapshots.
///
/// States and computes that commands read must return `Some` here; everything
/// else can rely on the default and stays out of snapshots entirely.
pub trait SnapshotClone {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        None
    }
}

/// Identity-typed mutable data registered in a [`crate::StateCtx`].
///
/// A state is looked up by its `TypeId`; there is at most one value per type.
/// Mutations go through `StateCtx::update` (synchronous, frame thread) or
/// arrive boxed over the update channel and are applied with [`State::assign_box`].
pub trait State: SnapshotClone + Any + Send {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Shared `assign_box` body for [`State`] impls.
///
/// A mismatched payload is a wiring bug on the sender side; the value is
/// dropped and logged rather than poisoning the registered state.
pub fn state_assign_impl<T: State>(this: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *this = *value,
        Err(_) => error!(
            "dropped state update for {}: payload type mismatch",
            type_name::<T>()
        ),
    }
}

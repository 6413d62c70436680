//! Identity and cancellation handles for spawned command tasks.
//!
//! Every dispatch gets a `TaskId` (the command's `TypeId` plus a generation
//! counter) and a `TaskHandle` wrapping a `CancellationToken`. Spawning a new
//! task for the same type cancels the previous handle and bumps the
//! generation, so late results from superseded tasks can be told apart from
//! current ones.

use std::any::TypeId;

use tokio_util::sync::CancellationToken;

/// Identifier for one spawned task: which type dispatched it, and how many
/// dispatches of that type came before it.
///
/// Two tasks of the same type compare unequal when their generations differ,
/// which is what lets the context drop updates published by a task that has
/// already been superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    type_id: TypeId,
    generation: u64,
}

impl TaskId {
    pub fn new(type_id: TypeId, generation: u64) -> Self {
        Self {
            type_id,
            generation,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Higher generations belong to more recent dispatches.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A spawned task together with its cancellation token.
///
/// Cancellation is cooperative: `cancel` only trips the token, and the task
/// is expected to observe it through `tokio::select!` on `cancelled()` (or by
/// polling `is_cancelled`) and stop publishing.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    cancel_token: CancellationToken,
}

impl TaskHandle {
    pub fn new(id: TaskId, cancel_token: CancellationToken) -> Self {
        Self { id, cancel_token }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Clone of the token, for handing into the async work.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

use std::any::{Any, TypeId};

use flume::Sender;
use log::debug;

use crate::TaskId;

/// A boxed replacement value travelling over the update channel.
///
/// `target` names the registered state or compute the value is assigned to.
/// `guard`, when present, ties the update to the command task that produced
/// it; `StateCtx::sync_computes` drops guarded updates whose generation is no
/// longer the latest for that command type.
pub struct UpdateMsg {
    pub(crate) target: TypeId,
    pub(crate) guard: Option<TaskId>,
    pub(crate) value: Box<dyn Any + Send>,
}

/// Unguarded publisher handed to [`crate::Compute::compute`].
///
/// Updates sent here are applied in arrival order on the next
/// `sync_computes` pass.
#[derive(Clone)]
pub struct Updater {
    send: Sender<UpdateMsg>,
}

impl Updater {
    pub(crate) fn new(send: Sender<UpdateMsg>) -> Self {
        Self { send }
    }

    pub fn set<T: Any + Send>(&self, value: T) {
        let msg = UpdateMsg {
            target: TypeId::of::<T>(),
            guard: None,
            value: Box::new(value),
        };
        if self.send.send(msg).is_err() {
            debug!("update channel closed, dropping compute update");
        }
    }
}

/// Generation-guarded publisher handed to [`crate::Command::run`].
///
/// Every `set` carries the task id of the dispatch that created this updater,
/// so results from a superseded run can never overwrite a newer one.
#[derive(Clone)]
pub struct LatestOnlyUpdater {
    send: Sender<UpdateMsg>,
    task: TaskId,
}

impl LatestOnlyUpdater {
    pub(crate) fn new(send: Sender<UpdateMsg>, task: TaskId) -> Self {
        Self { send, task }
    }

    pub fn set<T: Any + Send>(&self, value: T) {
        let msg = UpdateMsg {
            target: TypeId::of::<T>(),
            guard: Some(self.task),
            value: Box::new(value),
        };
        if self.send.send(msg).is_err() {
            debug!("update channel closed, dropping command update");
        }
    }
}

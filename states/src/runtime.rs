use std::{any::TypeId, collections::BTreeMap, future::Future, sync::OnceLock};

use flume::{Receiver, Sender};
use tokio_util::sync::CancellationToken;

use crate::{
    ComputeDeps, Graph, TaskHandle, TaskId, UpdateMsg, Updater, graph::TopologyError,
};

/// Shared executor for command futures.
///
/// Kept in a static so dropping a `StateCtx` never tears down a runtime,
/// which would panic when the drop happens inside another async context.
fn executor() -> &'static tokio::runtime::Runtime {
    static EXECUTOR: OnceLock<tokio::runtime::Runtime> = OnceLock::new();
    EXECUTOR.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("failed to build the command executor")
    })
}

/// Channel plumbing, dependency graph, and task bookkeeping behind a
/// [`crate::StateCtx`].
///
/// The runtime owns the update channel both ends: computes and commands
/// publish boxed values into it, and the context drains it once per frame.
/// It also tracks one generation counter per command type so stale task
/// output can be recognized and dropped.
#[derive(Debug)]
pub struct StateRuntime {
    send: Sender<UpdateMsg>,
    recv: Receiver<UpdateMsg>,

    graph: Graph<TypeId>,

    tasks: BTreeMap<TypeId, TaskHandle>,
    generations: BTreeMap<TypeId, u64>,
}

impl Default for StateRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl StateRuntime {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();
        Self {
            send,
            recv,
            graph: Graph::new(),
            tasks: BTreeMap::new(),
            generations: BTreeMap::new(),
        }
    }

    pub fn sender(&self) -> Sender<UpdateMsg> {
        self.send.clone()
    }

    pub(crate) fn try_recv(&self) -> Option<UpdateMsg> {
        self.recv.try_recv().ok()
    }

    pub(crate) fn updater(&self) -> Updater {
        Updater::new(self.send.clone())
    }

    /// Register the dependency edges of a compute.
    pub fn record(&mut self, compute: TypeId, deps: ComputeDeps) {
        let (state_ids, compute_ids) = deps;
        for dep in state_ids.iter().chain(compute_ids) {
            self.graph.route_to(*dep, compute, ());
        }
    }

    pub fn verify_deps(&mut self) -> Result<(), TopologyError<TypeId>> {
        self.graph.topology_sort()
    }

    /// Cancel the previous task of this type, if any, and hand out a handle
    /// for the next generation.
    pub(crate) fn begin_task(&mut self, type_id: TypeId) -> TaskHandle {
        if let Some(previous) = self.tasks.remove(&type_id) {
            previous.cancel();
        }

        let generation = self.generations.entry(type_id).or_insert(0);
        *generation += 1;

        let handle = TaskHandle::new(
            TaskId::new(type_id, *generation),
            CancellationToken::new(),
        );
        self.tasks.insert(type_id, handle.clone());
        handle
    }

    /// Whether the given task is still the newest dispatch of its type.
    pub(crate) fn is_latest(&self, task: TaskId) -> bool {
        self.generations
            .get(&task.type_id())
            .is_some_and(|generation| *generation == task.generation())
    }

    pub(crate) fn dependents(&mut self, node: TypeId) -> impl Iterator<Item = &TypeId> {
        self.graph.connected(node)
    }

    pub(crate) fn spawn(&self, fut: impl Future<Output = ()> + Send + 'static) {
        executor().spawn(fut);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SessionLike;
    struct ProfileLike;

    #[test]
    fn test_begin_task_bumps_generation_and_cancels_previous() {
        let mut runtime = StateRuntime::new();
        let first = runtime.begin_task(TypeId::of::<SessionLike>());
        let second = runtime.begin_task(TypeId::of::<SessionLike>());

        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert_eq!(first.id().generation(), 1);
        assert_eq!(second.id().generation(), 2);
    }

    #[test]
    fn test_is_latest_tracks_newest_dispatch() {
        let mut runtime = StateRuntime::new();
        let first = runtime.begin_task(TypeId::of::<SessionLike>());
        assert!(runtime.is_latest(first.id()));

        let second = runtime.begin_task(TypeId::of::<SessionLike>());
        assert!(!runtime.is_latest(first.id()));
        assert!(runtime.is_latest(second.id()));
    }

    #[test]
    fn test_record_connects_dependency_to_compute() {
        let mut runtime = StateRuntime::new();
        const STATE_IDS: [TypeId; 1] = [TypeId::of::<SessionLike>()];
        runtime.record(TypeId::of::<ProfileLike>(), (&STATE_IDS, &[]));

        assert!(runtime.verify_deps().is_ok());
        let dependents: Vec<TypeId> = runtime
            .dependents(TypeId::of::<SessionLike>())
            .copied()
            .collect();
        assert_eq!(dependents, vec![TypeId::of::<ProfileLike>()]);
    }

    #[test]
    fn test_updater_messages_arrive_unguarded() {
        let runtime = StateRuntime::new();
        runtime.updater().set(7_u32);

        let msg = runtime.try_recv().expect("message should be queued");
        assert_eq!(msg.target, TypeId::of::<u32>());
        assert!(msg.guard.is_none());
        assert!(runtime.try_recv().is_none());
    }
}

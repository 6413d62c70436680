use std::{
    any::{TypeId, type_name},
    collections::BTreeMap,
    ptr::NonNull,
};

use log::debug;

use crate::{
    Command, CommandSnapshot, Compute, ComputeSnapshot, ComputeStage, Dep, Error,
    LatestOnlyUpdater, State, StateRuntime, StateSnapshot, StateSyncStatus, UpdateMsg,
    graph::TopologyError,
};

/// Registry of states, computes, and commands, driven once per frame.
///
/// The expected frame order is: [`StateCtx::sync_computes`] to apply values
/// that arrived since the last frame, synchronous state mutations through
/// [`StateCtx::update`], then [`StateCtx::run_computed`] at the end of the
/// frame so dirty computes settle. Commands run outside the frame on the
/// shared executor and feed back through the same channel.
#[derive(Default)]
pub struct StateCtx {
    runtime: StateRuntime,

    states: BTreeMap<TypeId, Box<dyn State>>,
    computes: BTreeMap<TypeId, (Box<dyn Compute>, StateSyncStatus)>,
    commands: BTreeMap<TypeId, Box<dyn Command>>,
}

impl StateCtx {
    pub fn new() -> Self {
        Self {
            runtime: StateRuntime::new(),
            states: BTreeMap::new(),
            computes: BTreeMap::new(),
            commands: BTreeMap::new(),
        }
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        self.states.insert(TypeId::of::<T>(), Box::new(state));
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        self.runtime.record(TypeId::of::<T>(), compute.deps());
        self.computes
            .insert(TypeId::of::<T>(), (Box::new(compute), StateSyncStatus::Init));
    }

    pub fn record_command<T: Command + 'static>(&mut self, command: T) {
        self.commands.insert(TypeId::of::<T>(), Box::new(command));
    }

    /// Checks the recorded dependency edges for cycles and duplicates.
    /// Call once after registration settles.
    pub fn verify_deps(&mut self) -> Result<(), TopologyError<TypeId>> {
        self.runtime.verify_deps()
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.as_any().downcast_ref::<T>())
            .ok_or_else(|| Error::state_not_found(TypeId::of::<T>(), type_name::<T>()))
    }

    /// # Panics
    /// Panics when `T` was never added; register every state up front.
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>().unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn try_state_mut<T: State>(&mut self) -> Result<&mut T, Error> {
        self.states
            .get_mut(&TypeId::of::<T>())
            .and_then(|boxed| boxed.as_any_mut().downcast_mut::<T>())
            .ok_or_else(|| Error::state_not_found(TypeId::of::<T>(), type_name::<T>()))
    }

    /// Direct mutable access, without invalidating dependents. Prefer
    /// [`StateCtx::update`] unless the state has none.
    ///
    /// # Panics
    /// Panics when `T` was never added.
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        self.try_state_mut::<T>()
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// Mutate a state in place and mark everything depending on it dirty,
    /// so the next [`StateCtx::run_computed`] pass refreshes those computes.
    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        f(self.state_mut::<T>());
        self.mark_dependents_dirty(TypeId::of::<T>());
    }

    /// The cached value of a registered compute.
    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|(boxed, _status)| boxed.as_any().downcast_ref::<T>())
    }

    /// Force a compute to re-run on the next [`StateCtx::run_computed`] pass.
    pub fn mark_dirty(&mut self, id: &TypeId) {
        if let Some((_compute, status)) = self.computes.get_mut(id) {
            *status = StateSyncStatus::Dirty;
        }
    }

    /// Withdraw a pending re-run; the compute keeps its cached value.
    pub fn mark_clean(&mut self, id: &TypeId) {
        if let Some((_compute, status)) = self.computes.get_mut(id) {
            *status = StateSyncStatus::Clean;
        }
    }

    /// Dispatch a recorded command.
    ///
    /// Cancels the in-flight run of the same command type if one exists,
    /// snapshots the registered states and computes, and spawns the
    /// command's future on the shared executor. Published results arrive
    /// through the update channel and are applied by a later
    /// [`StateCtx::sync_computes`] pass, unless a newer dispatch supersedes
    /// them first.
    ///
    /// # Panics
    /// Panics when `T` was never recorded.
    pub fn dispatch<T: Command + 'static>(&mut self) {
        let Some(command) = self.commands.get(&TypeId::of::<T>()) else {
            let err = Error::command_not_found(TypeId::of::<T>(), type_name::<T>());
            panic!("{err}");
        };

        let mut states = StateSnapshot::new();
        for (id, state) in &self.states {
            if let Some(cloned) = state.clone_boxed() {
                states.insert_cloned(*id, cloned);
            }
        }
        let mut computes = ComputeSnapshot::new();
        for (id, (compute, _status)) in &self.computes {
            if let Some(cloned) = compute.clone_boxed() {
                computes.insert_cloned(*id, cloned);
            }
        }
        let snap = CommandSnapshot::new(states, computes);

        let handle = self.runtime.begin_task(TypeId::of::<T>());
        let updater = LatestOnlyUpdater::new(self.runtime.sender(), handle.id());
        let fut = command.run(snap, updater, handle.cancellation_token());
        self.runtime.spawn(fut);
    }

    /// Drain the update channel and assign every arrived value to its
    /// target, dropping guarded values whose task has been superseded.
    pub fn sync_computes(&mut self) {
        while let Some(msg) = self.runtime.try_recv() {
            self.apply_update(msg);
        }
    }

    fn apply_update(&mut self, msg: UpdateMsg) {
        let UpdateMsg {
            target,
            guard,
            value,
        } = msg;

        if let Some(task) = guard {
            if !self.runtime.is_latest(task) {
                debug!("discarding update from superseded task {task:?}");
                return;
            }
        }

        if let Some((compute, status)) = self.computes.get_mut(&target) {
            compute.assign_box(value);
            *status = StateSyncStatus::Clean;
        } else if let Some(state) = self.states.get_mut(&target) {
            state.assign_box(value);
        } else {
            debug!("update target {target:?} is not registered, dropping value");
            return;
        }

        self.mark_dependents_dirty(target);
    }

    /// Run every compute whose cached value is out of date.
    ///
    /// Values published during the pass land on the update channel and are
    /// applied by the next [`StateCtx::sync_computes`].
    pub fn run_computed(&mut self) {
        let due: Vec<TypeId> = self
            .computes
            .iter()
            .filter(|(_id, (_compute, status))| {
                matches!(status, StateSyncStatus::Init | StateSyncStatus::Dirty)
            })
            .map(|(id, _)| *id)
            .collect();

        for id in due {
            self.run_compute(id);
        }
    }

    fn run_compute(&mut self, id: TypeId) {
        let Some((compute, _status)) = self.computes.get(&id) else {
            return;
        };
        let (state_ids, compute_ids) = compute.deps();

        // Only the declared dependencies are handed over; everything else
        // stays invisible to the compute.
        let states = state_ids.iter().filter_map(|dep| {
            self.states
                .get(dep)
                .map(|boxed| (*dep, NonNull::from(boxed.as_ref())))
        });
        let computes = compute_ids.iter().filter_map(|dep| {
            self.computes
                .get(dep)
                .map(|(boxed, _status)| (*dep, NonNull::from(boxed.as_ref())))
        });
        let deps = Dep::new(states, computes);

        let stage = compute.compute(deps, self.runtime.updater());
        if let Some((_compute, status)) = self.computes.get_mut(&id) {
            *status = match stage {
                ComputeStage::Pending => StateSyncStatus::Pending,
                ComputeStage::Finished => StateSyncStatus::Clean,
            };
        }
    }

    fn mark_dependents_dirty(&mut self, source: TypeId) {
        let Self {
            runtime, computes, ..
        } = self;
        for dependent in runtime.dependents(source) {
            if let Some((_compute, status)) = computes.get_mut(dependent) {
                if *status != StateSyncStatus::Init {
                    *status = StateSyncStatus::Dirty;
                }
            }
        }
    }
}

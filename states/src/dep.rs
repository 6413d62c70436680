use std::{
    any::{Any, TypeId},
    collections::BTreeMap,
    ptr::NonNull,
};

use crate::{Compute, State};

/// Read access to the dependencies declared by a compute.
///
/// Built fresh for every `compute` run from raw pointers into the registered
/// storage. The pointers are only dereferenced while `StateCtx::run_computed`
/// holds the context, and a compute can never declare itself as a
/// dependency (the graph rejects cycles), so all reads alias only foreign
/// entries.
pub struct Dep {
    inner: BTreeMap<TypeId, NonNull<dyn Any>>,
}

impl Dep {
    pub fn new(
        states: impl Iterator<Item = (TypeId, NonNull<dyn State>)>,
        computes: impl Iterator<Item = (TypeId, NonNull<dyn Compute>)>,
    ) -> Self {
        let mut inner: BTreeMap<TypeId, NonNull<dyn Any>> = BTreeMap::new();
        for (id, ptr) in states {
            inner.insert(id, ptr);
        }
        for (id, ptr) in computes {
            inner.insert(id, ptr);
        }
        Self { inner }
    }

    /// # Panics
    /// Panics when `T` is not among the declared (and registered)
    /// dependencies of the running compute.
    pub fn get_state_ref<T: State>(&self) -> &T {
        self.inner
            .get(&TypeId::of::<T>())
            // SAFETY: the pointer targets a registered box that outlives this
            // `Dep`; `run_computed` takes no mutable access while it exists.
            .and_then(|ptr| unsafe { ptr.as_ref().downcast_ref::<T>() })
            .unwrap()
    }

    /// # Panics
    /// Panics when `T` is not among the declared (and registered)
    /// dependencies of the running compute.
    pub fn get_compute_ref<T: Compute>(&self) -> &T {
        self.inner
            .get(&TypeId::of::<T>())
            // SAFETY: same aliasing argument as `get_state_ref`.
            .and_then(|ptr| unsafe { ptr.as_ref().downcast_ref::<T>() })
            .unwrap()
    }
}

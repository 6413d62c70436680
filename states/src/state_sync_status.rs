/// Lifecycle of a registered compute's cached value.
///
/// `Init` computes have never run; `Dirty` ones have a dependency that
/// changed since their last run. Both are picked up by the next
/// `run_computed` pass. `Pending` means the compute kicked off async work
/// and will publish through the updater, `Clean` that the cached value is
/// current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateSyncStatus {
    #[default]
    Init,
    Pending,
    Dirty,
    Clean,
}

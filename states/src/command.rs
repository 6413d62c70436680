use std::future::Future;
use std::pin::Pin;

use tokio_util::sync::CancellationToken;

use crate::{CommandSnapshot, LatestOnlyUpdater};

/// A manual-only asynchronous side effect.
///
/// Commands never run implicitly: they execute only through
/// `StateCtx::dispatch`, which hands them a snapshot of the registered
/// states/computes, a generation-guarded updater for publishing results, and
/// a cancellation token. Dispatching again cancels the previous in-flight run
/// of the same command type, and any update the superseded run still manages
/// to send is discarded by the generation guard.
pub trait Command: Send {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        cancel: CancellationToken,
    ) -> Pin<Box<dyn Future<Output = ()> + Send>>;
}

//! User directory fetch: compute-shaped cache plus refresh command.
//!
//! - `UserDirectoryCompute` stores the latest status/result for the
//!   "Manage Users" view.
//! - `FetchUsersCommand` performs the network call and feeds the compute
//!   through the guarded updater.
//!
//! UI reads the compute via `ctx.cached::<UserDirectoryCompute>()` and
//! dispatches the command via `ctx.dispatch::<FetchUsersCommand>()` whenever
//! the directory should refresh.

use std::any::Any;
use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, Utc};
use log::{debug, error};
use quizdesk_states::{
    Command, CommandSnapshot, Compute, ComputeDeps, ComputeStage, Dep, LatestOnlyUpdater,
    SnapshotClone, Time, Updater, assign_impl,
};
use tokio_util::sync::CancellationToken;

use crate::{BusinessConfig, api, users::PlatformUser};

/// What the user sees when a directory fetch fails: one fixed sentence.
/// The technical cause goes to the log, never to the screen.
pub const USERS_FETCH_FAILED: &str = "Failed to load the user list.";

/// Status/result of the directory fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UserListResult {
    /// No request has been made yet.
    #[default]
    Idle,

    /// A fetch is currently in-flight.
    Loading,

    /// The last fetch succeeded with these users.
    Loaded(Vec<PlatformUser>),

    /// The last fetch failed; the payload is the fixed display message.
    Error(String),
}

/// Compute-shaped cache for the platform user directory.
#[derive(Debug, Clone, Default)]
pub struct UserDirectoryCompute {
    pub result: UserListResult,
    /// Dispatch instant of the fetch behind the current `Loaded` data.
    pub last_fetch: Option<DateTime<Utc>>,
}

impl UserDirectoryCompute {
    pub fn is_loading(&self) -> bool {
        matches!(self.result, UserListResult::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.result {
            UserListResult::Error(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    pub fn users(&self) -> Option<&[PlatformUser]> {
        match &self.result {
            UserListResult::Loaded(users) => Some(users.as_slice()),
            _ => None,
        }
    }
}

impl SnapshotClone for UserDirectoryCompute {}

impl Compute for UserDirectoryCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn deps(&self) -> ComputeDeps {
        // Cache updated by a command; no derived dependencies.
        (&[], &[])
    }

    fn compute(&self, _deps: Dep, _updater: Updater) -> ComputeStage {
        // Intentionally no-op: computes run implicitly, so network work
        // stays in `FetchUsersCommand` and lands here via the updater.
        ComputeStage::Finished
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

/// Manual-only command that refreshes the user directory.
///
/// A new dispatch cancels the previous in-flight fetch, and the generation
/// guard drops anything a superseded fetch still manages to publish, so the
/// cache only ever reflects the newest request.
#[derive(Debug, Default)]
pub struct FetchUsersCommand;

impl Command for FetchUsersCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        cancel: CancellationToken,
    ) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        let config = snap.state::<BusinessConfig>().clone();
        let dispatched_at = *snap.state::<Time>().as_ref();

        Box::pin(async move {
            let api_base_url = config.api_url();

            // Entering Loading replaces the previous list wholesale, so the
            // UI never shows stale rows while a refresh is in flight.
            updater.set(UserDirectoryCompute {
                result: UserListResult::Loading,
                last_fetch: None,
            });

            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("user directory fetch superseded, stopping without publishing");
                }
                fetched = api::list_users(api_base_url.as_str()) => match fetched {
                    Ok(users) => {
                        updater.set(UserDirectoryCompute {
                            result: UserListResult::Loaded(users),
                            last_fetch: Some(dispatched_at),
                        });
                    }
                    Err(err) => {
                        error!("user directory fetch failed: {err}");
                        updater.set(UserDirectoryCompute {
                            result: UserListResult::Error(USERS_FETCH_FAILED.to_string()),
                            last_fetch: None,
                        });
                    }
                },
            }
        })
    }
}

mod admin_tab;
pub mod api;
mod config;
mod profile;
mod route;
mod session;
mod users;
mod users_fetch;

pub use admin_tab::AdminTab;
pub use api::{ApiError, ApiResult};
pub use config::BusinessConfig;
pub use profile::{ProfileCompute, ProfileView};
pub use route::Route;
pub use session::{SessionState, SessionUser};
pub use users::PlatformUser;
pub use users_fetch::{
    FetchUsersCommand, USERS_FETCH_FAILED, UserDirectoryCompute, UserListResult,
};

pub use quizdesk_utils::version_info;

//! Version information for the application, populated at build time.
//!
//! Environment display format:
//! - Prod (stable): `stable:{version}`
//! - Staging: `staging:{commit}`
//! - Test: `test:{commit}`
//!
//! The environment is selected with the `env_*` compile-time features; a build
//! without any of them is a production build.

/// Get the build date in RFC3339 format
pub fn build_date() -> &'static str {
    env!("BUILD_DATE")
}

/// Get the git commit hash (short)
pub fn build_commit() -> &'static str {
    env!("BUILD_COMMIT")
}

/// Get the package version
pub fn build_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Returns the environment label and version/info string based on build features.
///
/// Format: `(env_name, info_string)`
/// - Staging: ("staging", "commit")
/// - Test: ("test", "commit")
/// - Prod: ("stable", "version")
pub fn env_version_info() -> (&'static str, &'static str) {
    if cfg!(feature = "env_staging") {
        ("staging", build_commit())
    } else if cfg!(feature = "env_test") {
        ("test", build_commit())
    } else {
        // Production (stable)
        ("stable", build_version())
    }
}

/// Format the environment and version info as a display string.
pub fn format_env_version() -> String {
    let (env_name, info) = env_version_info();
    format!("{env_name}:{info}")
}

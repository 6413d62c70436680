//! Shared utilities for the Quizdesk workspace.
//!
//! Currently this only holds the build-time version information that the
//! `business` and `ui` crates surface in the interface.

pub mod version_info;

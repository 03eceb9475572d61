//! Configuration structures for packaging runs.
//!
//! One invocation of the pipeline is described by a [`Settings`] value: the
//! [`BuildTarget`] profile to package plus the directories and build
//! environment the run operates in. Two profiles exist (chat client and
//! chat server); both share the same pipeline shape and differ only in
//! configuration.

mod builder;
mod core;
pub mod profiles;
mod target;

pub use builder::SettingsBuilder;
pub use core::Settings;
pub use target::{BuildTarget, DataDir, UiMode};

/// Conventional build-environment name used when none is given.
pub const DEFAULT_BUILD_ENV: &str = "intranet";

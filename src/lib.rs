//! Packaging pipeline for the intranet chat applications.
//!
//! Turns the interactive chat client and the headless chat server into
//! distributable macOS application bundles: icon resource generation,
//! build-environment provisioning, PyInstaller assembly, manifest metadata
//! injection, and trust finalization (ad-hoc signing, quarantine clearing).
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod fs_util;
pub mod pipeline;
pub mod settings;
pub mod version;

// Re-export commonly used types
pub use error::{Advisory, PackagerError, Result};
pub use pipeline::{Bundle, BuiltBundle, Pipeline};
pub use settings::{BuildTarget, Settings, SettingsBuilder, UiMode};

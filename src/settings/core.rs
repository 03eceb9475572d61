//! Core Settings struct and implementations.

use super::BuildTarget;
use std::path::{Path, PathBuf};

/// Main settings for one packaging run.
///
/// Central configuration for the pipeline, constructed via
/// [`SettingsBuilder`](super::SettingsBuilder). Scratch and output paths are
/// derived from the target name, so independent client and server runs never
/// share mutable filesystem state.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Target profile being packaged.
    target: BuildTarget,

    /// Root of the application checkout the entry script and assets live in.
    project_root: PathBuf,

    /// Scratch directory exclusively owned by this run.
    scratch_dir: PathBuf,

    /// Directory the finished bundle is promoted into.
    output_dir: PathBuf,

    /// Named build environment the bundler and installs execute within.
    build_env: String,
}

impl Settings {
    /// Returns the target profile.
    pub fn target(&self) -> &BuildTarget {
        &self.target
    }

    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.target.name
    }

    /// Returns the project root directory.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Returns the scratch directory for this run.
    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Returns the output directory bundles are promoted into.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the build-environment name.
    pub fn build_env(&self) -> &str {
        &self.build_env
    }

    /// Staging directory for the icon set, reset on every run.
    pub fn iconset_dir(&self) -> PathBuf {
        self.scratch_dir.join(format!("{}.iconset", self.target.name))
    }

    /// Path of the compiled icon resource.
    pub fn icns_path(&self) -> PathBuf {
        self.scratch_dir.join(format!("{}.icns", self.target.name))
    }

    /// Deterministic path of the finished bundle.
    pub fn bundle_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.app", self.target.name))
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        target: BuildTarget,
        project_root: PathBuf,
        scratch_dir: PathBuf,
        output_dir: PathBuf,
        build_env: String,
    ) -> Self {
        Self {
            target,
            project_root,
            scratch_dir,
            output_dir,
            build_env,
        }
    }
}

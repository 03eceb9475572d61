//! Builder for constructing Settings.

use super::{BuildTarget, DEFAULT_BUILD_ENV, Settings};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```no_run
/// use chat_packager::settings::{SettingsBuilder, profiles};
///
/// # fn example() -> chat_packager::Result<()> {
/// let root = std::path::Path::new(".");
/// let settings = SettingsBuilder::new()
///     .target(profiles::client(root))
///     .project_root(root)
///     .output_dir("dist")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    target: Option<BuildTarget>,
    project_root: Option<PathBuf>,
    scratch_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    build_env: Option<String>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the target profile to package.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn target(mut self, target: BuildTarget) -> Self {
        self.target = Some(target);
        self
    }

    /// Sets the project root the entry script and assets are resolved under.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn project_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the scratch directory for this run.
    ///
    /// Default: `build/<target name>` under the project root. The directory
    /// is exclusively owned by the run.
    pub fn scratch_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.scratch_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the output directory the finished bundle is promoted into.
    ///
    /// Default: `dist` under the project root.
    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the named build environment.
    ///
    /// Default: [`DEFAULT_BUILD_ENV`].
    pub fn build_env(mut self, name: impl Into<String>) -> Self {
        self.build_env = Some(name.into());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing:
    /// - `target`
    /// - `project_root`
    pub fn build(self) -> crate::error::Result<Settings> {
        use crate::error::Context;

        let target = self.target.context("target is required")?;
        let project_root = self.project_root.context("project_root is required")?;

        let scratch_dir = self
            .scratch_dir
            .unwrap_or_else(|| project_root.join("build").join(&target.name));
        let output_dir = self.output_dir.unwrap_or_else(|| project_root.join("dist"));
        let build_env = self
            .build_env
            .unwrap_or_else(|| DEFAULT_BUILD_ENV.to_string());

        Ok(Settings::new(
            target,
            project_root,
            scratch_dir,
            output_dir,
            build_env,
        ))
    }
}

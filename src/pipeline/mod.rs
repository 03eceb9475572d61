//! Packaging pipeline orchestration.
//!
//! One run packages one target, driving the stages strictly in sequence:
//!
//! 1. [`icons`] — derive the platform icon resource from the source image
//! 2. [`provision`] — ensure the build environment has the toolchain (advisory)
//! 3. [`assemble`] — invoke the bundler and promote the `.app` into place
//! 4. [`metadata`] — inject version and visibility fields into the manifest
//! 5. [`finalize`] — ad-hoc sign and clear quarantine markers (advisory)
//!
//! Fatal stage errors abort the run with no partial bundle promoted to the
//! output path. Advisory failures are collected on the [`BuiltBundle`] and
//! never affect the success determination.

pub mod assemble;
pub mod finalize;
pub mod icons;
pub mod metadata;
pub mod provision;

use crate::{error::Advisory, error::Result, settings::Settings, version};
use std::path::{Path, PathBuf};

/// An assembled application bundle.
///
/// Owned exclusively by the pipeline until finalization completes; after
/// that the artifact is ready for distribution.
#[derive(Clone, Debug)]
pub struct Bundle {
    root: PathBuf,
}

impl Bundle {
    /// Wrap an existing bundle root.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Root directory of the bundle (`<name>.app`).
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the bundle manifest.
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join("Contents").join("Info.plist")
    }
}

/// Result of a completed pipeline run.
#[derive(Debug)]
pub struct BuiltBundle {
    /// Finished bundle at its deterministic output path.
    pub bundle: Bundle,
    /// Resolved version stamped into the manifest.
    pub version: String,
    /// Warnings from best-effort stages, ignored for success/failure.
    pub advisories: Vec<Advisory>,
}

/// Sequential pipeline for one build target.
#[derive(Debug)]
pub struct Pipeline {
    settings: Settings,
}

impl Pipeline {
    /// Creates a pipeline for the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Returns a reference to the pipeline settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run all stages for this target.
    pub async fn run(&self) -> Result<BuiltBundle> {
        let target = self.settings.target();
        log::info!("Packaging target {}", target.name);

        let icns = icons::generate(
            &target.icon_source,
            &self.settings.iconset_dir(),
            &self.settings.icns_path(),
        )
        .await?;

        let mut advisories =
            provision::ensure(&target.required_packages, self.settings.build_env()).await;

        let bundle = assemble::assemble(&self.settings, &icns).await?;

        let resolved_version = match &target.version_source {
            Some(source) => version::extract_from_script(source).await,
            None => version::DEFAULT_VERSION.to_string(),
        };

        advisories.extend(metadata::inject(&bundle, &resolved_version, target.ui_mode));
        advisories.extend(finalize::finalize(&bundle).await);

        for advisory in &advisories {
            log::warn!("advisory: {advisory}");
        }

        log::info!(
            "✓ Packaged {} ({}) at {}",
            target.name,
            resolved_version,
            bundle.root().display()
        );

        Ok(BuiltBundle {
            bundle,
            version: resolved_version,
            advisories,
        })
    }
}

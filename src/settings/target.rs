//! Build-target description: one packaged application.

use std::path::PathBuf;

/// UI-visibility mode of the produced bundle.
///
/// Controls console attachment at assembly time and, for
/// [`UiMode::BackgroundAgent`], the manifest flag that keeps the
/// application out of the Dock and the application switcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiMode {
    /// Ordinary foreground application with a window and a Dock entry.
    Windowed,
    /// Double-clickable bundle that runs without any Dock presence.
    BackgroundAgent,
}

/// A bundled data directory and its in-bundle destination.
#[derive(Clone, Debug)]
pub struct DataDir {
    /// Source directory on the build machine.
    pub source: PathBuf,
    /// Relative destination inside the bundle's resource tree.
    pub dest: String,
}

impl DataDir {
    /// Create a data-directory mapping.
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
        }
    }
}

/// One pipeline instantiation: everything target-specific the five stages
/// need. Constructed once per invocation and immutable for the duration of
/// a build.
#[derive(Clone, Debug)]
pub struct BuildTarget {
    /// Product name, used for artifact naming (`<name>.app`).
    pub name: String,

    /// Entry script handed to the bundler.
    pub entry_script: PathBuf,

    /// Source raster image the platform icon resource is derived from.
    pub icon_source: PathBuf,

    /// Data directories copied into the bundle.
    pub data_dirs: Vec<DataDir>,

    /// UI-visibility mode.
    pub ui_mode: UiMode,

    /// Reverse-DNS bundle identifier, when one should be stamped.
    pub bundle_identifier: Option<String>,

    /// Modules the bundler's static import analysis cannot discover and
    /// must force-include, or the produced binary crashes at first use.
    pub hidden_imports: Vec<String>,

    /// Script whose text is scanned for the version declaration.
    ///
    /// Both profiles point at the client entry script; the version is
    /// shared across the application suite.
    pub version_source: Option<PathBuf>,

    /// Python packages the build environment must provide.
    pub required_packages: Vec<String>,
}

//! Error types for packaging operations.
//!
//! Fatal errors abort a pipeline run before any partial bundle is promoted
//! to the output path. Best-effort stages never construct errors at all;
//! they report [`Advisory`] records instead, which the pipeline surfaces as
//! warnings and ignores for the overall success determination.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for packaging operations
pub type Result<T> = std::result::Result<T, PackagerError>;

/// Main error type for all packaging operations
#[derive(Error, Debug)]
pub enum PackagerError {
    /// A required input file is absent. Raised before any mutation.
    #[error("missing asset: {path}")]
    MissingAsset {
        /// Path that was expected to exist
        path: PathBuf,
    },

    /// The icon staging set is missing required entries, so the icon
    /// compiler must not run over it.
    #[error("incomplete icon set in {staging}: missing {missing:?}")]
    IncompleteIconSet {
        /// Staging directory that was inspected
        staging: PathBuf,
        /// File names absent from the staging directory
        missing: Vec<String>,
    },

    /// The bundler invocation failed; no bundle is considered produced.
    #[error("bundle assembly failed: {reason}")]
    Assembly {
        /// Reason for the failure
        reason: String,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decode/encode errors during icon rasterization
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Info.plist read/write errors
    #[error("plist error: {0}")]
    Plist(#[from] plist::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),

    /// Generic errors with a formatted message
    #[error("{0}")]
    Generic(String),
}

/// Return early with a [`PackagerError::Generic`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::error::PackagerError::Generic(format!($($arg)*)))
    };
}

/// Extension trait adding context to `Option` and foreign `Result` values.
pub trait Context<T> {
    /// Attach a static context message, converting to [`PackagerError`].
    fn context(self, msg: &str) -> Result<T>;

    /// Attach a lazily-built context message, converting to [`PackagerError`].
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| PackagerError::Generic(msg.to_string()))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.ok_or_else(|| PackagerError::Generic(f()))
    }
}

impl<T, E: std::fmt::Display> Context<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| PackagerError::Generic(format!("{msg}: {e}")))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| PackagerError::Generic(format!("{}: {e}", f())))
    }
}

/// Extension trait for IO results that records the action and the path.
pub trait ErrorExt<T> {
    /// Convert an IO error into a [`PackagerError`] naming the filesystem
    /// action and the path it touched.
    fn fs_context(self, action: &str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, action: &str, path: &Path) -> Result<T> {
        self.map_err(|e| PackagerError::Generic(format!("{action} ({}): {e}", path.display())))
    }
}

/// A non-fatal stage failure.
///
/// Provisioning, metadata injection on a missing manifest, signing, and
/// quarantine clearing return these instead of errors. The pipeline prints
/// them on the build output and proceeds.
#[derive(Debug, Clone)]
pub struct Advisory {
    /// Pipeline stage that produced the warning
    pub stage: &'static str,
    /// Human-readable description of what was skipped or failed
    pub message: String,
}

impl Advisory {
    /// Create a new advisory for the given stage.
    pub fn new(stage: &'static str, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.stage, self.message)
    }
}

//! Post-assembly manifest injection.
//!
//! PyInstaller does not expose every Info.plist field as an input, so the
//! pipeline rewrites the manifest after assembly: the resolved version
//! string goes into both the display version and the build version (kept
//! identical, there is no separate build-number concept), and
//! background-agent targets get the Dock-suppression flag. All writes are
//! dictionary upserts, so injection is idempotent.

use super::Bundle;
use crate::{
    error::{Advisory, Result},
    settings::UiMode,
};

const STAGE: &str = "metadata";

/// Manifest key for the user-facing version.
pub const KEY_SHORT_VERSION: &str = "CFBundleShortVersionString";
/// Manifest key for the build version, kept identical to the short version.
pub const KEY_BUILD_VERSION: &str = "CFBundleVersion";
/// Manifest flag that keeps an app out of the Dock and the app switcher.
pub const KEY_BACKGROUND_AGENT: &str = "LSUIElement";

/// Inject version and visibility metadata into a bundle's manifest.
///
/// A missing manifest is reported as an [`Advisory`], not an error: the
/// bundle may still be usable without version metadata, and an
/// otherwise-valid artifact must not be destroyed over a cosmetic field.
pub fn inject(bundle: &Bundle, version: &str, ui_mode: UiMode) -> Vec<Advisory> {
    let manifest = bundle.manifest_path();
    if !manifest.is_file() {
        let advisory = Advisory::new(
            STAGE,
            format!("manifest not found at {}, skipping injection", manifest.display()),
        );
        log::warn!("{advisory}");
        return vec![advisory];
    }

    match rewrite(bundle, version, ui_mode) {
        Ok(()) => {
            log::info!("✓ Injected version {version} into {}", manifest.display());
            Vec::new()
        }
        Err(e) => {
            let advisory = Advisory::new(
                STAGE,
                format!("could not rewrite {}: {e}", manifest.display()),
            );
            log::warn!("{advisory}");
            vec![advisory]
        }
    }
}

fn rewrite(bundle: &Bundle, version: &str, ui_mode: UiMode) -> Result<()> {
    let manifest = bundle.manifest_path();
    let mut value = plist::Value::from_file(&manifest)?;

    let dict = value.as_dictionary_mut().ok_or_else(|| {
        crate::error::PackagerError::Generic("manifest root is not a dictionary".to_string())
    })?;

    // Dictionary insert overwrites existing keys: the idempotent upsert.
    dict.insert(
        KEY_SHORT_VERSION.to_string(),
        plist::Value::String(version.to_string()),
    );
    dict.insert(
        KEY_BUILD_VERSION.to_string(),
        plist::Value::String(version.to_string()),
    );

    if ui_mode == UiMode::BackgroundAgent {
        dict.insert(KEY_BACKGROUND_AGENT.to_string(), plist::Value::Boolean(true));
    }

    value.to_file_xml(&manifest)?;
    Ok(())
}

//! Bundle trust finalization: ad-hoc signing and quarantine clearing.
//!
//! Ad-hoc signing (`codesign --sign -`) is enough for the local gatekeeper
//! to accept the bundle without a network check, and the recursive
//! quarantine strip matters because a bundle produced by a toolchain that
//! was itself downloaded can inherit the marker. Both steps are
//! best-effort: an unsigned or quarantined bundle is still a usable
//! artifact on permissive systems, so this stage never fails the build.

use super::Bundle;
use crate::error::Advisory;
use std::sync::LazyLock;

const STAGE: &str = "finalize";

/// Extended attribute macOS stamps on files fetched over the network.
pub const QUARANTINE_ATTR: &str = "com.apple.quarantine";

static HAS_CODESIGN: LazyLock<bool> = LazyLock::new(|| tool_present("codesign"));
static HAS_XATTR: LazyLock<bool> = LazyLock::new(|| tool_present("xattr"));

fn tool_present(name: &str) -> bool {
    match which::which(name) {
        Ok(path) => {
            log::debug!("Found {name} at: {}", path.display());
            true
        }
        Err(e) => {
            log::debug!("{name} not found in PATH: {e}");
            false
        }
    }
}

/// Sign the bundle and strip its quarantine markers, best-effort.
///
/// Never returns an error; every skipped or failed step becomes an
/// [`Advisory`].
pub async fn finalize(bundle: &Bundle) -> Vec<Advisory> {
    let mut advisories = Vec::new();

    if *HAS_CODESIGN {
        if let Err(message) = sign_ad_hoc(bundle).await {
            log::warn!("{message}");
            advisories.push(Advisory::new(STAGE, message));
        } else {
            log::info!("✓ Ad-hoc signed {}", bundle.root().display());
        }
    } else {
        let advisory = Advisory::new(STAGE, "codesign not available, bundle left unsigned");
        log::warn!("{advisory}");
        advisories.push(advisory);
    }

    if *HAS_XATTR {
        if let Err(message) = clear_quarantine(bundle).await {
            log::warn!("{message}");
            advisories.push(Advisory::new(STAGE, message));
        } else {
            log::info!("✓ Cleared quarantine markers on {}", bundle.root().display());
        }
    } else {
        let advisory = Advisory::new(STAGE, "xattr not available, quarantine markers left in place");
        log::warn!("{advisory}");
        advisories.push(advisory);
    }

    advisories
}

async fn sign_ad_hoc(bundle: &Bundle) -> std::result::Result<(), String> {
    // "-" is the ad-hoc identity marker: self-signed, no external identity.
    let output = tokio::process::Command::new("codesign")
        .args(["--force", "--deep", "--sign", "-"])
        .arg(bundle.root())
        .output()
        .await
        .map_err(|e| format!("failed to execute codesign: {e}"))?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(format!(
            "codesign exited with {:?}: {}",
            output.status.code(),
            stderr.trim()
        ))
    }
}

async fn clear_quarantine(bundle: &Bundle) -> std::result::Result<(), String> {
    let output = tokio::process::Command::new("xattr")
        .args(["-rd", QUARANTINE_ATTR])
        .arg(bundle.root())
        .output()
        .await
        .map_err(|e| format!("failed to execute xattr: {e}"))?;

    // xattr exits nonzero when no file carried the attribute; either way
    // the tree ends up clean, so only report the stderr for visibility.
    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.trim().is_empty() {
            Ok(())
        } else {
            Err(format!("xattr reported: {}", stderr.trim()))
        }
    }
}

//! Platform icon resource generation.
//!
//! Derives a complete `.iconset` from one source raster and compiles it into
//! a single `.icns` resource with `iconutil`. The staging directory is
//! deleted and recreated on every run so a stale raster from a previous
//! source can never leak into the new icon, and the staged set is verified
//! complete before compilation because `iconutil` silently produces a broken
//! resource from a partial set.

use crate::{
    bail,
    error::{ErrorExt, PackagerError, Result},
};
use std::path::{Path, PathBuf};

/// Base pixel sizes required by the icon compiler.
pub const BASE_SIZES: [u32; 6] = [16, 32, 64, 128, 256, 512];

/// Scale factors rendered for every base size.
pub const SCALES: [u32; 2] = [1, 2];

/// File names of a complete staged icon set, in iconset naming convention.
///
/// 6 sizes x 2 scales = 12 entries, e.g. `icon_32x32.png` and
/// `icon_32x32@2x.png`.
pub fn required_entries() -> Vec<String> {
    let mut names = Vec::with_capacity(BASE_SIZES.len() * SCALES.len());
    for size in BASE_SIZES {
        for scale in SCALES {
            names.push(entry_name(size, scale));
        }
    }
    names
}

fn entry_name(size: u32, scale: u32) -> String {
    if scale == 1 {
        format!("icon_{size}x{size}.png")
    } else {
        format!("icon_{size}x{size}@{scale}x.png")
    }
}

/// Generate the compiled icon resource for one target.
///
/// # Process
///
/// 1. Verify the source image exists (fails before any write otherwise)
/// 2. Reset the staging directory
/// 3. Rasterize all 12 (size, scale) entries
/// 4. Verify staging completeness
/// 5. Compile the staging directory with `iconutil`
///
/// # Returns
///
/// Path of the compiled `.icns` file.
pub async fn generate(source: &Path, staging_dir: &Path, output_icns: &Path) -> Result<PathBuf> {
    if !source.is_file() {
        return Err(PackagerError::MissingAsset {
            path: source.to_path_buf(),
        });
    }

    log::info!("Generating icon set from {}", source.display());

    stage_iconset(source, staging_dir).await?;
    verify_complete(staging_dir)?;
    compile_icns(staging_dir, output_icns).await?;

    log::info!("✓ Compiled icon resource: {}", output_icns.display());
    Ok(output_icns.to_path_buf())
}

/// Rasterize the full icon set into a fresh staging directory.
///
/// Any individual resize failure is fatal; a partially staged set must not
/// reach the compiler.
pub async fn stage_iconset(source: &Path, staging_dir: &Path) -> Result<()> {
    // No incremental reuse: the staging directory always reflects the
    // current source image.
    match tokio::fs::remove_dir_all(staging_dir).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    tokio::fs::create_dir_all(staging_dir)
        .await
        .fs_context("creating icon staging directory", staging_dir)?;

    let source = source.to_path_buf();
    let staging = staging_dir.to_path_buf();

    // Decoding and resizing are CPU-bound; keep them off the runtime threads.
    tokio::task::spawn_blocking(move || -> Result<()> {
        let base = image::open(&source)?;

        for size in BASE_SIZES {
            for scale in SCALES {
                let pixels = size * scale;
                let out = staging.join(entry_name(size, scale));
                base.resize_exact(pixels, pixels, image::imageops::FilterType::Lanczos3)
                    .save(&out)?;
                log::debug!("staged {}", out.display());
            }
        }
        Ok(())
    })
    .await
    .map_err(|e| PackagerError::Generic(format!("icon staging task panicked: {e}")))?
}

/// Verify every required (size, scale) entry exists in the staging directory.
pub fn verify_complete(staging_dir: &Path) -> Result<()> {
    let missing: Vec<String> = required_entries()
        .into_iter()
        .filter(|name| !staging_dir.join(name).is_file())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PackagerError::IncompleteIconSet {
            staging: staging_dir.to_path_buf(),
            missing,
        })
    }
}

/// Compile a complete staging directory into one `.icns` resource.
pub async fn compile_icns(staging_dir: &Path, output_icns: &Path) -> Result<()> {
    let output = tokio::process::Command::new("iconutil")
        .arg("-c")
        .arg("icns")
        .arg(staging_dir)
        .arg("-o")
        .arg(output_icns)
        .output()
        .await
        .map_err(|e| PackagerError::Generic(format!("failed to execute iconutil: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("iconutil failed: {}", stderr.trim());
    }

    let len = tokio::fs::metadata(output_icns)
        .await
        .fs_context("reading compiled icon metadata", output_icns)?
        .len();
    if len == 0 {
        bail!(
            "iconutil produced an empty resource at {}",
            output_icns.display()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_entries_cover_six_sizes_at_two_scales() {
        let entries = required_entries();
        assert_eq!(entries.len(), 12);
        assert!(entries.contains(&"icon_16x16.png".to_string()));
        assert!(entries.contains(&"icon_512x512@2x.png".to_string()));
    }

    #[test]
    fn verify_reports_every_missing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let err = verify_complete(dir.path()).unwrap_err();
        match err {
            PackagerError::IncompleteIconSet { missing, .. } => {
                assert_eq!(missing.len(), 12);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

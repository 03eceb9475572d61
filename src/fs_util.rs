//! File system helpers for bundle staging and promotion.

use crate::error::{PackagerError, Result};
use std::io;
use std::path::Path;
use tokio::fs;

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e.into()),
    }
}

/// Recursively copies a directory from one path to another, creating any
/// parent directories of the destination path as necessary.
///
/// Preserves symlinks, which application bundles rely on for framework
/// layouts.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.is_dir() {
        return Err(PackagerError::Generic(format!(
            "{from:?} is not a directory"
        )));
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();

    // Offload blocking traversal to the dedicated thread pool.
    tokio::task::spawn_blocking(move || -> Result<()> {
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent)?;
        }

        for entry in walkdir::WalkDir::new(&from) {
            let entry = entry.map_err(|e| {
                PackagerError::Generic(format!("walking {}: {e}", from.display()))
            })?;
            let rel_path = entry
                .path()
                .strip_prefix(&from)
                .map_err(|e| PackagerError::Generic(format!("resolving copy path: {e}")))?;
            let dest_path = to.join(rel_path);

            if entry.file_type().is_symlink() {
                let target = std::fs::read_link(entry.path())?;
                #[cfg(unix)]
                std::os::unix::fs::symlink(&target, &dest_path)?;
                #[cfg(not(unix))]
                {
                    let _ = target;
                    return Err(PackagerError::Generic(
                        "symlinks in bundle trees are only supported on unix".to_string(),
                    ));
                }
            } else if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dest_path)?;
            } else {
                std::fs::copy(entry.path(), &dest_path)?;
            }
        }

        Ok(())
    })
    .await
    .map_err(|e| PackagerError::Generic(format!("directory copy task panicked: {e}")))?
}

/// Moves a directory into place, falling back to copy-then-delete when the
/// rename crosses filesystems.
pub async fn promote_dir(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).await?;
    }

    match fs::rename(from, to).await {
        Ok(()) => Ok(()),
        Err(_) => {
            copy_dir(from, to).await?;
            remove_dir_all(from).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn copy_dir_preserves_nested_files() {
        let src = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(src.path().join("Contents/MacOS")).unwrap();
        std::fs::write(src.path().join("Contents/Info.plist"), b"<plist/>").unwrap();

        let dst = tempfile::tempdir().unwrap();
        let target = dst.path().join("App.app");
        copy_dir(src.path(), &target).await.unwrap();

        assert!(target.join("Contents/MacOS").is_dir());
        assert!(target.join("Contents/Info.plist").is_file());
    }

    #[tokio::test]
    async fn remove_dir_all_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let ghost = dir.path().join("never-created");
        remove_dir_all(&ghost).await.unwrap();
        remove_dir_all(&ghost).await.unwrap();
    }
}

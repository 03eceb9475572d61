//! Bundle assembly via PyInstaller.
//!
//! One bundler invocation per target. Assembly happens in a temporary dist
//! directory; the produced `.app` is renamed into its deterministic output
//! path only on full success, so a half-assembled bundle can never be
//! mistaken for a release artifact.

use super::Bundle;
use crate::{
    error::{ErrorExt, PackagerError, Result},
    fs_util,
    settings::{Settings, UiMode},
};
use std::path::Path;

/// Build the PyInstaller argument list for a target.
///
/// Kept separate from the invocation so the mapping from target
/// configuration to bundler options is directly testable.
pub fn bundler_args(settings: &Settings, icns: &Path, staging: &Path) -> Vec<String> {
    let target = settings.target();
    let mut args = vec!["--noconfirm".to_string()];

    // Neither profile attaches a console; the server is hidden from the
    // Dock at manifest level, not by reattaching a terminal.
    match target.ui_mode {
        UiMode::Windowed | UiMode::BackgroundAgent => args.push("--windowed".to_string()),
    }

    args.push("--name".to_string());
    args.push(target.name.clone());

    args.push("--icon".to_string());
    args.push(icns.display().to_string());

    if let Some(identifier) = &target.bundle_identifier {
        args.push("--osx-bundle-identifier".to_string());
        args.push(identifier.clone());
    }

    for data_dir in &target.data_dirs {
        args.push("--add-data".to_string());
        args.push(format!("{}:{}", data_dir.source.display(), data_dir.dest));
    }

    for module in &target.hidden_imports {
        args.push("--hidden-import".to_string());
        args.push(module.clone());
    }

    args.push("--distpath".to_string());
    args.push(staging.join("dist").display().to_string());
    args.push("--workpath".to_string());
    args.push(staging.join("build").display().to_string());
    args.push("--specpath".to_string());
    args.push(staging.display().to_string());

    args.push(target.entry_script.display().to_string());
    args
}

/// Assemble the application bundle for a target.
///
/// # Process
///
/// 1. Verify the entry script exists
/// 2. Run PyInstaller with dist/work/spec paths under a tempdir
/// 3. Verify the produced `.app` exists
/// 4. Replace any previous artifact and promote the bundle into
///    `<output dir>/<name>.app`
///
/// # Errors
///
/// Any bundler failure is fatal; no partial bundle is considered valid.
pub async fn assemble(settings: &Settings, icns: &Path) -> Result<Bundle> {
    let target = settings.target();

    if !target.entry_script.is_file() {
        return Err(PackagerError::MissingAsset {
            path: target.entry_script.clone(),
        });
    }

    tokio::fs::create_dir_all(settings.scratch_dir())
        .await
        .fs_context("creating scratch directory", settings.scratch_dir())?;

    let staging = tempfile::tempdir_in(settings.scratch_dir())
        .map_err(|e| PackagerError::Generic(format!("creating assembly staging: {e}")))?;

    let args = bundler_args(settings, icns, staging.path());
    log::info!("Assembling bundle for {}", settings.product_name());
    log::debug!("pyinstaller args: {args:?}");

    let output = super::provision::env_command(settings.build_env(), "pyinstaller")
        .args(&args)
        .output()
        .await
        .map_err(|e| PackagerError::Assembly {
            reason: format!("failed to execute pyinstaller: {e}"),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PackagerError::Assembly {
            reason: format!(
                "pyinstaller exited with {:?}: {}",
                output.status.code(),
                stderr.trim()
            ),
        });
    }

    let produced = staging
        .path()
        .join("dist")
        .join(format!("{}.app", target.name));
    if !produced.is_dir() {
        return Err(PackagerError::Assembly {
            reason: format!("pyinstaller reported success but {produced:?} is missing"),
        });
    }

    // Promote into place only now that the bundle is fully assembled.
    let bundle_path = settings.bundle_path();
    fs_util::remove_dir_all(&bundle_path).await?;
    fs_util::promote_dir(&produced, &bundle_path).await?;

    log::info!("✓ Assembled bundle: {}", bundle_path.display());
    Ok(Bundle::new(bundle_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{SettingsBuilder, profiles};

    fn settings_for(root: &Path, server: bool) -> Settings {
        let target = if server {
            profiles::server(root)
        } else {
            profiles::client(root)
        };
        SettingsBuilder::new()
            .target(target)
            .project_root(root)
            .build()
            .unwrap()
    }

    #[test]
    fn client_args_carry_windowed_mode_and_hidden_imports() {
        let root = Path::new("/work/chat");
        let settings = settings_for(root, false);
        let args = bundler_args(
            &settings,
            Path::new("/scratch/IntranetChat.icns"),
            Path::new("/scratch/stage"),
        );

        assert!(args.contains(&"--windowed".to_string()));
        assert!(args.contains(&"--osx-bundle-identifier".to_string()));
        assert!(args.contains(&"com.intranet.chat.client".to_string()));
        assert!(args.contains(&"shiboken6".to_string()));
        assert_eq!(args.last().unwrap(), "/work/chat/qt_chat_client.py");
    }

    #[test]
    fn data_dirs_map_to_explicit_in_bundle_paths() {
        let root = Path::new("/work/chat");
        let settings = settings_for(root, true);
        let args = bundler_args(
            &settings,
            Path::new("/scratch/s.icns"),
            Path::new("/scratch/stage"),
        );

        assert!(args.contains(&"/work/chat/assets/icons:assets/icons".to_string()));
        // Server bundles icons only, never themes.
        assert!(!args.iter().any(|a| a.contains("assets/themes")));
    }

    #[tokio::test]
    async fn missing_entry_script_fails_before_invocation() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_for(dir.path(), true);
        let err = assemble(&settings, Path::new("/nonexistent.icns"))
            .await
            .unwrap_err();
        assert!(matches!(err, PackagerError::MissingAsset { .. }));
    }
}

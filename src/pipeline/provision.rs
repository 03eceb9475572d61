//! Build-environment provisioning.
//!
//! Ensures the toolchain and runtime bindings the bundler needs are present
//! in the named build environment. The whole stage is advisory: pre-baked
//! environments must not fail a build because a redundant install cannot
//! reach a package index, and downstream stages still fail loudly when a
//! capability is actually missing.

use crate::error::Advisory;
use std::sync::LazyLock;

const STAGE: &str = "provision";

/// Check if conda is available for environment-scoped execution.
///
/// Cached result to avoid repeated subprocess calls during a run.
pub static HAS_CONDA: LazyLock<bool> = LazyLock::new(|| match which::which("conda") {
    Ok(path) => {
        log::debug!("Found conda at: {}", path.display());
        true
    }
    Err(e) => {
        log::debug!("conda not found in PATH: {e}. Using the ambient Python instead.");
        false
    }
});

/// Build a command that runs inside the named environment.
///
/// With conda on the PATH the command is wrapped in `conda run -n <env>`;
/// otherwise the ambient interpreter is used directly.
pub fn env_command(build_env: &str, program: &str) -> tokio::process::Command {
    if *HAS_CONDA {
        let mut cmd = tokio::process::Command::new("conda");
        cmd.args(["run", "-n", build_env, program]);
        cmd
    } else {
        tokio::process::Command::new(program)
    }
}

/// Ensure the required Python packages are present, best-effort.
///
/// Probes each package with `pip show` and attempts `pip install` for the
/// absent ones. Every failure is reported as an [`Advisory`]; this stage
/// never returns an error.
pub async fn ensure(packages: &[String], build_env: &str) -> Vec<Advisory> {
    let mut advisories = Vec::new();

    for package in packages {
        match probe(package, build_env).await {
            Ok(true) => {
                log::debug!("package {package} already present");
                continue;
            }
            Ok(false) => {}
            Err(message) => {
                advisories.push(Advisory::new(STAGE, message));
                continue;
            }
        }

        log::info!("Installing {package} into build environment {build_env}...");
        if let Err(message) = install(package, build_env).await {
            log::warn!("{message}");
            advisories.push(Advisory::new(STAGE, message));
        } else {
            log::info!("✓ Installed {package}");
        }
    }

    advisories
}

async fn probe(package: &str, build_env: &str) -> std::result::Result<bool, String> {
    let output = env_command(build_env, "python3")
        .args(["-m", "pip", "show", package])
        .output()
        .await
        .map_err(|e| format!("could not probe for {package}: {e}"))?;

    Ok(output.status.success())
}

async fn install(package: &str, build_env: &str) -> std::result::Result<(), String> {
    let output = env_command(build_env, "python3")
        .args(["-m", "pip", "install", package])
        .output()
        .await
        .map_err(|e| format!("could not run pip install for {package}: {e}"))?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(format!(
            "install of {package} failed (exit {:?}): {}",
            output.status.code(),
            stderr.trim()
        ))
    }
}

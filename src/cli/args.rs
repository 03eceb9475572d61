//! Command line argument parsing and validation.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Which target profiles a single invocation packages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TargetKind {
    /// Interactive Qt chat client (windowed).
    Client,
    /// Headless chat server (background agent).
    Server,
    /// Both, client first.
    All,
}

/// Application bundle packager for the intranet chat suite
#[derive(Parser, Debug)]
#[command(
    name = "chat-packager",
    version,
    about = "Packages the intranet chat client and server as macOS app bundles",
    long_about = "Packages the intranet chat applications into distributable .app bundles.

Per target the pipeline generates the icon resource, provisions the build
environment, runs PyInstaller, injects manifest metadata, ad-hoc signs the
bundle, and clears quarantine markers.

Usage:
  chat-packager --target client
  chat-packager --target all --project-root ../chat --output-dir dist
  chat-packager --target server --build-env ci-python

Exit code 0 = every requested bundle exists at its output path. Advisory
failures (provisioning, signing, quarantine clearing, missing manifest) are
printed as warnings and never affect the exit code."
)]
pub struct Args {
    /// Target to package
    #[arg(short, long, value_enum, default_value = "all")]
    pub target: TargetKind,

    /// Root of the chat application checkout
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub project_root: PathBuf,

    /// Directory finished bundles are promoted into
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Named build environment the bundler and installs run within
    #[arg(long, value_name = "NAME", env = "CHAT_BUILD_ENV")]
    pub build_env: Option<String>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if !self.project_root.is_dir() {
            return Err(format!(
                "Project root is not a directory: {}",
                self.project_root.display()
            ));
        }

        if let Some(env) = &self.build_env
            && env.trim().is_empty()
        {
            return Err("Build environment name cannot be empty".to_string());
        }

        Ok(())
    }
}

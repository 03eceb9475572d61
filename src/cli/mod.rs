//! Command line interface for the chat packager.

mod args;

pub use args::{Args, TargetKind};

use crate::{
    error::{PackagerError, Result},
    pipeline::Pipeline,
    settings::{BuildTarget, SettingsBuilder, profiles},
};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();

    if let Err(reason) = args.validate() {
        return Err(PackagerError::Generic(format!("invalid arguments: {reason}")));
    }

    let targets: Vec<BuildTarget> = match args.target {
        TargetKind::Client => vec![profiles::client(&args.project_root)],
        TargetKind::Server => vec![profiles::server(&args.project_root)],
        TargetKind::All => vec![
            profiles::client(&args.project_root),
            profiles::server(&args.project_root),
        ],
    };

    let mut warned = false;
    for target in targets {
        let mut builder = SettingsBuilder::new()
            .target(target)
            .project_root(&args.project_root);

        if let Some(out) = &args.output_dir {
            builder = builder.output_dir(out);
        }
        if let Some(env) = &args.build_env {
            builder = builder.build_env(env.clone());
        }

        let pipeline = Pipeline::new(builder.build()?);
        let name = pipeline.settings().product_name().to_string();
        let built = pipeline.run().await?;

        println!(
            "Packaged {} ({}) -> {}",
            name,
            built.version,
            built.bundle.root().display()
        );
        for advisory in &built.advisories {
            eprintln!("warning: {advisory}");
            warned = true;
        }
    }

    // Advisories never affect the exit code.
    if warned {
        log::debug!("run completed with advisories");
    }
    Ok(0)
}

//! `update-baseline` replaces the dry reference image, keeping the previous one as `.bak`.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wetness_detector::{
    acquisition::read_image_bytes,
    baseline::update_baseline,
    config::{CameraConfig, baseline_path_from_env},
};

/// Capture a new baseline from the camera, or install one from a file.
#[derive(Parser, Debug)]
#[command(name = "update-baseline")]
#[command(version, about, long_about = None)]
struct Args {
    /// Install this image instead of fetching a frame from the camera.
    #[arg(long, value_name = "PATH")]
    from: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(err) = run(&args) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<()> {
    dotenvy::dotenv().ok();
    let baseline_path = baseline_path_from_env();

    let bytes = match &args.from {
        Some(path) => read_image_bytes(path)?,
        None => CameraConfig::from_env()
            .context("set them in the environment or pass --from")?
            .fetch_snapshot()
            .context("failed to download baseline image")?,
    };

    update_baseline(&baseline_path, &bytes)?;

    Ok(())
}

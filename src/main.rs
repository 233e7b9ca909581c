//! `detect-wetness` compares the current camera frame against the dry baseline.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wetness_detector::{
    WetnessDetector,
    acquisition::SnapshotSource,
    config::{CameraConfig, RunConfig},
};

/// Detect water on the floor by diffing a camera snapshot against a baseline image.
///
/// Camera access is configured through CAMERA_IP, CAMERA_USER and CAMERA_PASS,
/// read from the environment or a `.env` file.
/// THRESHOLD_VALUE, WETNESS_THRESHOLD, BASELINE_PATH and DIFF_PATH override the defaults.
#[derive(Parser, Debug)]
#[command(name = "detect-wetness")]
#[command(version, about, long_about = None)]
struct Args {
    /// Read the snapshot from this file instead of the camera.
    #[arg(long, value_name = "PATH")]
    snapshot: Option<PathBuf>,
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
    let config = RunConfig::from_env().context("invalid detection settings")?;

    let source = match &args.snapshot {
        Some(path) => SnapshotSource::LocalFile(path.clone()),
        None => SnapshotSource::RemoteCamera(
            CameraConfig::from_env().context("set them in the environment or pass --snapshot")?,
        ),
    };

    let detector = WetnessDetector::from_run_config(&config)?;
    let check = detector
        .check(&source)
        .with_context(|| format!("comparing {} against {}", source, config.baseline_path.display()))?;

    println!("{}", check.result.report);

    check.result.save(&config.diff_path)?;

    Ok(())
}

use std::path::{Path, PathBuf};

use image::GrayImage;
use log::{info, warn};

use crate::{
    acquisition::{SnapshotSource, acquire_baseline, acquire_snapshot},
    analysis::{change::ChangeDetector, lights::LightsCheck},
    config::{DetectionConfig, RunConfig},
    error::Result,
};

pub mod acquisition;
pub mod analysis;
pub mod baseline;
pub mod config;
pub mod error;
pub mod image_utils;
pub mod report;

pub use report::WetnessReport;

#[derive(Debug, Clone)]
pub struct ChangeResult {
    pub report: WetnessReport,
    pub difference_map: GrayImage,
}

impl ChangeResult {
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        report::save_difference_map(&self.difference_map, path)
    }
}

/// Outcome of one baseline-versus-snapshot comparison.
#[derive(Debug, Clone)]
pub struct WetnessCheck {
    pub result: ChangeResult,
    pub snapshot_lit: bool,
}

pub struct WetnessDetector {
    baseline_path: PathBuf,
    detector: ChangeDetector,
    lights: LightsCheck,
}

impl WetnessDetector {
    pub fn new<P: AsRef<Path>>(baseline_path: P, config: DetectionConfig) -> Result<Self> {
        Ok(Self {
            baseline_path: baseline_path.as_ref().to_path_buf(),
            detector: ChangeDetector::from_config(&config)?,
            lights: LightsCheck::default(),
        })
    }

    pub fn from_run_config(config: &RunConfig) -> Result<Self> {
        Self::new(&config.baseline_path, config.detection)
    }

    pub fn with_lights_check(mut self, lights: LightsCheck) -> Self {
        self.lights = lights;
        self
    }

    pub fn check(&self, source: &SnapshotSource) -> Result<WetnessCheck> {
        let baseline = acquire_baseline(&self.baseline_path)?;
        let snapshot = acquire_snapshot(source)?;
        self.compare(&baseline, &snapshot)
    }

    pub fn compare(&self, baseline: &GrayImage, snapshot: &GrayImage) -> Result<WetnessCheck> {
        let result = self.detector.detect(baseline, snapshot)?;

        let snapshot_lit = self.lights.is_lit(snapshot);
        if !snapshot_lit {
            warn!("Snapshot looks dark; lights may be off and the comparison unreliable");
        }

        info!(
            "{:.2}% of pixels changed ({} of {}), wet: {}",
            result.report.changed_percentage,
            result.report.changed_pixel_count,
            result.report.total_pixel_count,
            result.report.is_wet
        );

        Ok(WetnessCheck {
            result,
            snapshot_lit,
        })
    }
}

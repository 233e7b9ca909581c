use std::{path::PathBuf, str::FromStr};

use crate::{
    acquisition::{CameraEndpoint, Credentials},
    error::{Result, WetnessError},
};

pub const CAMERA_IP: &str = "CAMERA_IP";
pub const CAMERA_USER: &str = "CAMERA_USER";
pub const CAMERA_PASS: &str = "CAMERA_PASS";
pub const THRESHOLD_VALUE: &str = "THRESHOLD_VALUE";
pub const WETNESS_THRESHOLD: &str = "WETNESS_THRESHOLD";
pub const BASELINE_PATH: &str = "BASELINE_PATH";
pub const DIFF_PATH: &str = "DIFF_PATH";

pub const DEFAULT_BASELINE_PATH: &str = "baseline.jpg";
pub const DEFAULT_DIFF_PATH: &str = "diff.jpg";

/// Thresholds handed to the change detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionConfig {
    /// Per-pixel intensity delta a pixel must exceed to count as changed.
    pub pixel_diff_threshold: u8,
    /// Changed-pixel percentage at or above which the scene is wet.
    pub wetness_percentage_threshold: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            pixel_diff_threshold: 30,
            wetness_percentage_threshold: 2.5,
        }
    }
}

impl DetectionConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            pixel_diff_threshold: parse_or(&lookup, THRESHOLD_VALUE, defaults.pixel_diff_threshold)?,
            wetness_percentage_threshold: parse_or(
                &lookup,
                WETNESS_THRESHOLD,
                defaults.wetness_percentage_threshold,
            )?,
        })
    }
}

/// Everything a single detection run needs apart from the snapshot source.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub baseline_path: PathBuf,
    pub diff_path: PathBuf,
    pub detection: DetectionConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            baseline_path: PathBuf::from(DEFAULT_BASELINE_PATH),
            diff_path: PathBuf::from(DEFAULT_DIFF_PATH),
            detection: DetectionConfig::default(),
        }
    }
}

impl RunConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let detection = DetectionConfig::from_lookup(&lookup)?;

        Ok(Self {
            baseline_path: baseline_path_from_lookup(&lookup),
            diff_path: non_empty(&lookup, DIFF_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DIFF_PATH)),
            detection,
        })
    }
}

pub fn baseline_path_from_env() -> PathBuf {
    baseline_path_from_lookup(|key| std::env::var(key).ok())
}

/// Resolves only the baseline location, leaving detection settings unparsed.
pub fn baseline_path_from_lookup<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(&lookup, BASELINE_PATH)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_BASELINE_PATH))
}

pub struct CameraConfig;

impl CameraConfig {
    pub fn from_env() -> Result<CameraEndpoint> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the camera address and credentials, reporting every missing key at once.
    pub fn from_lookup<F>(lookup: F) -> Result<CameraEndpoint>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = non_empty(&lookup, CAMERA_IP);
        let user = non_empty(&lookup, CAMERA_USER);
        let password = non_empty(&lookup, CAMERA_PASS);

        match (host, user, password) {
            (Some(host), Some(user), Some(password)) => Ok(CameraEndpoint::new(
                host,
                Credentials::new(user, password),
            )),
            (host, user, password) => {
                let missing = [(CAMERA_IP, host), (CAMERA_USER, user), (CAMERA_PASS, password)]
                    .into_iter()
                    .filter(|(_, value)| value.is_none())
                    .map(|(key, _)| key)
                    .collect();
                Err(WetnessError::ConfigurationMissing(missing))
            }
        }
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty(lookup, key) {
        Some(raw) => raw.parse::<T>().map_err(|e| {
            WetnessError::InvalidParameter(format!("{} = {:?}: {}", key, raw, e))
        }),
        None => Ok(default),
    }
}

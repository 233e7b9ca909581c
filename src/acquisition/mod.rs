pub mod camera;

use std::{
    fmt,
    fs,
    path::{Path, PathBuf},
};

use image::GrayImage;
use log::debug;

pub use camera::{CameraEndpoint, Credentials};

use crate::{
    error::{Result, WetnessError},
    image_utils::to_grayscale,
};

/// Where the current frame comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotSource {
    LocalFile(PathBuf),
    RemoteCamera(CameraEndpoint),
}

impl fmt::Display for SnapshotSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotSource::LocalFile(path) => write!(f, "file {}", path.display()),
            SnapshotSource::RemoteCamera(endpoint) => write!(f, "camera {}", endpoint.host()),
        }
    }
}

pub fn acquire_baseline<P: AsRef<Path>>(path: P) -> Result<GrayImage> {
    load_gray(path.as_ref())
}

pub fn acquire_snapshot(source: &SnapshotSource) -> Result<GrayImage> {
    match source {
        SnapshotSource::LocalFile(path) => load_gray(path),
        SnapshotSource::RemoteCamera(endpoint) => {
            let bytes = endpoint.fetch_snapshot()?;
            decode_gray(&bytes, &source.to_string())
        }
    }
}

/// Reads raw bytes from a file that must exist and be non-empty.
pub fn read_image_bytes(path: &Path) -> Result<Vec<u8>> {
    let description = format!("file {}", path.display());

    let metadata = fs::metadata(path).map_err(|e| {
        WetnessError::acquisition(&description, format!("{} not found ({})", path.display(), e))
    })?;
    if metadata.len() == 0 {
        return Err(WetnessError::acquisition(
            &description,
            format!("{} is empty", path.display()),
        ));
    }

    fs::read(path).map_err(|e| WetnessError::acquisition(&description, e))
}

pub fn decode_gray(bytes: &[u8], description: &str) -> Result<GrayImage> {
    let image =
        image::load_from_memory(bytes).map_err(|e| WetnessError::acquisition(description, e))?;
    let gray = to_grayscale(&image);
    debug!("Decoded {} as {}x{} grayscale", description, gray.width(), gray.height());
    Ok(gray)
}

fn load_gray(path: &Path) -> Result<GrayImage> {
    let bytes = read_image_bytes(path)?;
    decode_gray(&bytes, &format!("file {}", path.display()))
}

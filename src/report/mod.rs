use std::{fmt, path::Path};

use image::GrayImage;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WetnessError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WetnessReport {
    pub changed_pixel_count: u64,
    pub total_pixel_count: u64,
    pub changed_percentage: f64,
    pub is_wet: bool,
}

impl WetnessReport {
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn verdict(&self) -> &'static str {
        if self.is_wet {
            "Wetness detected!"
        } else {
            "No wetness detected."
        }
    }
}

impl fmt::Display for WetnessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Changed pixels: {:.2}%", self.changed_percentage)?;
        write!(f, "{}", self.verdict())
    }
}

/// Writes the binary difference map, overwriting whatever is at `path`.
/// The encoding follows the file extension.
pub fn save_difference_map<P: AsRef<Path>>(map: &GrayImage, path: P) -> Result<()> {
    let path = path.as_ref();
    map.save(path).map_err(|cause| WetnessError::ArtifactWrite {
        path: path.display().to_string(),
        cause,
    })?;
    info!("Difference map written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn report(is_wet: bool) -> WetnessReport {
        WetnessReport {
            changed_pixel_count: 1,
            total_pixel_count: 3,
            changed_percentage: 100.0 / 3.0,
            is_wet,
        }
    }

    #[test]
    fn test_display_formats_percentage_and_verdict() {
        assert_eq!(
            report(true).to_string(),
            "Changed pixels: 33.33%\nWetness detected!"
        );
        assert_eq!(
            report(false).to_string(),
            "Changed pixels: 33.33%\nNo wetness detected."
        );
    }

    #[test]
    fn test_json_round_trip() {
        let json = report(true).to_json().unwrap();
        assert!(json.contains("\"changed_pixel_count\": 1"));
        let parsed: WetnessReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report(true));
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diff.png");
        std::fs::write(&path, b"stale").unwrap();

        let map = GrayImage::from_fn(4, 2, |x, _| if x == 0 { Luma([255]) } else { Luma([0]) });
        save_difference_map(&map, &path).unwrap();

        let reloaded = image::open(&path).unwrap().to_luma8();
        assert_eq!(reloaded, map);
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("diff.png");
        let err = save_difference_map(&GrayImage::new(1, 1), &path).unwrap_err();
        assert!(matches!(err, WetnessError::ArtifactWrite { .. }));
    }
}

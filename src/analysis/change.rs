use image::GrayImage;
use imageproc::contrast::{ThresholdType, threshold};
use log::debug;

use crate::{
    ChangeResult, WetnessReport,
    config::DetectionConfig,
    error::{Result, WetnessError},
    image_utils::{absolute_difference, count_nonzero},
};

/// Compares a snapshot against the dry baseline and decides whether the scene is wet.
///
/// A pixel counts as changed when its absolute intensity delta is strictly greater
/// than `pixel_diff_threshold`. The scene is wet when the changed share of the frame,
/// in percent, reaches `wetness_percentage_threshold`.
#[derive(Debug, Clone, Copy)]
pub struct ChangeDetector {
    pixel_diff_threshold: u8,
    wetness_percentage_threshold: f64,
}

impl ChangeDetector {
    pub fn new(pixel_diff_threshold: u8, wetness_percentage_threshold: f64) -> Result<Self> {
        if !wetness_percentage_threshold.is_finite()
            || !(0.0..=100.0).contains(&wetness_percentage_threshold)
        {
            return Err(WetnessError::InvalidParameter(format!(
                "wetness percentage threshold must be within 0-100, got {}",
                wetness_percentage_threshold
            )));
        }

        Ok(Self {
            pixel_diff_threshold,
            wetness_percentage_threshold,
        })
    }

    pub fn from_config(config: &DetectionConfig) -> Result<Self> {
        Self::new(config.pixel_diff_threshold, config.wetness_percentage_threshold)
    }

    pub fn pixel_diff_threshold(&self) -> u8 {
        self.pixel_diff_threshold
    }

    pub fn wetness_percentage_threshold(&self) -> f64 {
        self.wetness_percentage_threshold
    }

    pub fn detect(&self, baseline: &GrayImage, snapshot: &GrayImage) -> Result<ChangeResult> {
        if baseline.dimensions() != snapshot.dimensions() {
            return Err(WetnessError::DimensionMismatch {
                baseline: baseline.dimensions(),
                snapshot: snapshot.dimensions(),
            });
        }

        let (width, height) = baseline.dimensions();
        debug!(
            "Comparing {}x{} frames (pixel threshold {}, wetness threshold {}%)",
            width, height, self.pixel_diff_threshold, self.wetness_percentage_threshold
        );

        let delta = absolute_difference(baseline, snapshot);
        let difference_map = threshold(&delta, self.pixel_diff_threshold, ThresholdType::Binary);

        let changed_pixel_count = count_nonzero(&difference_map);
        let total_pixel_count = width as u64 * height as u64;
        let changed_percentage = if total_pixel_count == 0 {
            0.0
        } else {
            100.0 * changed_pixel_count as f64 / total_pixel_count as f64
        };

        let report = WetnessReport {
            changed_pixel_count,
            total_pixel_count,
            changed_percentage,
            is_wet: changed_percentage >= self.wetness_percentage_threshold,
        };

        Ok(ChangeResult {
            report,
            difference_map,
        })
    }
}

impl Default for ChangeDetector {
    fn default() -> Self {
        let config = DetectionConfig::default();
        Self {
            pixel_diff_threshold: config.pixel_diff_threshold,
            wetness_percentage_threshold: config.wetness_percentage_threshold,
        }
    }
}

pub fn detect(
    baseline: &GrayImage,
    snapshot: &GrayImage,
    pixel_diff_threshold: u8,
    wetness_percentage_threshold: f64,
) -> Result<ChangeResult> {
    ChangeDetector::new(pixel_diff_threshold, wetness_percentage_threshold)?.detect(baseline, snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(width: u32, height: u32, pixels: Vec<u8>) -> GrayImage {
        GrayImage::from_raw(width, height, pixels).unwrap()
    }

    #[test]
    fn test_single_wet_pixel_in_two_by_two() {
        let a = gray(2, 2, vec![10, 10, 10, 10]);
        let b = gray(2, 2, vec![10, 10, 200, 10]);

        let result = detect(&a, &b, 30, 25.0).unwrap();
        assert_eq!(result.report.changed_pixel_count, 1);
        assert_eq!(result.report.total_pixel_count, 4);
        assert_eq!(result.report.changed_percentage, 25.0);
        assert!(result.report.is_wet);
        assert_eq!(result.difference_map.as_raw(), &vec![0, 0, 255, 0]);

        let result = detect(&a, &b, 30, 30.0).unwrap();
        assert_eq!(result.report.changed_percentage, 25.0);
        assert!(!result.report.is_wet);
    }

    #[test]
    fn test_delta_equal_to_threshold_is_unchanged() {
        let a = gray(2, 1, vec![100, 100]);
        let b = gray(2, 1, vec![130, 131]);

        let result = detect(&a, &b, 30, 100.0).unwrap();
        assert_eq!(result.report.changed_pixel_count, 1);
        assert_eq!(result.difference_map.as_raw(), &vec![0, 255]);
    }

    #[test]
    fn test_identical_zero_images_are_dry() {
        let a = gray(4, 4, vec![0; 16]);

        for pixel_threshold in [0u8, 1, 30, 255] {
            let result = detect(&a, &a, pixel_threshold, 2.5).unwrap();
            assert_eq!(result.report.changed_percentage, 0.0);
            assert!(!result.report.is_wet);
        }
    }

    #[test]
    fn test_zero_wetness_threshold_is_always_wet() {
        let a = gray(4, 4, vec![0; 16]);
        let result = detect(&a, &a, 0, 0.0).unwrap();
        assert!(result.report.is_wet);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = GrayImage::new(100, 100);
        let b = GrayImage::new(100, 101);

        match detect(&a, &b, 30, 2.5) {
            Err(WetnessError::DimensionMismatch { baseline, snapshot }) => {
                assert_eq!(baseline, (100, 100));
                assert_eq!(snapshot, (100, 101));
            }
            other => panic!("expected dimension mismatch, got {:?}", other.map(|r| r.report)),
        }
    }

    #[test]
    fn test_empty_frame_reports_zero_percent() {
        let a = GrayImage::new(0, 0);
        let result = detect(&a, &a, 30, 2.5).unwrap();
        assert_eq!(result.report.total_pixel_count, 0);
        assert_eq!(result.report.changed_percentage, 0.0);
    }

    #[test]
    fn test_rejects_out_of_range_wetness_threshold() {
        assert!(matches!(
            ChangeDetector::new(30, 100.5),
            Err(WetnessError::InvalidParameter(_))
        ));
        assert!(matches!(
            ChangeDetector::new(30, -1.0),
            Err(WetnessError::InvalidParameter(_))
        ));
        assert!(matches!(
            ChangeDetector::new(30, f64::NAN),
            Err(WetnessError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_default_matches_detection_config() {
        let detector = ChangeDetector::default();
        assert_eq!(detector.pixel_diff_threshold(), 30);
        assert_eq!(detector.wetness_percentage_threshold(), 2.5);
    }
}

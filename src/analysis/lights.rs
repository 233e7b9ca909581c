use image::GrayImage;

use crate::{
    error::{Result, WetnessError},
    image_utils::calculate_histogram,
};

/// Tells whether the room lights were on when a frame was captured.
///
/// A dark frame differs from a lit baseline almost everywhere, so the change
/// percentage it produces says nothing about water on the floor.
#[derive(Debug, Clone, Copy)]
pub struct LightsCheck {
    brightness_threshold: u8,
    min_bright_fraction: f64,
}

impl LightsCheck {
    pub fn new() -> Self {
        Self {
            brightness_threshold: 200,
            min_bright_fraction: 0.5,
        }
    }

    pub fn with_brightness_threshold(mut self, threshold: u8) -> Self {
        self.brightness_threshold = threshold;
        self
    }

    pub fn with_min_bright_fraction(mut self, fraction: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(WetnessError::InvalidParameter(format!(
                "bright pixel fraction must be within 0-1, got {}",
                fraction
            )));
        }
        self.min_bright_fraction = fraction;
        Ok(self)
    }

    pub fn bright_fraction(&self, image: &GrayImage) -> f64 {
        let total = image.width() as u64 * image.height() as u64;
        if total == 0 {
            return 0.0;
        }

        let histogram = calculate_histogram(image);
        let bright: u64 = histogram[self.brightness_threshold as usize + 1..]
            .iter()
            .map(|&count| count as u64)
            .sum();

        bright as f64 / total as f64
    }

    pub fn is_lit(&self, image: &GrayImage) -> bool {
        if image.width() == 0 || image.height() == 0 {
            return false;
        }
        self.bright_fraction(image) >= self.min_bright_fraction
    }
}

impl Default for LightsCheck {
    fn default() -> Self {
        Self::new()
    }
}

use image::{DynamicImage, GrayImage, Luma};

/// Collapses any decoded raster to single-channel luminance.
pub fn to_grayscale(image: &DynamicImage) -> GrayImage {
    match image {
        DynamicImage::ImageLuma8(gray) => gray.clone(),
        other => other.to_luma8(),
    }
}

pub fn absolute_difference(a: &GrayImage, b: &GrayImage) -> GrayImage {
    let (width, height) = a.dimensions();
    let mut diff = GrayImage::new(width, height);

    for (x, y, pixel) in a.enumerate_pixels() {
        let other = b.get_pixel(x, y)[0];
        diff.put_pixel(x, y, Luma([pixel[0].abs_diff(other)]));
    }

    diff
}

pub fn calculate_histogram(image: &GrayImage) -> [u32; 256] {
    let mut histogram = [0u32; 256];

    for pixel in image.pixels() {
        histogram[pixel[0] as usize] += 1;
    }

    histogram
}

pub fn count_nonzero(image: &GrayImage) -> u64 {
    image.pixels().filter(|p| p[0] != 0).count() as u64
}

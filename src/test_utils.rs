//! Test utilities for imageops-pixelate
//!
//! This module provides common fixtures for testing image operations.
//! It is only compiled when running tests.

use image::Rgba;

use crate::Image;

/// Creates a 2x2 RGBA image with predefined pixel values:
/// - (0,0): [200, 150, 100, 255] (opaque)
/// - (1,0): [100, 200, 150, 128] (semi-transparent)
/// - (0,1): [150, 100, 200, 64]  (more transparent)
/// - (1,1): [50, 75, 25, 0]      (fully transparent)
pub fn create_test_rgba_image() -> Image<Rgba<u8>> {
    let mut image: Image<Rgba<u8>> = Image::new(2, 2);
    image.put_pixel(0, 0, Rgba([200, 150, 100, 255]));
    image.put_pixel(1, 0, Rgba([100, 200, 150, 128]));
    image.put_pixel(0, 1, Rgba([150, 100, 200, 64]));
    image.put_pixel(1, 1, Rgba([50, 75, 25, 0]));
    image
}

/// Creates an RGBA image whose red ramps along x, green along y and blue
/// along the diagonal. Alpha alternates between opaque and half transparent.
pub fn create_gradient_rgba_image(width: u32, height: u32) -> Image<Rgba<u8>> {
    Image::from_fn(width, height, |x, y| {
        let r = (x * 255 / width.saturating_sub(1).max(1)).min(255) as u8;
        let g = (y * 255 / height.saturating_sub(1).max(1)).min(255) as u8;
        let b = ((x + y) * 255 / (width + height)) as u8;
        let a = if (x + y) % 2 == 0 { 255 } else { 128 };
        Rgba([r, g, b, a])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_test_rgba_image_with_valid_input_creates_image() {
        let image = create_test_rgba_image();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(0, 0), &Rgba([200, 150, 100, 255]));
        assert_eq!(image.get_pixel(1, 1), &Rgba([50, 75, 25, 0]));
    }

    #[test]
    fn create_gradient_rgba_image_spans_full_range() {
        let image = create_gradient_rgba_image(10, 5);
        assert_eq!(image.dimensions(), (10, 5));
        assert_eq!(image.get_pixel(0, 0)[0], 0);
        assert_eq!(image.get_pixel(9, 0)[0], 255);
        assert_eq!(image.get_pixel(0, 4)[1], 255);
        assert_eq!(image.get_pixel(1, 0)[3], 128);
    }
}

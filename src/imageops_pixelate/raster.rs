use image::{DynamicImage, Rgba};

use crate::error::PixelateError;
use crate::utils::{validate_non_empty_image, validate_rgba_buffer};
use crate::Image;

/// Validated, immutable RGBA8 raster.
///
/// Holding a `RasterImage` guarantees non-zero dimensions and a buffer of
/// exactly `width * height * 4` bytes in row-major, top-to-bottom order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    buffer: Image<Rgba<u8>>,
}

impl RasterImage {
    /// Wraps a raw RGBA8 byte buffer.
    ///
    /// # Errors
    ///
    /// * `PixelateError::EmptyImage` - zero width or height
    /// * `PixelateError::BufferSizeMismatch` - buffer length is not `width * height * 4`
    ///
    /// # Examples
    ///
    /// ```
    /// use imageops_pixelate::RasterImage;
    ///
    /// let raster = RasterImage::from_raw(1, 1, vec![255, 0, 0, 255]).unwrap();
    /// assert_eq!(raster.dimensions(), (1, 1));
    /// ```
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, PixelateError> {
        validate_rgba_buffer(width, height, pixels.len())?;
        let actual = pixels.len();
        let buffer = Image::from_raw(width, height, pixels).ok_or(
            PixelateError::BufferSizeMismatch {
                expected: width as usize * height as usize * 4,
                actual,
            },
        )?;
        Ok(Self { buffer })
    }

    /// Converts any decoded image to RGBA8.
    pub fn from_dynamic(image: &DynamicImage) -> Result<Self, PixelateError> {
        Self::try_from(image.to_rgba8())
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.buffer.dimensions()
    }

    /// Raw row-major RGBA bytes.
    pub fn pixels(&self) -> &[u8] {
        self.buffer.as_raw()
    }

    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.buffer.get_pixel(x, y)
    }

    pub fn as_image(&self) -> &Image<Rgba<u8>> {
        &self.buffer
    }

    pub fn into_image(self) -> Image<Rgba<u8>> {
        self.buffer
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.buffer.into_raw()
    }

    /// Wraps a buffer produced by an operation that preserves the dimensions
    /// of an already validated raster.
    pub(crate) fn from_validated(buffer: Image<Rgba<u8>>) -> Self {
        debug_assert!(buffer.width() > 0 && buffer.height() > 0);
        Self { buffer }
    }
}

impl TryFrom<Image<Rgba<u8>>> for RasterImage {
    type Error = PixelateError;

    fn try_from(buffer: Image<Rgba<u8>>) -> Result<Self, Self::Error> {
        let (width, height) = buffer.dimensions();
        validate_non_empty_image(width, height)?;
        Ok(Self { buffer })
    }
}

impl From<RasterImage> for Image<Rgba<u8>> {
    fn from(raster: RasterImage) -> Self {
        raster.buffer
    }
}

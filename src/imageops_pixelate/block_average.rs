use image::Rgba;
use itertools::iproduct;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::error::PixelateError;
use crate::utils::{rounded_mean, validate_non_empty_image, RGBA_CHANNELS};
use crate::Image;

/// Block averaging over a square grid.
///
/// The image is split into `block_size × block_size` cells starting at the
/// top-left corner. Cells on the right and bottom border may be smaller when
/// the dimensions are not multiples of the block size; they average only the
/// in-bounds pixels.
pub trait BlockAverageExt {
    /// Replaces every pixel with the rounded mean RGBA of its block.
    ///
    /// # Arguments
    ///
    /// * `block_size` - Edge length of a block in source pixels. `1` is the identity.
    ///
    /// # Errors
    ///
    /// * `PixelateError::InvalidBlockSize` - `block_size` is zero
    /// * `PixelateError::EmptyImage` - the image has a zero dimension
    ///
    /// # Examples
    ///
    /// ```
    /// use imageops_pixelate::{BlockAverageExt, Image};
    /// use image::Rgba;
    ///
    /// let image: Image<Rgba<u8>> = Image::from_fn(4, 4, |x, _| Rgba([x as u8 * 60, 0, 0, 255]));
    /// let blocky = image.block_average(2).unwrap();
    /// assert_eq!(blocky.get_pixel(0, 0), blocky.get_pixel(1, 1));
    /// ```
    fn block_average(&self, block_size: u32) -> Result<Image<Rgba<u8>>, PixelateError>;
}

impl BlockAverageExt for Image<Rgba<u8>> {
    fn block_average(&self, block_size: u32) -> Result<Image<Rgba<u8>>, PixelateError> {
        if block_size == 0 {
            return Err(PixelateError::InvalidBlockSize(block_size));
        }
        let (width, height) = self.dimensions();
        validate_non_empty_image(width, height)?;

        Ok(average_blocks_with(self, block_size, |color| color))
    }
}

/// Mean color of the block whose top-left corner is `(x0, y0)`.
fn block_mean(image: &Image<Rgba<u8>>, x0: u32, y0: u32, width: u32, height: u32) -> Rgba<u8> {
    let mut sums = [0u64; RGBA_CHANNELS];
    for (y, x) in iproduct!(y0..y0 + height, x0..x0 + width) {
        let Rgba(channels) = *image.get_pixel(x, y);
        for (sum, value) in sums.iter_mut().zip(channels) {
            *sum += u64::from(value);
        }
    }

    let count = u64::from(width) * u64::from(height);
    Rgba(sums.map(|sum| rounded_mean(sum, count)))
}

/// Averages every block and writes `finish(mean)` to all of its pixels.
///
/// `finish` runs once per block. The caller guarantees `block_size >= 1` and
/// a non-empty image.
pub(crate) fn average_blocks_with<F>(
    image: &Image<Rgba<u8>>,
    block_size: u32,
    finish: F,
) -> Image<Rgba<u8>>
where
    F: Fn(Rgba<u8>) -> Rgba<u8> + Sync,
{
    let (width, height) = image.dimensions();
    let row_len = width as usize * RGBA_CHANNELS;
    // One band is a full row of blocks; bands never overlap in the output.
    let band_len = row_len * block_size as usize;
    let mut output: Image<Rgba<u8>> = Image::new(width, height);

    let fill_band = |(band_index, band): (usize, &mut [u8])| {
        let y0 = band_index as u32 * block_size;
        let band_height = (band.len() / row_len) as u32;

        for x0 in (0..width).step_by(block_size as usize) {
            let block_width = block_size.min(width - x0);
            let Rgba(color) = finish(block_mean(image, x0, y0, block_width, band_height));

            let start = x0 as usize * RGBA_CHANNELS;
            let end = start + block_width as usize * RGBA_CHANNELS;
            for row in band.chunks_exact_mut(row_len) {
                for pixel in row[start..end].chunks_exact_mut(RGBA_CHANNELS) {
                    pixel.copy_from_slice(&color);
                }
            }
        }
    };

    #[cfg(feature = "rayon")]
    output.par_chunks_mut(band_len).enumerate().for_each(fill_band);
    #[cfg(not(feature = "rayon"))]
    output.chunks_mut(band_len).enumerate().for_each(fill_band);

    output
}

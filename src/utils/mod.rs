//! Internal utility functions for imageops-pixelate.
//!
//! Channel rounding and geometry checks shared by the individual operations.

use imageproc::definitions::Clamp;

use crate::error::PixelateError;

/// Number of bytes per RGBA8 pixel.
pub const RGBA_CHANNELS: usize = 4;

/// Rounds a floating-point channel value and clamps it into `0..=255`.
///
/// Halves round toward positive infinity, like `Math.round`. `imageproc`'s
/// clamp truncates, so the value is rounded first.
///
/// # Arguments
///
/// * `value` - The channel value to convert
///
/// # Returns
///
/// The nearest representable `u8`
#[inline]
pub fn round_to_channel(value: f64) -> u8 {
    <u8 as Clamp<f64>>::clamp((value + 0.5).floor())
}

/// Integer mean of `count` channel samples, rounding halves up.
#[inline]
pub fn rounded_mean(sum: u64, count: u64) -> u8 {
    debug_assert!(count > 0);
    ((sum + count / 2) / count).min(255) as u8
}

/// Validates that an image has non-zero dimensions.
///
/// # Errors
///
/// * `PixelateError::EmptyImage` - if either dimension is zero
pub fn validate_non_empty_image(width: u32, height: u32) -> Result<(), PixelateError> {
    if width == 0 || height == 0 {
        Err(PixelateError::EmptyImage { width, height })
    } else {
        Ok(())
    }
}

/// Validates that a raw buffer matches RGBA8 geometry.
///
/// # Errors
///
/// * `PixelateError::EmptyImage` - if either dimension is zero
/// * `PixelateError::BufferSizeMismatch` - if `len != width * height * 4`
pub fn validate_rgba_buffer(width: u32, height: u32, len: usize) -> Result<(), PixelateError> {
    validate_non_empty_image(width, height)?;
    let expected = width as usize * height as usize * RGBA_CHANNELS;
    if len != expected {
        return Err(PixelateError::BufferSizeMismatch {
            expected,
            actual: len,
        });
    }
    Ok(())
}

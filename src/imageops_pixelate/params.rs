use std::ops::RangeInclusive;

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::imageops_pixelate::tone::ToneAdjustment;

pub const PIXEL_SIZE_RANGE: RangeInclusive<u32> = 2..=32;
pub const SATURATION_RANGE: RangeInclusive<f32> = 0.5..=2.0;
pub const CONTRAST_RANGE: RangeInclusive<f32> = 0.5..=1.5;

pub const DEFAULT_PIXEL_SIZE: u32 = 8;
pub const DEFAULT_SATURATION: f32 = 1.2;
pub const DEFAULT_CONTRAST: f32 = 1.1;
pub const DEFAULT_SMOOTHING: bool = true;

/// User-facing pixelation settings.
///
/// Every value is clamped into its domain on construction, so a
/// `PixelationParameters` is always safe to hand to the engine. Deserializing
/// goes through [`crate::sanitize`] and therefore accepts any JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "serde_json::Value")]
pub struct PixelationParameters {
    pixel_size: u32,
    saturation: f32,
    contrast: f32,
    smoothing: bool,
}

impl PixelationParameters {
    /// Creates clamped parameters.
    ///
    /// Non-finite `saturation` or `contrast` fall back to their defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use imageops_pixelate::PixelationParameters;
    ///
    /// let params = PixelationParameters::new(50, 0.1, 5.0, false);
    /// assert_eq!(params.pixel_size(), 32);
    /// assert_eq!(params.saturation(), 0.5);
    /// assert_eq!(params.contrast(), 1.5);
    /// ```
    pub fn new(pixel_size: u32, saturation: f32, contrast: f32, smoothing: bool) -> Self {
        Self {
            pixel_size: pixel_size.clamp(*PIXEL_SIZE_RANGE.start(), *PIXEL_SIZE_RANGE.end()),
            saturation: clamp_or_default(saturation, &SATURATION_RANGE, DEFAULT_SATURATION),
            contrast: clamp_or_default(contrast, &CONTRAST_RANGE, DEFAULT_CONTRAST),
            smoothing,
        }
    }

    /// Edge length of an averaged block, in source pixels.
    pub fn pixel_size(&self) -> u32 {
        self.pixel_size
    }

    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    pub fn contrast(&self) -> f32 {
        self.contrast
    }

    /// Whether the renderer should interpolate when scaling the result.
    pub fn smoothing(&self) -> bool {
        self.smoothing
    }

    pub fn tone(&self) -> ToneAdjustment {
        ToneAdjustment::new(self.contrast, self.saturation)
    }

    /// Filter a renderer should use when scaling the pixelated output for display.
    pub fn resize_filter(&self) -> FilterType {
        if self.smoothing {
            FilterType::Triangle
        } else {
            FilterType::Nearest
        }
    }
}

impl Default for PixelationParameters {
    fn default() -> Self {
        Self {
            pixel_size: DEFAULT_PIXEL_SIZE,
            saturation: DEFAULT_SATURATION,
            contrast: DEFAULT_CONTRAST,
            smoothing: DEFAULT_SMOOTHING,
        }
    }
}

fn clamp_or_default(value: f32, range: &RangeInclusive<f32>, default: f32) -> f32 {
    if value.is_finite() {
        value.clamp(*range.start(), *range.end())
    } else {
        default
    }
}

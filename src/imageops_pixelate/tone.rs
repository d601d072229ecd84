use image::Rgba;
use imageproc::map::map_colors;

use crate::utils::round_to_channel;
use crate::Image;

/// Contrast and saturation gains applied to a color.
///
/// Contrast scales each channel's distance from mid-gray; saturation then
/// scales each channel's distance from the plain mean of the contrasted
/// channels. Both run in that order because the gray reference is taken
/// after contrast. Alpha is never touched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneAdjustment {
    /// Multiplier on the deviation from 0.5 in normalized channel space
    pub contrast: f32,
    /// Multiplier on the deviation from the per-pixel channel mean
    pub saturation: f32,
}

impl ToneAdjustment {
    pub const IDENTITY: Self = Self {
        contrast: 1.0,
        saturation: 1.0,
    };

    pub const fn new(contrast: f32, saturation: f32) -> Self {
        Self {
            contrast,
            saturation,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.contrast == 1.0 && self.saturation == 1.0
    }

    /// Applies contrast, then saturation, then rounds and clamps to `0..=255`.
    ///
    /// # Examples
    ///
    /// ```
    /// use imageops_pixelate::ToneAdjustment;
    /// use image::Rgba;
    ///
    /// let grayscale = ToneAdjustment::new(1.0, 0.0);
    /// assert_eq!(grayscale.apply(Rgba([90, 120, 150, 7])), Rgba([120, 120, 120, 7]));
    /// ```
    pub fn apply(&self, pixel: Rgba<u8>) -> Rgba<u8> {
        // Double precision keeps exact half-way results such as 0.5 from rounding down.
        let contrast = f64::from(self.contrast);
        let saturation = f64::from(self.saturation);

        let Rgba([r, g, b, a]) = pixel;
        let contrasted =
            [r, g, b].map(|c| ((f64::from(c) / 255.0 - 0.5) * contrast + 0.5) * 255.0);
        let gray = contrasted.iter().sum::<f64>() / 3.0;
        let [r, g, b] = contrasted.map(|c| round_to_channel(gray + (c - gray) * saturation));
        Rgba([r, g, b, a])
    }
}

impl Default for ToneAdjustment {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Per-pixel tone adjustment over a whole image.
pub trait ToneAdjustExt {
    /// Returns a new image with `tone` applied to every pixel.
    fn adjust_tone(&self, tone: ToneAdjustment) -> Image<Rgba<u8>>;
}

impl ToneAdjustExt for Image<Rgba<u8>> {
    fn adjust_tone(&self, tone: ToneAdjustment) -> Image<Rgba<u8>> {
        if tone.is_identity() {
            return self.clone();
        }
        map_colors(self, |pixel| tone.apply(pixel))
    }
}

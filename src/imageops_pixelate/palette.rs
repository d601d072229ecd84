use image::{Rgb, Rgba};
use imageproc::map::map_colors;

use crate::error::PaletteError;
use crate::Image;

/// Built-in retro palette: black and dark navies, browns, skin tones,
/// yellow, greens, blues and white.
const RETRO_COLORS: [Rgb<u8>; 22] = [
    Rgb([0, 0, 0]),
    Rgb([34, 32, 52]),
    Rgb([69, 40, 60]),
    Rgb([102, 57, 49]),
    Rgb([143, 86, 59]),
    Rgb([223, 113, 38]),
    Rgb([217, 160, 102]),
    Rgb([238, 195, 154]),
    Rgb([251, 242, 54]),
    Rgb([153, 229, 80]),
    Rgb([106, 190, 48]),
    Rgb([55, 148, 110]),
    Rgb([75, 105, 47]),
    Rgb([82, 75, 36]),
    Rgb([50, 60, 57]),
    Rgb([63, 63, 116]),
    Rgb([48, 96, 130]),
    Rgb([91, 110, 225]),
    Rgb([99, 155, 255]),
    Rgb([95, 205, 228]),
    Rgb([203, 219, 252]),
    Rgb([255, 255, 255]),
];

/// Weights of the luma-weighted distance, scaled by 100 so the metric stays
/// in exact integer arithmetic.
const LUMA_WEIGHTS: [u32; 3] = [30, 59, 11];

/// Ordered, non-empty set of colors used for quantization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb<u8>>,
}

impl Palette {
    /// Creates a palette from an ordered list of colors.
    ///
    /// # Errors
    ///
    /// * `PaletteError::Empty` - `colors` is empty
    pub fn new(colors: Vec<Rgb<u8>>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        Ok(Self { colors })
    }

    /// Parses `#RRGGBB` or `RRGGBB` codes, keeping their order.
    ///
    /// # Errors
    ///
    /// * `PaletteError::Empty` - no codes were given
    /// * `PaletteError::InvalidHexColor` - a code is malformed
    pub fn from_hex<S: AsRef<str>>(codes: &[S]) -> Result<Self, PaletteError> {
        let colors = codes
            .iter()
            .map(|code| parse_hex_color(code.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// The built-in 22 color retro palette.
    pub fn retro() -> Self {
        Self {
            colors: RETRO_COLORS.to_vec(),
        }
    }

    pub fn colors(&self) -> &[Rgb<u8>] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Never true for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Closest palette entry under the luma-weighted squared distance
    /// `0.30·Δr² + 0.59·Δg² + 0.11·Δb²`.
    ///
    /// Ties go to the entry that comes first in palette order.
    ///
    /// # Examples
    ///
    /// ```
    /// use imageops_pixelate::Palette;
    /// use image::Rgb;
    ///
    /// let palette = Palette::retro();
    /// assert_eq!(palette.nearest(Rgb([250, 250, 250])), Rgb([255, 255, 255]));
    /// ```
    pub fn nearest(&self, color: Rgb<u8>) -> Rgb<u8> {
        let mut best = self.colors[0];
        let mut best_distance = luma_weighted_distance(color, best);
        for &candidate in &self.colors[1..] {
            let distance = luma_weighted_distance(color, candidate);
            if distance < best_distance {
                best = candidate;
                best_distance = distance;
            }
        }
        best
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::retro()
    }
}

fn luma_weighted_distance(Rgb(a): Rgb<u8>, Rgb(b): Rgb<u8>) -> u32 {
    a.iter()
        .zip(b.iter())
        .zip(LUMA_WEIGHTS)
        .map(|((&x, &y), weight)| weight * u32::from(x.abs_diff(y)).pow(2))
        .sum()
}

fn parse_hex_color(code: &str) -> Result<Rgb<u8>, PaletteError> {
    let invalid = || PaletteError::InvalidHexColor(code.to_owned());
    let digits = code.strip_prefix('#').unwrap_or(code);
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(invalid());
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
    };
    Ok(Rgb([channel(0..2)?, channel(2..4)?, channel(4..6)?]))
}

/// Palette quantization of RGBA images.
pub trait QuantizeExt {
    /// Replaces every pixel's RGB with its nearest palette entry, keeping alpha.
    fn quantize_to_palette(&self, palette: &Palette) -> Image<Rgba<u8>>;
}

impl QuantizeExt for Image<Rgba<u8>> {
    fn quantize_to_palette(&self, palette: &Palette) -> Image<Rgba<u8>> {
        map_colors(self, |Rgba([r, g, b, a])| {
            let Rgb([r, g, b]) = palette.nearest(Rgb([r, g, b]));
            Rgba([r, g, b, a])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_gradient_rgba_image;

    #[test]
    fn retro_palette_has_22_entries_from_black_to_white() {
        let palette = Palette::retro();
        assert_eq!(palette.len(), 22);
        assert_eq!(palette.colors()[0], Rgb([0, 0, 0]));
        assert_eq!(palette.colors()[21], Rgb([255, 255, 255]));
    }

    #[test]
    fn new_with_empty_colors_returns_error() {
        assert_eq!(Palette::new(Vec::new()), Err(PaletteError::Empty));
    }

    #[test]
    fn nearest_with_exact_entry_returns_that_entry() {
        let palette = Palette::retro();
        for &color in palette.colors() {
            assert_eq!(palette.nearest(color), color);
        }
    }

    #[test]
    fn nearest_weights_green_more_than_blue() {
        // Off by 20 in green vs. off by 30 in blue:
        // green-heavy distance 59 * 400 = 23600, blue-heavy 11 * 900 = 9900
        let palette = Palette::new(vec![Rgb([100, 120, 100]), Rgb([100, 100, 130])]).unwrap();
        assert_eq!(palette.nearest(Rgb([100, 100, 100])), Rgb([100, 100, 130]));
    }

    #[test]
    fn nearest_with_tie_prefers_first_entry() {
        let palette = Palette::new(vec![Rgb([90, 0, 0]), Rgb([110, 0, 0])]).unwrap();
        assert_eq!(palette.nearest(Rgb([100, 0, 0])), Rgb([90, 0, 0]));

        let reversed = Palette::new(vec![Rgb([110, 0, 0]), Rgb([90, 0, 0])]).unwrap();
        assert_eq!(reversed.nearest(Rgb([100, 0, 0])), Rgb([110, 0, 0]));
    }

    #[test]
    fn from_hex_with_valid_codes_preserves_order() {
        let palette = Palette::from_hex(&["#FF0000", "00ff7f", "#123456"]).unwrap();
        assert_eq!(
            palette.colors(),
            &[Rgb([255, 0, 0]), Rgb([0, 255, 127]), Rgb([0x12, 0x34, 0x56])]
        );
    }

    #[test]
    fn from_hex_with_malformed_code_returns_error() {
        assert_eq!(
            Palette::from_hex(&["#FFF"]),
            Err(PaletteError::InvalidHexColor("#FFF".to_owned()))
        );
        assert!(Palette::from_hex(&["GG0000"]).is_err());
        assert!(Palette::from_hex(&["#ÿÿÿ"]).is_err());
        assert_eq!(Palette::from_hex::<&str>(&[]), Err(PaletteError::Empty));
    }

    #[test]
    fn quantize_to_palette_keeps_alpha_and_uses_only_palette_colors() {
        let palette = Palette::retro();
        let image = create_gradient_rgba_image(16, 16);
        let result = image.quantize_to_palette(&palette);

        for (before, after) in image.pixels().zip(result.pixels()) {
            assert_eq!(before[3], after[3]);
            assert!(palette.colors().contains(&Rgb([after[0], after[1], after[2]])));
        }
    }
}

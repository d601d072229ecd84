use image::Rgba;
use imageproc::definitions::Clamp;

use crate::error::PixelateError;
use crate::utils::{validate_non_empty_image, RGBA_CHANNELS};
use crate::Image;

/// Contribution of one source row or column to one destination row or column.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CoverageWeight {
    /// Source index
    source_index: u32,
    /// Share of the destination footprint covered by this source pixel
    weight: f32,
}

/// Coverage weights along one axis.
///
/// Destination pixel `d` covers the source interval `[d·s, (d+1)·s)` with
/// `s = src_size / dst_size`. Every source pixel overlapping that interval
/// contributes its overlap length divided by `s`, so each destination entry's
/// weights sum to one.
fn coverage_weights(src_size: u32, dst_size: u32) -> Vec<Vec<CoverageWeight>> {
    let scale = src_size as f32 / dst_size as f32;

    (0..dst_size)
        .map(|d| {
            let start = d as f32 * scale;
            let end = (start + scale).min(src_size as f32);
            let first = start.floor() as u32;
            let last = (end.ceil() as u32).min(src_size);

            (first..last)
                .filter_map(|s| {
                    let overlap = end.min(s as f32 + 1.0) - start.max(s as f32);
                    (overlap > 1e-6).then(|| CoverageWeight {
                        source_index: s,
                        weight: overlap / (end - start),
                    })
                })
                .collect()
        })
        .collect()
}

/// Area-averaging reduction of RGBA images.
pub trait AreaDownsampleExt {
    /// Shrinks the image so every output pixel is the coverage-weighted mean
    /// of the source pixels under it, alpha included.
    ///
    /// # Errors
    ///
    /// * `PixelateError::EmptyImage` - the source has a zero dimension
    /// * `PixelateError::InvalidTargetDimensions` - a target dimension is zero
    /// * `PixelateError::UpscalingNotSupported` - a target dimension exceeds the source
    fn downsample_area(&self, width: u32, height: u32) -> Result<Image<Rgba<u8>>, PixelateError>;
}

impl AreaDownsampleExt for Image<Rgba<u8>> {
    fn downsample_area(&self, width: u32, height: u32) -> Result<Image<Rgba<u8>>, PixelateError> {
        let (src_width, src_height) = self.dimensions();
        validate_non_empty_image(src_width, src_height)?;

        if width == 0 || height == 0 {
            return Err(PixelateError::InvalidTargetDimensions { width, height });
        }
        if width > src_width || height > src_height {
            return Err(PixelateError::UpscalingNotSupported {
                src_width,
                src_height,
                target_width: width,
                target_height: height,
            });
        }
        if (width, height) == (src_width, src_height) {
            return Ok(self.clone());
        }

        let x_weights = coverage_weights(src_width, width);
        let y_weights = coverage_weights(src_height, height);

        Ok(Image::from_fn(width, height, |dx, dy| {
            let mut sum = [0.0f32; RGBA_CHANNELS];
            for row in &y_weights[dy as usize] {
                for column in &x_weights[dx as usize] {
                    let weight = row.weight * column.weight;
                    let Rgba(channels) = *self.get_pixel(column.source_index, row.source_index);
                    for (acc, value) in sum.iter_mut().zip(channels) {
                        *acc += f32::from(value) * weight;
                    }
                }
            }
            Rgba(sum.map(|value| <u8 as Clamp<f32>>::clamp(value.round())))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_gradient_rgba_image;

    #[test]
    fn coverage_weights_with_integer_scale_splits_evenly() {
        let weights = coverage_weights(4, 2);
        assert_eq!(weights.len(), 2);
        assert_eq!(
            weights[1],
            vec![
                CoverageWeight {
                    source_index: 2,
                    weight: 0.5
                },
                CoverageWeight {
                    source_index: 3,
                    weight: 0.5
                },
            ]
        );
    }

    #[test]
    fn coverage_weights_with_fractional_scale_sum_to_one() {
        for (src, dst) in [(5, 2), (7, 3), (100, 67), (9, 1)] {
            for entry in coverage_weights(src, dst) {
                let total: f32 = entry.iter().map(|w| w.weight).sum();
                assert!((total - 1.0).abs() < 1e-4, "{src}->{dst}: {total}");
            }
        }
    }

    #[test]
    fn coverage_weights_with_fractional_scale_shares_boundary_pixel() {
        // 3 -> 2: scale 1.5, source pixel 1 is split between both outputs
        let weights = coverage_weights(3, 2);
        assert_eq!(weights[0].last().map(|w| w.source_index), Some(1));
        assert_eq!(weights[1].first().map(|w| w.source_index), Some(1));
    }

    #[test]
    fn downsample_area_with_2x_scale_averages_quads() {
        let image = Image::from_fn(4, 2, |x, _| Rgba([(x * 40) as u8, 0, 0, 255]));
        let result = image.downsample_area(2, 1).unwrap();
        assert_eq!(*result.get_pixel(0, 0), Rgba([20, 0, 0, 255]));
        assert_eq!(*result.get_pixel(1, 0), Rgba([100, 0, 0, 255]));
    }

    #[test]
    fn downsample_area_with_same_size_returns_copy() {
        let image = create_gradient_rgba_image(5, 5);
        assert_eq!(image.downsample_area(5, 5).unwrap(), image);
    }

    #[test]
    fn downsample_area_to_single_pixel_gives_global_mean() {
        let mut image = Image::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        image.put_pixel(1, 1, Rgba([200, 100, 40, 255]));
        let result = image.downsample_area(1, 1).unwrap();
        assert_eq!(*result.get_pixel(0, 0), Rgba([50, 25, 10, 255]));
    }

    #[test]
    fn downsample_area_with_larger_target_returns_error() {
        let image = create_gradient_rgba_image(4, 4);
        assert_eq!(
            image.downsample_area(8, 2),
            Err(PixelateError::UpscalingNotSupported {
                src_width: 4,
                src_height: 4,
                target_width: 8,
                target_height: 2
            })
        );
    }

    #[test]
    fn downsample_area_with_zero_target_returns_error() {
        let image = create_gradient_rgba_image(4, 4);
        assert!(matches!(
            image.downsample_area(0, 2),
            Err(PixelateError::InvalidTargetDimensions { .. })
        ));
    }
}

//! # imageops-pixelate
//!
//! Pixel-art conversion for RGBA8 images.
//!
//! - **Block Averaging**: replaces each square block with its mean color
//! - **Tone Adjustment**: contrast around mid-gray followed by saturation around the pixel mean
//! - **Palette Quantization**: snaps colors to a fixed palette with a luma-weighted distance
//! - **Area Downsampling**: coverage-weighted reduction used by the palette pipeline
//! - **Suggestion Sanitizing**: turns untrusted, free-form parameter suggestions into valid settings
//!
//! ## Example Usage
//!
//! ```
//! use imageops_pixelate::{pixelate, sanitize_text, Pixelator, RasterImage};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pixels = vec![128u8; 64 * 48 * 4];
//! let image = RasterImage::from_raw(64, 48, pixels)?;
//!
//! // Settings suggested by an external service, whatever shape they arrive in
//! let params = sanitize_text(r#"Try this: {"pixelSize": 12, "contrast": "1.3"}"#);
//!
//! let blocky = pixelate(&image, &params);
//! let retro = Pixelator::retro().pixelate(&image, &params);
//! assert_eq!(blocky.dimensions(), retro.dimensions());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Features
//!
//! - `rayon`: processes rows of blocks in parallel

mod error;
mod imageops_pixelate;
mod utils;

#[cfg(test)]
mod test_utils;

pub use error::{PaletteError, PixelateError};
pub use imageops_pixelate::area_downsample::AreaDownsampleExt;
pub use imageops_pixelate::block_average::BlockAverageExt;
pub use imageops_pixelate::palette::{Palette, QuantizeExt};
pub use imageops_pixelate::params::{
    PixelationParameters, CONTRAST_RANGE, DEFAULT_CONTRAST, DEFAULT_PIXEL_SIZE,
    DEFAULT_SATURATION, DEFAULT_SMOOTHING, PIXEL_SIZE_RANGE, SATURATION_RANGE,
};
pub use imageops_pixelate::pipeline::{pixelate, PixelateExt, PixelationMode, Pixelator};
pub use imageops_pixelate::raster::RasterImage;
pub use imageops_pixelate::suggestion::{extract_suggestion, sanitize, sanitize_text};
pub use imageops_pixelate::tone::{ToneAdjustExt, ToneAdjustment};

// Re-export imageproc::definitions::Image for convenience
pub use imageproc::definitions::Image;

use image::imageops::{self, FilterType};
use image::Rgba;
use log::{debug, warn};

use crate::error::PixelateError;
use crate::imageops_pixelate::area_downsample::AreaDownsampleExt;
use crate::imageops_pixelate::block_average::average_blocks_with;
use crate::imageops_pixelate::palette::{Palette, QuantizeExt};
use crate::imageops_pixelate::params::PixelationParameters;
use crate::imageops_pixelate::raster::RasterImage;
use crate::imageops_pixelate::tone::ToneAdjustExt;
use crate::Image;

/// How the engine turns a picture into pixel art.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PixelationMode {
    /// Per-block mean color, then contrast and saturation. Keeps continuous tone.
    #[default]
    BlockAverage,
    /// Area-downsample by the pixel size, adjust tone, snap to the palette and
    /// magnify back with nearest neighbour.
    Palette(Palette),
}

/// Pixelation engine configured with a [`PixelationMode`].
///
/// Holds no per-call state; one instance can serve any number of images.
#[derive(Debug, Clone, Default)]
pub struct Pixelator {
    mode: PixelationMode,
}

impl Pixelator {
    pub fn new(mode: PixelationMode) -> Self {
        Self { mode }
    }

    pub fn with_palette(palette: Palette) -> Self {
        Self::new(PixelationMode::Palette(palette))
    }

    /// Palette mode with the built-in retro palette.
    pub fn retro() -> Self {
        Self::with_palette(Palette::retro())
    }

    pub fn mode(&self) -> &PixelationMode {
        &self.mode
    }

    /// Pixelates `image`. Output dimensions always equal the input's.
    ///
    /// # Examples
    ///
    /// ```
    /// use imageops_pixelate::{PixelationParameters, Pixelator, RasterImage};
    ///
    /// let red = [255, 0, 0, 255].repeat(16);
    /// let image = RasterImage::from_raw(4, 4, red).unwrap();
    /// let params = PixelationParameters::new(2, 1.0, 1.0, true);
    ///
    /// let result = Pixelator::default().pixelate(&image, &params);
    /// assert_eq!(result, image);
    /// ```
    pub fn pixelate(&self, image: &RasterImage, params: &PixelationParameters) -> RasterImage {
        let (width, height) = image.dimensions();
        let pixel_size = params.pixel_size();
        let tone = params.tone();

        let output = match &self.mode {
            PixelationMode::BlockAverage => {
                debug!("Block-averaging {width}x{height} with block size {pixel_size}");
                average_blocks_with(image.as_image(), pixel_size, |color| tone.apply(color))
            }
            PixelationMode::Palette(palette) => {
                let small_width = (width / pixel_size).clamp(1, width);
                let small_height = (height / pixel_size).clamp(1, height);
                debug!(
                    "Quantizing {width}x{height} through {small_width}x{small_height} with {} colors",
                    palette.len()
                );
                quantize_through(image.as_image(), small_width, small_height, params, palette)
            }
        };

        RasterImage::from_validated(output)
    }
}

/// Shrink, adjust tone, quantize at low resolution, then magnify back.
///
/// Quantizing before nearest-neighbour magnification gives the same result as
/// quantizing afterwards, on far fewer pixels.
fn quantize_through(
    image: &Image<Rgba<u8>>,
    small_width: u32,
    small_height: u32,
    params: &PixelationParameters,
    palette: &Palette,
) -> Image<Rgba<u8>> {
    let (width, height) = image.dimensions();
    let small = match image.downsample_area(small_width, small_height) {
        Ok(small) => small,
        // The caller keeps the target within the source, so this only fires on a broken invariant.
        Err(err) => {
            warn!("Area downsample failed ({err}), quantizing at full size");
            image.clone()
        }
    };

    let quantized = small
        .adjust_tone(params.tone())
        .quantize_to_palette(palette);

    imageops::resize(&quantized, width, height, FilterType::Nearest)
}

/// Pixelates with the default block-averaging engine.
///
/// Deterministic and total: a validated [`RasterImage`] and clamped
/// [`PixelationParameters`] always produce an image of the same size.
pub fn pixelate(image: &RasterImage, params: &PixelationParameters) -> RasterImage {
    Pixelator::default().pixelate(image, params)
}

/// Pixelation directly on RGBA image buffers.
pub trait PixelateExt {
    /// Block-averaging pixelation of an unvalidated buffer.
    ///
    /// # Errors
    ///
    /// * `PixelateError::EmptyImage` - the image has a zero dimension
    fn pixelate(&self, params: &PixelationParameters) -> Result<Image<Rgba<u8>>, PixelateError>;

    /// Pixelation with an explicit engine configuration.
    ///
    /// # Errors
    ///
    /// * `PixelateError::EmptyImage` - the image has a zero dimension
    fn pixelate_with(
        &self,
        pixelator: &Pixelator,
        params: &PixelationParameters,
    ) -> Result<Image<Rgba<u8>>, PixelateError>;
}

impl PixelateExt for Image<Rgba<u8>> {
    fn pixelate(&self, params: &PixelationParameters) -> Result<Image<Rgba<u8>>, PixelateError> {
        self.pixelate_with(&Pixelator::default(), params)
    }

    fn pixelate_with(
        &self,
        pixelator: &Pixelator,
        params: &PixelationParameters,
    ) -> Result<Image<Rgba<u8>>, PixelateError> {
        let raster = RasterImage::try_from(self.clone())?;
        Ok(pixelator.pixelate(&raster, params).into_image())
    }
}

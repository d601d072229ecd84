use thiserror::Error;

/// Error type for pixelation operations
///
/// Every variant describes a broken input contract (bad geometry or a
/// nonsensical size argument). The pixelation engine itself never fails once
/// its inputs have been validated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PixelateError {
    /// The image has zero width or zero height
    #[error("Image dimensions must be non-zero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    /// The raw pixel buffer does not hold exactly `width * height * 4` bytes
    #[error("Pixel buffer holds {actual} bytes, expected {expected} for RGBA8")]
    BufferSizeMismatch {
        /// Expected byte length
        expected: usize,
        /// Actual byte length
        actual: usize,
    },

    /// Block edge length of zero
    #[error("Block size must be at least 1, got {0}")]
    InvalidBlockSize(u32),

    /// Target dimensions of a resize contain a zero
    #[error("Target dimensions must be non-zero, got {width}x{height}")]
    InvalidTargetDimensions { width: u32, height: u32 },

    /// Area downsampling was asked to enlarge the image
    #[error("Cannot downsample {src_width}x{src_height} to larger size {target_width}x{target_height}")]
    UpscalingNotSupported {
        src_width: u32,
        src_height: u32,
        target_width: u32,
        target_height: u32,
    },
}

/// Error type for palette construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// A palette needs at least one color
    #[error("Palette must contain at least one color")]
    Empty,

    /// A hex color code could not be parsed
    ///
    /// Accepted forms are `#RRGGBB` and `RRGGBB`.
    #[error("Invalid hex color code: {0:?}")]
    InvalidHexColor(String),
}

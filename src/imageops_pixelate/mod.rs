pub mod area_downsample;
pub mod block_average;
pub mod palette;
pub mod params;
pub mod pipeline;
pub mod raster;
pub mod suggestion;
pub mod tone;

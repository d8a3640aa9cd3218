//! Classic raster operations on an immutable RGB buffer: colour matrices,
//! zero-padded convolution, Floyd-Steinberg dithering, Voronoi mosaics and
//! procedurally generated patterns.

mod error;
mod imageops_classic;
mod utils;

#[cfg(test)]
mod test_utils;

pub use error::{Error, Result};
pub use imageops_classic::color_transform::{ColorMatrix, ColorTransformExt};
pub use imageops_classic::convolution::{ConvolveExt, Kernel};
pub use imageops_classic::dither::DitherExt;
pub use imageops_classic::format::{load, save, ImageFormat};
pub use imageops_classic::model::{ImageModel, Operation};
pub use imageops_classic::mosaic::{random_seeds, MosaicExt, Seed};
pub use imageops_classic::pattern::{Pattern, BLACK, BLUE, RAINBOW, RED, WHITE};
pub use imageops_classic::pixel_buffer::{PixelBuffer, CHANNELS};

pub mod color_transform;
pub mod convolution;
pub mod dither;
pub mod format;
pub mod model;
pub mod mosaic;
pub mod pattern;
pub mod pixel_buffer;

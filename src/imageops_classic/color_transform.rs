use image::Rgb;
use imageproc::map::map_colors;

use crate::imageops_classic::pixel_buffer::PixelBuffer;
use crate::utils::clamp_to_channel;

/// 3x3 linear recombination of the red, green and blue channels.
///
/// Row `c` holds the weights producing output channel `c`:
/// `out[c] = m[c][0] * r + m[c][1] * g + m[c][2] * b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix(pub [[f64; 3]; 3]);

impl ColorMatrix {
    /// Luma weights (Rec. 709) copied to all three output channels.
    pub const GREYSCALE: Self = Self([
        [0.2126, 0.7152, 0.0722],
        [0.2126, 0.7152, 0.0722],
        [0.2126, 0.7152, 0.0722],
    ]);

    pub const SEPIA: Self = Self([
        [0.393, 0.769, 0.189],
        [0.349, 0.686, 0.168],
        [0.272, 0.534, 0.131],
    ]);

    /// Applies the matrix to one pixel, clamping every channel into `[0, 255]`.
    #[inline]
    pub fn apply(&self, [red, green, blue]: [u8; 3]) -> [u8; 3] {
        let (red, green, blue) = (f64::from(red), f64::from(green), f64::from(blue));
        self.0
            .map(|[wr, wg, wb]| clamp_to_channel(wr * red + wg * green + wb * blue))
    }
}

/// Per-pixel colour transformations.
pub trait ColorTransformExt {
    /// Applies an arbitrary colour matrix to every pixel.
    ///
    /// # Examples
    ///
    /// ```
    /// use imageops_classic::{ColorMatrix, ColorTransformExt, PixelBuffer};
    ///
    /// # fn example() -> Result<(), imageops_classic::Error> {
    /// let buffer = PixelBuffer::from_pixel(2, 2, [10, 20, 30])?;
    /// let swapped = buffer.transform(&ColorMatrix([
    ///     [0.0, 0.0, 1.0],
    ///     [0.0, 1.0, 0.0],
    ///     [1.0, 0.0, 0.0],
    /// ]));
    /// assert_eq!(swapped.pixel(0, 0)?, [30, 20, 10]);
    /// # Ok(())
    /// # }
    /// # example().unwrap();
    /// ```
    fn transform(&self, matrix: &ColorMatrix) -> PixelBuffer;

    fn greyscale(&self) -> PixelBuffer {
        self.transform(&ColorMatrix::GREYSCALE)
    }

    fn sepia(&self) -> PixelBuffer {
        self.transform(&ColorMatrix::SEPIA)
    }
}

impl ColorTransformExt for PixelBuffer {
    fn transform(&self, matrix: &ColorMatrix) -> PixelBuffer {
        log::debug!(
            "colour transform on {}x{} buffer",
            self.width(),
            self.height()
        );
        let image = map_colors(self.as_rgb_image(), |Rgb(pixel)| Rgb(matrix.apply(pixel)));
        PixelBuffer::from_derived(image)
    }
}

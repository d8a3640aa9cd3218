use image::RgbImage;
use itertools::iproduct;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::imageops_classic::pixel_buffer::{PixelBuffer, CHANNELS};
use crate::utils::clamp_to_channel;

/// Square convolution kernel with an odd side length.
///
/// Weights are stored row-major: `weight(i, j)` multiplies the pixel `i - size / 2`
/// rows and `j - size / 2` columns away from the centre.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f64>,
}

impl Kernel {
    /// Creates a kernel from row-major weights.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidInput` - `size` is even or zero, `weights.len() != size * size`,
    ///   or a weight is not finite
    pub fn new(size: usize, weights: Vec<f64>) -> Result<Self> {
        if size == 0 || size % 2 == 0 {
            return Err(Error::invalid(format!(
                "kernel size must be odd and positive, got {size}"
            )));
        }
        if weights.len() != size * size {
            return Err(Error::invalid(format!(
                "kernel of size {size} needs {} weights, got {}",
                size * size,
                weights.len()
            )));
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(Error::invalid("kernel weights must be finite"));
        }
        Ok(Self { size, weights })
    }

    /// 3x3 Gaussian blur, `[[1, 2, 1], [2, 4, 2], [1, 2, 1]] / 16`.
    pub fn blur() -> Self {
        let weights = [1.0, 2.0, 1.0, 2.0, 4.0, 2.0, 1.0, 2.0, 1.0]
            .iter()
            .map(|w| w / 16.0)
            .collect();
        Self { size: 3, weights }
    }

    /// 5x5 sharpen: centre `1`, the eight cells around it `0.25`, outer ring `-0.125`.
    pub fn sharpen() -> Self {
        let weights = iproduct!(0..5_i32, 0..5_i32)
            .map(|(i, j)| match (i - 2).abs().max((j - 2).abs()) {
                0 => 1.0,
                1 => 0.25,
                _ => -0.125,
            })
            .collect();
        Self { size: 5, weights }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn weight(&self, i: usize, j: usize) -> f64 {
        self.weights[i * self.size + j]
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }
}

/// Neighbourhood filtering with a square kernel.
///
/// Every channel is filtered independently. Cells of the neighbourhood that fall
/// outside the image contribute zero, so borders darken for kernels with positive
/// weights.
pub trait ConvolveExt {
    /// Convolves every channel with `kernel`.
    ///
    /// # Examples
    ///
    /// ```
    /// use imageops_classic::{ConvolveExt, Kernel, PixelBuffer};
    ///
    /// # fn example() -> Result<(), imageops_classic::Error> {
    /// let buffer = PixelBuffer::from_pixel(5, 5, [80, 80, 80])?;
    /// let identity = Kernel::new(3, vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0])?;
    /// assert_eq!(buffer.convolve(&identity), buffer);
    /// # Ok(())
    /// # }
    /// # example().unwrap();
    /// ```
    fn convolve(&self, kernel: &Kernel) -> PixelBuffer;

    fn blur(&self) -> PixelBuffer {
        self.convolve(&Kernel::blur())
    }

    fn sharpen(&self) -> PixelBuffer {
        self.convolve(&Kernel::sharpen())
    }
}

impl ConvolveExt for PixelBuffer {
    fn convolve(&self, kernel: &Kernel) -> PixelBuffer {
        let (width, height) = self.dimensions();
        let size = kernel.size();
        log::debug!("convolving {width}x{height} buffer with {size}x{size} kernel");

        let source = self.as_rgb_image();
        let mut output = RgbImage::new(width, height);
        let row_len = width as usize * CHANNELS;
        let samples: &mut [u8] = &mut output;

        #[cfg(feature = "rayon")]
        samples
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(row, out)| convolve_row(source, kernel, row as u32, out));

        #[cfg(not(feature = "rayon"))]
        samples
            .chunks_mut(row_len)
            .enumerate()
            .for_each(|(row, out)| convolve_row(source, kernel, row as u32, out));

        PixelBuffer::from_derived(output)
    }
}

/// Filters one output row into `out` (interleaved RGB).
fn convolve_row(source: &RgbImage, kernel: &Kernel, row: u32, out: &mut [u8]) {
    let (width, height) = (i64::from(source.width()), i64::from(source.height()));
    let center = (kernel.size() / 2) as i64;

    for (column, pixel_out) in out.chunks_exact_mut(CHANNELS).enumerate() {
        let mut sums = [0.0_f64; CHANNELS];
        for (i, j) in iproduct!(0..kernel.size(), 0..kernel.size()) {
            let y = i64::from(row) - center + i as i64;
            let x = column as i64 - center + j as i64;
            if x < 0 || y < 0 || x >= width || y >= height {
                continue;
            }
            let weight = kernel.weight(i, j);
            let pixel = source.get_pixel(x as u32, y as u32);
            for (sum, &value) in sums.iter_mut().zip(pixel.0.iter()) {
                *sum += weight * f64::from(value);
            }
        }
        for (value, sum) in pixel_out.iter_mut().zip(sums) {
            *value = clamp_to_channel(sum);
        }
    }
}

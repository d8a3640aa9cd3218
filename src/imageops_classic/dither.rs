use image::{Rgb, RgbImage};

use crate::imageops_classic::color_transform::ColorTransformExt;
use crate::imageops_classic::pixel_buffer::PixelBuffer;
use crate::utils::clamp_to_channel;

/// Values above this become white, the rest black.
const THRESHOLD: u8 = 127;

/// Error diffusion targets as `(dx, dy, weight)`, applied in this order.
const DIFFUSION: [(i64, i64, f64); 4] = [
    (1, 0, 5.0 / 16.0),
    (1, -1, 3.0 / 16.0),
    (0, 1, 7.0 / 16.0),
    (1, 1, 1.0 / 16.0),
];

/// Floyd-Steinberg dithering to pure black and white.
pub trait DitherExt {
    /// Converts the image to greyscale and quantizes every pixel to `0` or `255`,
    /// diffusing the quantization error onto neighbours that have not been visited yet.
    ///
    /// Pixels are visited column by column (`x` outer, `y` inner), which makes every
    /// diffusion target one that is still ahead of the scan. The output is achromatic.
    ///
    /// # Examples
    ///
    /// ```
    /// use imageops_classic::{DitherExt, PixelBuffer};
    ///
    /// # fn example() -> Result<(), imageops_classic::Error> {
    /// let buffer = PixelBuffer::from_pixel(8, 8, [128, 128, 128])?;
    /// let dithered = buffer.dither();
    /// assert!(dithered.to_raw().iter().all(|&v| v == 0 || v == 255));
    /// # Ok(())
    /// # }
    /// # example().unwrap();
    /// ```
    fn dither(&self) -> PixelBuffer;
}

impl DitherExt for PixelBuffer {
    fn dither(&self) -> PixelBuffer {
        let (width, height) = self.dimensions();
        log::debug!("dithering {width}x{height} buffer");

        // greyscale output is achromatic, so the red channel carries the luminance
        let grey = self.greyscale();
        let mut levels: Vec<u8> = grey.as_rgb_image().pixels().map(|p| p[0]).collect();
        diffuse(&mut levels, width as usize, height as usize);

        let image = RgbImage::from_fn(width, height, |x, y| {
            let level = levels[y as usize * width as usize + x as usize];
            Rgb([level; 3])
        });
        PixelBuffer::from_derived(image)
    }
}

/// Quantizes `levels` (row-major, `width * height`) in place.
fn diffuse(levels: &mut [u8], width: usize, height: usize) {
    let (w, h) = (width as i64, height as i64);
    for x in 0..w {
        for y in 0..h {
            let index = (y * w + x) as usize;
            let old = levels[index];
            let new = if old > THRESHOLD { u8::MAX } else { 0 };
            levels[index] = new;

            let error = f64::from(old) - f64::from(new);
            for &(dx, dy, weight) in &DIFFUSION {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= w || ny >= h {
                    continue;
                }
                let target = &mut levels[(ny * w + nx) as usize];
                *target = clamp_to_channel(weight * error + f64::from(*target));
            }
        }
    }
}

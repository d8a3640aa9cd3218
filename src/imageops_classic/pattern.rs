use image::{Rgb, RgbImage};
use itertools::iproduct;

use crate::error::{Error, Result};
use crate::imageops_classic::pixel_buffer::PixelBuffer;
use crate::utils::{validate_multiple_of, validate_non_empty_image};

pub const RED: [u8; 3] = [255, 0, 0];
pub const WHITE: [u8; 3] = [255, 255, 255];
pub const BLUE: [u8; 3] = [0, 0, 255];
pub const BLACK: [u8; 3] = [0, 0, 0];

/// Violet, indigo, blue, green, yellow, orange, red.
pub const RAINBOW: [[u8; 3]; 7] = [
    [148, 0, 211],
    [75, 0, 130],
    [0, 0, 255],
    [0, 255, 0],
    [255, 255, 0],
    [255, 140, 0],
    [255, 0, 0],
];

/// Columns of the Greek flag's 27-cell grid that are blue in the cross stripes.
const GREECE_CROSS_BLUE: [u32; 8] = [0, 1, 2, 3, 6, 7, 8, 9];

/// Procedurally generated images.
///
/// Every variant validates its size parameters and fails with
/// `Error::InvalidInput` when one is zero or breaks a divisibility rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// 8x8 black and white board with a white top-left square.
    /// Output is `8 * square_size` on each side.
    Checkerboard { square_size: u32 },
    /// Seven bands stacked top to bottom, each `stripe_height` tall.
    HorizontalRainbow { stripe_height: u32, image_width: u32 },
    /// Seven bands left to right, each `stripe_width` wide.
    VerticalRainbow { stripe_width: u32, image_height: u32 },
    /// Blue, white and red vertical bands. `length` must be a multiple of 3.
    FranceFlag { length: u32 },
    /// Square red flag with a white cross. `size` must be a multiple of 5.
    SwissFlag { size: u32 },
    /// Nine stripes with the cross canton. `length` must be a multiple of 27.
    GreeceFlag { length: u32 },
}

impl Pattern {
    /// `(width, height)` of the generated image, after validating the parameters.
    pub fn dimensions(&self) -> Result<(u32, u32)> {
        let dimensions = match *self {
            Self::Checkerboard { square_size } => {
                let side = scaled(square_size, 8, "checkerboard")?;
                (side, side)
            }
            Self::HorizontalRainbow {
                stripe_height,
                image_width,
            } => (image_width, scaled(stripe_height, 7, "horizontal rainbow")?),
            Self::VerticalRainbow {
                stripe_width,
                image_height,
            } => (scaled(stripe_width, 7, "vertical rainbow")?, image_height),
            Self::FranceFlag { length } => {
                validate_multiple_of(length, 3, "France flag")?;
                (length, length / 3 * 2)
            }
            Self::SwissFlag { size } => {
                validate_multiple_of(size, 5, "Swiss flag")?;
                (size, size)
            }
            Self::GreeceFlag { length } => {
                validate_multiple_of(length, 27, "Greece flag")?;
                (length, length / 3 * 2)
            }
        };
        validate_non_empty_image(dimensions.0, dimensions.1, self.name())?;
        Ok(dimensions)
    }

    /// Renders the pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use imageops_classic::Pattern;
    ///
    /// # fn example() -> Result<(), imageops_classic::Error> {
    /// let flag = Pattern::FranceFlag { length: 30 }.generate()?;
    /// assert_eq!(flag.dimensions(), (30, 20));
    /// assert_eq!(flag.pixel(0, 0)?, [0, 0, 255]);
    /// assert!(Pattern::SwissFlag { size: 7 }.generate().is_err());
    /// # Ok(())
    /// # }
    /// # example().unwrap();
    /// ```
    pub fn generate(&self) -> Result<PixelBuffer> {
        let (width, height) = self.dimensions()?;
        log::debug!("generating {} ({width}x{height})", self.name());
        let mut canvas = Canvas::new(width, height);

        match *self {
            Self::Checkerboard { square_size } => checkerboard(&mut canvas, square_size)?,
            Self::HorizontalRainbow {
                stripe_height,
                image_width,
            } => {
                for (band, color) in RAINBOW.iter().enumerate() {
                    let patch = Patch::new(image_width, stripe_height, *color)?;
                    canvas.stamp(&patch, 0, band as u32 * stripe_height)?;
                }
            }
            Self::VerticalRainbow {
                stripe_width,
                image_height,
            } => {
                for (band, color) in RAINBOW.iter().enumerate() {
                    let patch = Patch::new(stripe_width, image_height, *color)?;
                    canvas.stamp(&patch, band as u32 * stripe_width, 0)?;
                }
            }
            Self::FranceFlag { .. } => {
                let band = width / 3;
                for (index, color) in [BLUE, WHITE, RED].into_iter().enumerate() {
                    canvas.stamp(&Patch::new(band, height, color)?, index as u32 * band, 0)?;
                }
            }
            Self::SwissFlag { size } => swiss_flag(&mut canvas, size / 5)?,
            Self::GreeceFlag { length } => greece_flag(&mut canvas, length / 27, height / 9)?,
        }

        Ok(canvas.finish())
    }

    /// Human-readable name, used in error messages and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Checkerboard { .. } => "checkerboard",
            Self::HorizontalRainbow { .. } => "horizontal rainbow",
            Self::VerticalRainbow { .. } => "vertical rainbow",
            Self::FranceFlag { .. } => "France flag",
            Self::SwissFlag { .. } => "Swiss flag",
            Self::GreeceFlag { .. } => "Greece flag",
        }
    }
}

fn scaled(value: u32, factor: u32, context: &str) -> Result<u32> {
    value
        .checked_mul(factor)
        .ok_or_else(|| Error::invalid(format!("{context}: size {value} is too large")))
}

/// Solid-colour rectangle used as the stamping unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Patch {
    width: u32,
    height: u32,
    color: [u8; 3],
}

impl Patch {
    fn new(width: u32, height: u32, color: [u8; 3]) -> Result<Self> {
        validate_non_empty_image(width, height, "patch")?;
        Ok(Self {
            width,
            height,
            color,
        })
    }
}

/// Image under construction. Only ever owned by a single `generate` call.
struct Canvas {
    image: RgbImage,
}

impl Canvas {
    fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::new(width, height),
        }
    }

    /// Writes `patch` over `[x, x + patch.width) x [y, y + patch.height)`,
    /// replacing whatever was there.
    fn stamp(&mut self, patch: &Patch, x: u32, y: u32) -> Result<()> {
        let x_end = x.checked_add(patch.width);
        let y_end = y.checked_add(patch.height);
        let (x_end, y_end) = match (x_end, y_end) {
            (Some(x_end), Some(y_end))
                if x_end <= self.image.width() && y_end <= self.image.height() =>
            {
                (x_end, y_end)
            }
            _ => {
                return Err(Error::invalid(format!(
                    "{}x{} patch at ({x}, {y}) does not fit a {}x{} canvas",
                    patch.width,
                    patch.height,
                    self.image.width(),
                    self.image.height()
                )))
            }
        };
        for (py, px) in iproduct!(y..y_end, x..x_end) {
            self.image.put_pixel(px, py, Rgb(patch.color));
        }
        Ok(())
    }

    fn finish(self) -> PixelBuffer {
        PixelBuffer::from_derived(self.image)
    }
}

fn checkerboard(canvas: &mut Canvas, square_size: u32) -> Result<()> {
    for (row, column) in iproduct!(0..8_u32, 0..8_u32) {
        let color = if (row + column) % 2 == 0 { WHITE } else { BLACK };
        let patch = Patch::new(square_size, square_size, color)?;
        canvas.stamp(&patch, column * square_size, row * square_size)?;
    }
    Ok(())
}

fn swiss_flag(canvas: &mut Canvas, cell: u32) -> Result<()> {
    for (row, column) in iproduct!(0..5_u32, 0..5_u32) {
        let in_cross = matches!((row, column), (1, 2) | (2, 1) | (2, 2) | (2, 3) | (3, 2));
        let color = if in_cross { WHITE } else { RED };
        canvas.stamp(&Patch::new(cell, cell, color)?, column * cell, row * cell)?;
    }
    Ok(())
}

fn greece_flag(canvas: &mut Canvas, cell_width: u32, stripe_height: u32) -> Result<()> {
    for stripe in 0..9_u32 {
        let y = stripe * stripe_height;
        if stripe < 5 {
            for cell in 0..27 {
                let color = greece_cross_color(stripe, cell);
                let patch = Patch::new(cell_width, stripe_height, color)?;
                canvas.stamp(&patch, cell * cell_width, y)?;
            }
        } else {
            let color = if stripe % 2 == 0 { BLUE } else { WHITE };
            let patch = Patch::new(cell_width * 27, stripe_height, color)?;
            canvas.stamp(&patch, 0, y)?;
        }
    }
    Ok(())
}

/// Colour of one of the 27 cells in the five stripes that carry the cross.
fn greece_cross_color(stripe: u32, cell: u32) -> [u8; 3] {
    match stripe {
        0 | 4 if cell == 4 || cell == 5 => WHITE,
        0 | 4 => BLUE,
        1 | 3 if GREECE_CROSS_BLUE.contains(&cell) => BLUE,
        1 | 3 => WHITE,
        _ if cell < 10 => WHITE,
        _ => BLUE,
    }
}

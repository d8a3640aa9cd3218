use image::{ImageBuffer, Rgb, RgbImage};

use crate::error::{Error, Result};
use crate::utils::validate_non_empty_image;

/// Number of colour channels in every buffer (red, green, blue).
pub const CHANNELS: usize = 3;

/// Immutable three-channel raster.
///
/// Columns run along the width (`x`) and rows along the height (`y`). Channel `0`
/// is red, `1` green and `2` blue. Every operation in this crate returns a new
/// buffer; there is no way to mutate one after construction.
///
/// # Examples
///
/// ```
/// use imageops_classic::PixelBuffer;
///
/// # fn example() -> Result<(), imageops_classic::Error> {
/// let buffer = PixelBuffer::from_pixel(4, 2, [10, 20, 30])?;
/// assert_eq!(buffer.dimensions(), (4, 2));
/// assert_eq!(buffer.get(2, 3, 1)?, 30);
/// assert!(buffer.get(0, 4, 0).is_err());
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    image: RgbImage,
}

impl PixelBuffer {
    /// Builds a buffer by calling `f(column, row)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> [u8; 3],
    {
        validate_non_empty_image(width, height, "PixelBuffer::from_fn")?;
        let image = ImageBuffer::from_fn(width, height, |x, y| Rgb(f(x, y)));
        Ok(Self { image })
    }

    /// Builds a buffer filled with a single colour.
    pub fn from_pixel(width: u32, height: u32, color: [u8; 3]) -> Result<Self> {
        validate_non_empty_image(width, height, "PixelBuffer::from_pixel")?;
        Ok(Self {
            image: ImageBuffer::from_pixel(width, height, Rgb(color)),
        })
    }

    /// Builds a buffer from interleaved RGB samples in row-major order.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidInput` - zero dimensions or `data.len() != 3 * width * height`
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        validate_non_empty_image(width, height, "PixelBuffer::from_raw")?;
        let expected = CHANNELS * width as usize * height as usize;
        let actual = data.len();
        let mismatch = || {
            Error::invalid(format!(
                "PixelBuffer::from_raw: expected {expected} samples, got {actual}"
            ))
        };
        // `ImageBuffer::from_raw` accepts oversized buffers
        if actual != expected {
            return Err(mismatch());
        }
        ImageBuffer::from_raw(width, height, data)
            .map(|image| Self { image })
            .ok_or_else(mismatch)
    }

    /// Builds a buffer from planar data laid out as `channel -> column -> row`.
    ///
    /// All three planes must have the same number of columns, and every column
    /// the same number of rows.
    pub fn from_planes(planes: &[Vec<Vec<u8>>; CHANNELS]) -> Result<Self> {
        let width = planes[0].len();
        let height = planes[0].first().map_or(0, Vec::len);
        let consistent = planes
            .iter()
            .all(|plane| plane.len() == width && plane.iter().all(|column| column.len() == height));
        if !consistent {
            return Err(Error::invalid(
                "PixelBuffer::from_planes: channel planes have different extents",
            ));
        }
        let width = u32::try_from(width)
            .map_err(|_| Error::invalid("PixelBuffer::from_planes: width too large"))?;
        let height = u32::try_from(height)
            .map_err(|_| Error::invalid("PixelBuffer::from_planes: height too large"))?;
        Self::from_fn(width, height, |x, y| {
            let (x, y) = (x as usize, y as usize);
            [planes[0][x][y], planes[1][x][y], planes[2][x][y]]
        })
    }

    /// Wraps an image produced by an operation on an existing buffer, whose
    /// dimensions are already known to be non-zero.
    pub(crate) fn from_derived(image: RgbImage) -> Self {
        debug_assert!(image.width() > 0 && image.height() > 0);
        Self { image }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// `(width, height)`
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Value of one channel at `(column, row)`.
    ///
    /// # Errors
    ///
    /// * `Error::OutOfRange` - `channel > 2`, `column >= width` or `row >= height`
    pub fn get(&self, channel: usize, column: u32, row: u32) -> Result<u8> {
        if channel >= CHANNELS || column >= self.width() || row >= self.height() {
            return Err(self.out_of_range(channel, column, row));
        }
        Ok(self.image.get_pixel(column, row)[channel])
    }

    /// All three channels at `(column, row)`.
    pub fn pixel(&self, column: u32, row: u32) -> Result<[u8; 3]> {
        self.image
            .get_pixel_checked(column, row)
            .map(|pixel| pixel.0)
            .ok_or_else(|| self.out_of_range(0, column, row))
    }

    /// Borrow the underlying `image` buffer, e.g. for encoding.
    #[inline]
    pub fn as_rgb_image(&self) -> &RgbImage {
        &self.image
    }

    #[inline]
    pub fn into_rgb_image(self) -> RgbImage {
        self.image
    }

    /// Interleaved RGB samples in row-major order.
    pub fn to_raw(&self) -> Vec<u8> {
        self.image.as_raw().clone()
    }

    /// Whether every pixel has equal red, green and blue values.
    pub fn is_achromatic(&self) -> bool {
        self.image
            .pixels()
            .all(|Rgb([r, g, b])| r == g && g == b)
    }

    fn out_of_range(&self, channel: usize, column: u32, row: u32) -> Error {
        Error::OutOfRange {
            channel,
            column,
            row,
            width: self.width(),
            height: self.height(),
        }
    }
}

impl TryFrom<RgbImage> for PixelBuffer {
    type Error = Error;

    fn try_from(image: RgbImage) -> Result<Self> {
        validate_non_empty_image(image.width(), image.height(), "PixelBuffer::try_from")?;
        Ok(Self { image })
    }
}

impl From<PixelBuffer> for RgbImage {
    fn from(buffer: PixelBuffer) -> Self {
        buffer.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_buffer;

    #[test]
    fn test_get_returns_channel_values() {
        let buffer = create_test_buffer();
        assert_eq!(buffer.get(0, 0, 0).unwrap(), 200);
        assert_eq!(buffer.get(1, 1, 0).unwrap(), 200);
        assert_eq!(buffer.get(2, 0, 1).unwrap(), 200);
        assert_eq!(buffer.pixel(1, 1).unwrap(), [50, 75, 25]);
    }

    #[test]
    fn test_get_rejects_out_of_range_coordinates() {
        let buffer = create_test_buffer();
        assert!(matches!(
            buffer.get(3, 0, 0),
            Err(Error::OutOfRange { channel: 3, .. })
        ));
        // column == width is outside the buffer
        assert!(matches!(
            buffer.get(0, 2, 0),
            Err(Error::OutOfRange { column: 2, .. })
        ));
        assert!(matches!(
            buffer.get(0, 0, 2),
            Err(Error::OutOfRange { row: 2, .. })
        ));
        assert!(buffer.pixel(2, 2).is_err());
    }

    #[test]
    fn test_zero_dimensions_are_invalid() {
        assert!(matches!(
            PixelBuffer::from_pixel(0, 4, [0, 0, 0]),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            PixelBuffer::from_fn(4, 0, |_, _| [0, 0, 0]),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            PixelBuffer::try_from(RgbImage::new(0, 0)),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_raw_checks_length() {
        assert!(PixelBuffer::from_raw(2, 1, vec![1, 2, 3, 4, 5, 6]).is_ok());
        assert!(matches!(
            PixelBuffer::from_raw(2, 1, vec![1, 2, 3]),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_planes_uses_channel_column_row_order() {
        // 3 columns, 2 rows
        let red = vec![vec![1, 2], vec![3, 4], vec![5, 6]];
        let green = vec![vec![0; 2]; 3];
        let blue = vec![vec![9; 2]; 3];
        let buffer = PixelBuffer::from_planes(&[red, green, blue]).unwrap();
        assert_eq!(buffer.dimensions(), (3, 2));
        assert_eq!(buffer.get(0, 1, 1).unwrap(), 4);
        assert_eq!(buffer.get(0, 2, 0).unwrap(), 5);
        assert_eq!(buffer.pixel(0, 1).unwrap(), [2, 0, 9]);
    }

    #[test]
    fn test_from_planes_rejects_ragged_planes() {
        let red = vec![vec![1, 2], vec![3]];
        let green = vec![vec![0; 2]; 2];
        let blue = vec![vec![0; 2]; 2];
        assert!(PixelBuffer::from_planes(&[red, green, blue]).is_err());
        assert!(PixelBuffer::from_planes(&[vec![], vec![], vec![]]).is_err());
    }

    #[test]
    fn test_rgb_image_round_trip_preserves_pixels() {
        let buffer = create_test_buffer();
        let image: RgbImage = buffer.clone().into();
        assert_eq!(image.get_pixel(1, 0), &Rgb([100, 200, 150]));
        assert_eq!(PixelBuffer::try_from(image).unwrap(), buffer);
    }
}

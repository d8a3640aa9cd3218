use image::{Rgb, RgbImage};
use itertools::iproduct;
use rand::Rng;

use crate::error::{Error, Result};
use crate::imageops_classic::pixel_buffer::{PixelBuffer, CHANNELS};

/// Cluster centre for the mosaic partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed {
    pub row: u32,
    pub column: u32,
}

impl Seed {
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Squared Euclidean distance to `(row, column)`.
    #[inline]
    fn distance_squared(&self, row: u32, column: u32) -> u64 {
        let dr = i64::from(self.row) - i64::from(row);
        let dc = i64::from(self.column) - i64::from(column);
        (dr * dr + dc * dc) as u64
    }
}

/// Draws `count` seeds uniformly over a `width x height` image. Seeds may coincide.
pub fn random_seeds<R>(width: u32, height: u32, count: usize, rng: &mut R) -> Vec<Seed>
where
    R: Rng + ?Sized,
{
    (0..count)
        .map(|_| {
            let row = rng.gen_range(0..height);
            let column = rng.gen_range(0..width);
            Seed::new(row, column)
        })
        .collect()
}

/// Voronoi mosaic: every pixel takes the average colour of the region around its
/// nearest seed.
pub trait MosaicExt {
    /// Builds a mosaic from `seeds` randomly placed cluster centres.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidInput` - `seeds == 0`
    ///
    /// # Examples
    ///
    /// ```
    /// use imageops_classic::{MosaicExt, PixelBuffer};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// # fn example() -> Result<(), imageops_classic::Error> {
    /// let buffer = PixelBuffer::from_fn(16, 16, |x, y| [(x * 16) as u8, (y * 16) as u8, 0])?;
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let tiles = buffer.mosaic(10, &mut rng)?;
    /// assert_eq!(tiles.dimensions(), (16, 16));
    /// # Ok(())
    /// # }
    /// # example().unwrap();
    /// ```
    fn mosaic<R>(&self, seeds: usize, rng: &mut R) -> Result<PixelBuffer>
    where
        R: Rng + ?Sized;

    /// Builds a mosaic around explicit cluster centres.
    ///
    /// Each pixel joins the seed with the smallest Euclidean distance; on a tie the
    /// seed listed first wins. Cluster colours are the truncated per-channel mean of
    /// their members.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidInput` - `seeds` is empty or a seed lies outside the image
    fn mosaic_with_seeds(&self, seeds: &[Seed]) -> Result<PixelBuffer>;
}

impl MosaicExt for PixelBuffer {
    fn mosaic<R>(&self, seeds: usize, rng: &mut R) -> Result<PixelBuffer>
    where
        R: Rng + ?Sized,
    {
        if seeds == 0 {
            return Err(Error::invalid("mosaic needs at least one seed"));
        }
        let seeds = random_seeds(self.width(), self.height(), seeds, rng);
        self.mosaic_with_seeds(&seeds)
    }

    fn mosaic_with_seeds(&self, seeds: &[Seed]) -> Result<PixelBuffer> {
        let (width, height) = self.dimensions();
        if seeds.is_empty() {
            return Err(Error::invalid("mosaic needs at least one seed"));
        }
        if let Some(seed) = seeds
            .iter()
            .find(|seed| seed.row >= height || seed.column >= width)
        {
            return Err(Error::invalid(format!(
                "seed at row {}, column {} lies outside the {width}x{height} image",
                seed.row, seed.column
            )));
        }
        log::debug!(
            "mosaic of {width}x{height} buffer with {} seeds",
            seeds.len()
        );

        let labels = assign_clusters(width, height, seeds);
        let colors = cluster_means(self.as_rgb_image(), &labels, seeds.len());

        let image = RgbImage::from_fn(width, height, |x, y| {
            Rgb(colors[labels[y as usize * width as usize + x as usize]])
        });
        Ok(PixelBuffer::from_derived(image))
    }
}

/// Index of the nearest seed for every pixel, row-major.
fn assign_clusters(width: u32, height: u32, seeds: &[Seed]) -> Vec<usize> {
    iproduct!(0..height, 0..width)
        .map(|(row, column)| {
            let mut best = 0;
            let mut best_distance = u64::MAX;
            for (index, seed) in seeds.iter().enumerate() {
                let distance = seed.distance_squared(row, column);
                if distance < best_distance {
                    best_distance = distance;
                    best = index;
                }
            }
            best
        })
        .collect()
}

/// Truncated mean colour of each cluster. Empty clusters stay black; no pixel refers
/// to them.
fn cluster_means(image: &RgbImage, labels: &[usize], clusters: usize) -> Vec<[u8; 3]> {
    let mut sums = vec![[0_u64; CHANNELS]; clusters];
    let mut counts = vec![0_u64; clusters];
    for (pixel, &label) in image.pixels().zip(labels) {
        counts[label] += 1;
        for (sum, &value) in sums[label].iter_mut().zip(pixel.0.iter()) {
            *sum += u64::from(value);
        }
    }

    sums.iter()
        .zip(&counts)
        .map(|(&sum, &count)| match count {
            0 => [0; CHANNELS],
            count => sum.map(|s| (s / count) as u8),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_buffer;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_zero_seeds_is_invalid() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            create_test_buffer().mosaic(0, &mut rng),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            create_test_buffer().mosaic_with_seeds(&[]),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_seed_outside_image_is_invalid() {
        let result = create_test_buffer().mosaic_with_seeds(&[Seed::new(2, 0)]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_single_seed_averages_everything() {
        let mut rng = StdRng::seed_from_u64(42);
        let result = create_test_buffer().mosaic(1, &mut rng).unwrap();
        // red (200 + 100 + 150 + 50) / 4, green (150 + 200 + 100 + 75) / 4 = 131.25,
        // blue (100 + 150 + 200 + 25) / 4 = 118.75
        let expected = [125, 131, 118];
        for (x, y) in iproduct!(0..2, 0..2) {
            assert_eq!(result.pixel(x, y).unwrap(), expected);
        }
    }

    #[test]
    fn test_pixels_join_nearest_seed() {
        // 4x1 strip, seeds at the two ends
        let buffer =
            PixelBuffer::from_fn(4, 1, |x, _| [(x * 10) as u8, 0, 0]).unwrap();
        let result = buffer
            .mosaic_with_seeds(&[Seed::new(0, 0), Seed::new(0, 3)])
            .unwrap();
        // columns 0 and 1 -> (0 + 10) / 2, columns 2 and 3 -> (20 + 30) / 2
        assert_eq!(result.get(0, 0, 0).unwrap(), 5);
        assert_eq!(result.get(0, 1, 0).unwrap(), 5);
        assert_eq!(result.get(0, 2, 0).unwrap(), 25);
        assert_eq!(result.get(0, 3, 0).unwrap(), 25);
    }

    #[test]
    fn test_ties_go_to_the_first_seed() {
        // column 1 is equidistant from both seeds
        let buffer =
            PixelBuffer::from_fn(3, 1, |x, _| [(x * 30) as u8, 0, 0]).unwrap();
        let result = buffer
            .mosaic_with_seeds(&[Seed::new(0, 0), Seed::new(0, 2)])
            .unwrap();
        assert_eq!(result.get(0, 0, 0).unwrap(), 15);
        assert_eq!(result.get(0, 1, 0).unwrap(), 15);
        assert_eq!(result.get(0, 2, 0).unwrap(), 60);
    }

    #[test]
    fn test_duplicate_seeds_leave_empty_cluster() {
        let seeds = [Seed::new(0, 0), Seed::new(0, 0), Seed::new(1, 1)];
        let labels = assign_clusters(2, 2, &seeds);
        assert!(!labels.contains(&1));
        let result = create_test_buffer().mosaic_with_seeds(&seeds).unwrap();
        assert_eq!(result.pixel(1, 1).unwrap(), [50, 75, 25]);
    }

    #[test]
    fn test_random_seeds_are_reproducible_and_in_bounds() {
        let first = random_seeds(5, 3, 20, &mut StdRng::seed_from_u64(9));
        let second = random_seeds(5, 3, 20, &mut StdRng::seed_from_u64(9));
        assert_eq!(first, second);
        assert!(first.iter().all(|s| s.row < 3 && s.column < 5));
    }
}

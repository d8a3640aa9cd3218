use rand::Rng;

use crate::error::{Error, Result};
use crate::imageops_classic::color_transform::{ColorMatrix, ColorTransformExt};
use crate::imageops_classic::convolution::{ConvolveExt, Kernel};
use crate::imageops_classic::dither::DitherExt;
use crate::imageops_classic::mosaic::MosaicExt;
use crate::imageops_classic::pattern::Pattern;
use crate::imageops_classic::pixel_buffer::PixelBuffer;

/// One step of an image-processing session, with its parameters already parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Greyscale,
    Sepia,
    Transform(ColorMatrix),
    Blur,
    Sharpen,
    Convolve(Kernel),
    Dither,
    Mosaic { seeds: usize },
    /// Replaces the current image with a generated one.
    Generate(Pattern),
}

impl Operation {
    /// Whether the operation reads the current image.
    pub fn needs_image(&self) -> bool {
        !matches!(self, Self::Generate(_))
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Greyscale => "greyscale",
            Self::Sepia => "sepia",
            Self::Transform(_) => "transform",
            Self::Blur => "blur",
            Self::Sharpen => "sharpen",
            Self::Convolve(_) => "convolve",
            Self::Dither => "dither",
            Self::Mosaic { .. } => "mosaic",
            Self::Generate(_) => "generate",
        }
    }

    /// Runs the operation against `image`.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidInput` - `image` is `None` for an operation that reads it,
    ///   or a parameter is invalid
    pub fn apply<R>(&self, image: Option<&PixelBuffer>, rng: &mut R) -> Result<PixelBuffer>
    where
        R: Rng + ?Sized,
    {
        if let Self::Generate(pattern) = self {
            return pattern.generate();
        }
        let image = image.ok_or_else(|| {
            Error::invalid(format!("{}: no image to operate on", self.name()))
        })?;
        let result = match self {
            Self::Greyscale => image.greyscale(),
            Self::Sepia => image.sepia(),
            Self::Transform(matrix) => image.transform(matrix),
            Self::Blur => image.blur(),
            Self::Sharpen => image.sharpen(),
            Self::Convolve(kernel) => image.convolve(kernel),
            Self::Dither => image.dither(),
            Self::Mosaic { seeds } => image.mosaic(*seeds, rng)?,
            Self::Generate(pattern) => pattern.generate()?,
        };
        Ok(result)
    }
}

/// Current image of a processing session.
///
/// Applying an operation never changes the model; it returns a new one holding the
/// result. A model starts empty until an image is loaded or generated.
///
/// # Examples
///
/// ```
/// use imageops_classic::{ImageModel, Operation, Pattern};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// # fn example() -> Result<(), imageops_classic::Error> {
/// let mut rng = StdRng::seed_from_u64(0);
/// let model = ImageModel::empty().apply_all(
///     &[
///         Operation::Generate(Pattern::Checkerboard { square_size: 4 }),
///         Operation::Blur,
///         Operation::Dither,
///     ],
///     &mut rng,
/// )?;
/// assert_eq!(model.image()?.dimensions(), (32, 32));
/// assert!(ImageModel::empty().apply(&Operation::Blur, &mut rng).is_err());
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageModel {
    image: Option<PixelBuffer>,
}

impl ImageModel {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(image: PixelBuffer) -> Self {
        Self { image: Some(image) }
    }

    /// The current image.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidInput` - nothing has been loaded or generated yet
    pub fn image(&self) -> Result<&PixelBuffer> {
        self.image
            .as_ref()
            .ok_or_else(|| Error::invalid("image model is empty"))
    }

    pub fn is_empty(&self) -> bool {
        self.image.is_none()
    }

    pub fn into_image(self) -> Option<PixelBuffer> {
        self.image
    }

    /// Applies one operation and returns the resulting model.
    pub fn apply<R>(&self, operation: &Operation, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        log::debug!("applying {}", operation.name());
        operation.apply(self.image.as_ref(), rng).map(Self::new)
    }

    /// Applies `operations` in order, stopping at the first failure.
    pub fn apply_all<R>(&self, operations: &[Operation], rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        operations
            .iter()
            .try_fold(self.clone(), |model, operation| model.apply(operation, rng))
    }
}

impl From<PixelBuffer> for ImageModel {
    fn from(image: PixelBuffer) -> Self {
        Self::new(image)
    }
}

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for every operation in this crate
///
/// Pixel arithmetic never fails: out-of-range sums are clamped to `[0, 255]`.
/// Errors are reserved for bad inputs and bad coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid input provided to the operation
    ///
    /// Returned for a missing image, zero dimensions, a parameter outside its
    /// accepted range, or a size that fails a divisibility constraint.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Pixel access outside the buffer
    #[error(
        "Pixel access out of range: channel {channel}, column {column}, row {row} \
         (image is {width}x{height} with 3 channels)"
    )]
    OutOfRange {
        channel: usize,
        column: u32,
        row: u32,
        width: u32,
        height: u32,
    },

    /// Unknown image format tag
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Failure reported by the `image` crate while decoding or encoding
    #[error("Codec error: {0}")]
    Codec(String),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

impl From<image::ImageError> for Error {
    fn from(error: image::ImageError) -> Self {
        Self::Codec(error.to_string())
    }
}

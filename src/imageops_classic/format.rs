//! File boundary: format tags plus thin load/save helpers over the `image` crate.
//!
//! Decoding and encoding are delegated entirely to `image`. Which formats actually
//! work depends on the enabled codecs (see the `codecs` feature); a missing codec
//! surfaces as `Error::Codec`.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::imageops_classic::pixel_buffer::PixelBuffer;

/// Formats a buffer can be saved as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Jpg,
    Png,
    Bmp,
    Gif,
    Webp,
}

impl ImageFormat {
    pub const ALL: [Self; 5] = [Self::Jpg, Self::Png, Self::Bmp, Self::Gif, Self::Webp];

    /// Canonical file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Png => "png",
            Self::Bmp => "bmp",
            Self::Gif => "gif",
            Self::Webp => "webp",
        }
    }

    /// Infers the format from a path's extension.
    ///
    /// # Errors
    ///
    /// * `Error::UnsupportedFormat` - no extension, or one not in [`ImageFormat::ALL`]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        path.extension()
            .and_then(|extension| extension.to_str())
            .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))?
            .parse()
    }
}

impl FromStr for ImageFormat {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpg),
            "png" => Ok(Self::Png),
            "bmp" => Ok(Self::Bmp),
            "gif" => Ok(Self::Gif),
            "webp" => Ok(Self::Webp),
            _ => Err(Error::UnsupportedFormat(tag.to_string())),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Jpg => Self::Jpeg,
            ImageFormat::Png => Self::Png,
            ImageFormat::Bmp => Self::Bmp,
            ImageFormat::Gif => Self::Gif,
            ImageFormat::Webp => Self::WebP,
        }
    }
}

/// Decodes an image file into a buffer, dropping any alpha channel.
pub fn load(path: impl AsRef<Path>) -> Result<PixelBuffer> {
    let path = path.as_ref();
    let image = image::open(path)?.to_rgb8();
    log::debug!(
        "loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    PixelBuffer::try_from(image)
}

/// Encodes `buffer` to `path` in the given format.
pub fn save(buffer: &PixelBuffer, path: impl AsRef<Path>, format: ImageFormat) -> Result<()> {
    let path = path.as_ref();
    log::debug!("saving {} as {format}", path.display());
    buffer
        .as_rgb_image()
        .save_with_format(path, format.into())
        .map_err(Error::from)
}

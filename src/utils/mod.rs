//! Internal utility functions for imageops-classic.
//!
//! This module contains the clamp and validation helpers shared by every operation.

use imageproc::definitions::Clamp;

use crate::error::{Error, Result};

/// Tolerance applied before truncation so that sums which are an exact integer in
/// real arithmetic do not drop by one because of floating-point rounding.
const SNAP_TOLERANCE: f64 = 1e-6;

/// Truncates a real value toward zero and bounds it into `[0, 255]`.
///
/// # Arguments
///
/// * `value` - The weighted sum to store in a channel
///
/// # Returns
///
/// The clamped channel value
#[inline]
pub fn clamp_to_channel(value: f64) -> u8 {
    <u8 as Clamp<f64>>::clamp(value + SNAP_TOLERANCE)
}

/// Validates that an image has non-zero dimensions.
///
/// # Arguments
///
/// * `width` - The width of the image
/// * `height` - The height of the image
/// * `context` - A description of the context for error messages
///
/// # Returns
///
/// `Ok(())` if the dimensions are valid, otherwise an error
pub fn validate_non_empty_image(width: u32, height: u32, context: &str) -> Result<()> {
    if width == 0 || height == 0 {
        Err(Error::invalid(format!(
            "{context}: image dimensions must be non-zero, got {width}x{height}"
        )))
    } else {
        Ok(())
    }
}

/// Validates a generator size parameter: non-zero and a multiple of `divisor`.
pub fn validate_multiple_of(value: u32, divisor: u32, context: &str) -> Result<()> {
    if value == 0 {
        return Err(Error::invalid(format!("{context}: size must be positive")));
    }
    if value % divisor != 0 {
        return Err(Error::invalid(format!(
            "{context}: size {value} must be a multiple of {divisor}"
        )));
    }
    Ok(())
}

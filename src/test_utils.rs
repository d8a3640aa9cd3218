//! Test utilities for imageops-classic
//!
//! This module provides common fixtures for testing image operations.
//! It is only compiled when running tests.

use crate::imageops_classic::pixel_buffer::PixelBuffer;

/// Creates a test buffer with predefined pixel values for testing.
///
/// This function creates a 2x2 buffer with known pixel values at `(column, row)`:
/// - (0,0): [200, 150, 100]
/// - (1,0): [100, 200, 150]
/// - (0,1): [150, 100, 200]
/// - (1,1): [50, 75, 25]
pub fn create_test_buffer() -> PixelBuffer {
    let pixels = [
        [200, 150, 100],
        [100, 200, 150],
        [150, 100, 200],
        [50, 75, 25],
    ];
    PixelBuffer::from_fn(2, 2, |x, y| pixels[(y * 2 + x) as usize])
        .expect("2x2 fixture is non-empty")
}

/// Creates a gradient buffer of the requested size.
///
/// Red grows with the column, green with the row and blue with both.
pub fn create_gradient_buffer(width: u32, height: u32) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, |x, y| {
        [
            (x * 255 / width.saturating_sub(1).max(1)) as u8,
            (y * 255 / height.saturating_sub(1).max(1)) as u8,
            ((x + y) * 255 / (width + height)) as u8,
        ]
    })
    .expect("gradient fixture must be non-empty")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_test_buffer_with_valid_input_creates_buffer() {
        let buffer = create_test_buffer();
        assert_eq!(buffer.dimensions(), (2, 2));
        assert_eq!(buffer.pixel(0, 0).unwrap(), [200, 150, 100]);
        assert_eq!(buffer.pixel(1, 0).unwrap(), [100, 200, 150]);
        assert_eq!(buffer.pixel(0, 1).unwrap(), [150, 100, 200]);
        assert_eq!(buffer.pixel(1, 1).unwrap(), [50, 75, 25]);
    }

    #[test]
    fn create_gradient_buffer_with_valid_input_creates_buffer() {
        let buffer = create_gradient_buffer(10, 4);
        assert_eq!(buffer.dimensions(), (10, 4));
        assert_eq!(buffer.pixel(0, 0).unwrap(), [0, 0, 0]);
        assert_eq!(buffer.get(0, 9, 0).unwrap(), 255);
        assert_eq!(buffer.get(1, 0, 3).unwrap(), 255);
    }
}

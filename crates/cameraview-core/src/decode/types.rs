//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for pixel decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The buffer is empty.
    #[error("Empty image buffer")]
    EmptyInput,

    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// Reasons the orientation tag could not be read from an image header.
///
/// These never fail a decode; they collapse to "no correction".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    /// No EXIF block, or no orientation field inside it.
    #[error("No orientation tag found")]
    NotFound,

    /// The EXIF block exists but could not be parsed.
    #[error("Unparsable EXIF metadata: {0}")]
    Unparsable(String),
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl Orientation {
    /// Strict conversion from a raw tag value; `None` outside 1-8.
    pub fn from_tag(value: u32) -> Option<Self> {
        match value {
            1 => Some(Orientation::Normal),
            2 => Some(Orientation::FlipHorizontal),
            3 => Some(Orientation::Rotate180),
            4 => Some(Orientation::FlipVertical),
            5 => Some(Orientation::Transpose),
            6 => Some(Orientation::Rotate90CW),
            7 => Some(Orientation::Transverse),
            8 => Some(Orientation::Rotate270CW),
            _ => None,
        }
    }
}

/// A decoded image with RGB pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a new DecodedImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a canvas filled with a single colour.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * 3);
        for _ in 0..count {
            pixels.extend_from_slice(&rgb);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a DecodedImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// RGB value at (x, y), or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]])
    }

    /// Whether `pixels` holds exactly three bytes for every pixel.
    pub fn has_rgb_buffer(&self) -> bool {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|count| count.checked_mul(3))
            == Some(self.pixels.len())
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_tag_is_strict() {
        assert_eq!(Orientation::from_tag(1), Some(Orientation::Normal));
        assert_eq!(Orientation::from_tag(6), Some(Orientation::Rotate90CW));
        assert_eq!(Orientation::from_tag(8), Some(Orientation::Rotate270CW));
        assert_eq!(Orientation::from_tag(0), None);
        assert_eq!(Orientation::from_tag(9), None);
    }

    #[test]
    fn test_decoded_image_creation() {
        let pixels = vec![0u8; 100 * 50 * 3];
        let img = DecodedImage::new(100, 50, pixels);

        assert_eq!(img.width, 100);
        assert_eq!(img.height, 50);
        assert!(img.has_rgb_buffer());
        assert!(!img.is_empty());
    }

    #[test]
    fn test_short_buffer_is_detected() {
        let img = DecodedImage {
            width: 4,
            height: 4,
            pixels: vec![0; 12],
        };
        assert!(!img.has_rgb_buffer());
        assert!(DecodedImage::filled(4, 4, [0, 0, 0]).has_rgb_buffer());
    }

    #[test]
    fn test_decoded_image_empty() {
        let img = DecodedImage::new(0, 0, vec![]);
        assert!(img.is_empty());
    }

    #[test]
    fn test_filled_and_pixel_lookup() {
        let img = DecodedImage::filled(3, 2, [10, 20, 30]);
        assert_eq!(img.pixels.len(), 18);
        assert_eq!(img.pixel(2, 1), Some([10, 20, 30]));
        assert_eq!(img.pixel(3, 0), None);
        assert_eq!(img.pixel(0, 2), None);
    }

    #[test]
    fn test_error_display() {
        let err = DecodeError::CorruptedFile("unexpected EOF".to_string());
        assert_eq!(
            err.to_string(),
            "Corrupted or incomplete image file: unexpected EOF"
        );

        let err = MetadataError::NotFound;
        assert_eq!(err.to_string(), "No orientation tag found");
    }
}

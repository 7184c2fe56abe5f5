//! Pixel decoding through the `image` crate.

use std::io::Cursor;

use image::ImageReader;

use super::{DecodeError, DecodedImage};

/// Turns an encoded buffer into RGB pixels.
///
/// The orientation pipeline never decodes pixels itself; it goes through
/// this seam so hosts can plug in a platform codec.
pub trait PixelCodec: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError>;
}

/// Default codec backed by `image::ImageReader` (JPEG and PNG).
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCodec;

impl PixelCodec for ImageCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
        decode_pixels(bytes)
    }
}

/// Decode an image from bytes without applying EXIF orientation.
///
/// # Errors
///
/// Returns `DecodeError::EmptyInput` for an empty buffer,
/// `DecodeError::InvalidFormat` if the format cannot be guessed, and
/// `DecodeError::CorruptedFile` if the decoder fails part-way.
pub fn decode_pixels(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyInput);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    Ok(DecodedImage::from_rgb_image(img.into_rgb8()))
}

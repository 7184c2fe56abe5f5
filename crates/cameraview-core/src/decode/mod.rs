//! Image decoding collaborators for the orientation pipeline.
//!
//! This module provides:
//! - Pixel decoding (JPEG, PNG) through the [`PixelCodec`] seam
//! - EXIF orientation lookup through the [`MetadataReader`] seam
//! - The shared [`DecodedImage`] and [`Orientation`] types
//!
//! Both seams are synchronous and CPU-bound; the async hop lives in
//! [`crate::corrector`].
//!
//! # Examples
//!
//! ```ignore
//! use cameraview_core::decode::{decode_pixels, read_orientation_tag};
//!
//! let jpeg_bytes = std::fs::read("photo.jpg").unwrap();
//! let tag = read_orientation_tag(&jpeg_bytes);
//! let image = decode_pixels(&jpeg_bytes).unwrap();
//! println!("Decoded {}x{} image, orientation {:?}", image.width, image.height, tag);
//! ```

mod codec;
mod metadata;
mod types;

pub use codec::{decode_pixels, ImageCodec, PixelCodec};
pub use metadata::{read_orientation_tag, ExifReader, MetadataReader};
pub use types::{DecodeError, DecodedImage, MetadataError, Orientation};

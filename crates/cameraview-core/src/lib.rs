//! CameraView Core - camera utilities
//!
//! This crate provides the platform-independent utilities of CameraView:
//! camera availability checks, and EXIF-aware decoding that returns
//! correctly oriented pixels, with the work moved off the calling thread.
//!
//! # Usage
//!
//! ```ignore
//! use cameraview_core::OrientationCorrector;
//!
//! let corrector = OrientationCorrector::try_current()?;
//! let image = corrector.submit(jpeg_bytes, Some(0.5))?.await?;
//! println!("Oriented {}x{}", image.width, image.height);
//! ```

pub mod camera;
pub mod config;
pub mod corrector;
pub mod decode;
pub mod orient;
pub mod transform;

#[cfg(test)]
mod test_support;

pub use camera::{has_camera_facing, has_cameras, CameraCatalog, CameraFeature, Facing};
pub use config::CorrectorConfig;
pub use corrector::{DecodeTask, OrientationCorrector};
pub use decode::{DecodeError, DecodedImage, MetadataError, Orientation};
pub use orient::{decode_and_orient, extract_transform, OrientError, ScaleFactor, Transform};
pub use transform::{Affine, InterpolationFilter};

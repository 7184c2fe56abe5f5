//! EXIF-aware orientation correction.
//!
//! The pipeline for one image is:
//! 1. Validate the optional scale factor (the only synchronous failure)
//! 2. Read the EXIF orientation tag, best effort
//! 3. Map it to a [`Transform`] (rotation + flip)
//! 4. Decode pixels through the codec
//! 5. Warp with `scale` then `rotate(rotation_degrees)` into a canvas the
//!    size of the decoded image
//!
//! Mirroring is detected and reported in [`Transform::flip_horizontal`], but
//! only the rotation is applied to pixels.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::CorrectorConfig;
use crate::decode::{
    DecodeError, DecodedImage, ExifReader, ImageCodec, MetadataError, MetadataReader, Orientation,
    PixelCodec,
};
use crate::transform::{warp_affine, Affine};

/// Errors surfaced by decode-and-orient.
///
/// Metadata problems never appear here; they degrade to no correction.
#[derive(Debug, Error)]
pub enum OrientError {
    /// Scale factor outside (0.0, 1.0]. Raised before any work starts.
    #[error("Scale needs to be in (0.0, 1.0], got {scale}")]
    InvalidArgument { scale: f32 },

    /// The codec could not decode the buffer.
    #[error("Decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// The background task panicked or was cancelled by runtime shutdown.
    #[error("Decode worker failed: {0}")]
    Worker(String),

    /// No tokio runtime was available to run background work.
    #[error("No async runtime available")]
    NoRuntime,
}

/// Geometric correction derived from an orientation tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Transform {
    /// Clockwise rotation: 0, 90, 180 or 270.
    pub rotation_degrees: u16,
    /// Whether the tag also asks for a horizontal mirror.
    pub flip_horizontal: bool,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        rotation_degrees: 0,
        flip_horizontal: false,
    };

    pub fn new(rotation_degrees: u16, flip_horizontal: bool) -> Self {
        Self {
            rotation_degrees,
            flip_horizontal,
        }
    }
}

impl From<Orientation> for Transform {
    fn from(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Normal => Transform::new(0, false),
            Orientation::FlipHorizontal => Transform::new(0, true),
            Orientation::Rotate180 => Transform::new(180, false),
            Orientation::FlipVertical => Transform::new(180, true),
            Orientation::Rotate90CW => Transform::new(90, false),
            Orientation::Transpose => Transform::new(90, true),
            Orientation::Rotate270CW => Transform::new(270, false),
            Orientation::Transverse => Transform::new(270, true),
        }
    }
}

/// Map a raw orientation lookup to a transform.
///
/// Missing or unreadable metadata and unknown tag values all yield
/// [`Transform::IDENTITY`].
pub fn extract_transform(metadata: Result<u32, MetadataError>) -> Transform {
    match metadata {
        Ok(tag) => {
            let transform = Orientation::from_tag(tag)
                .map(Transform::from)
                .unwrap_or(Transform::IDENTITY);
            tracing::debug!(
                tag,
                rotation = transform.rotation_degrees,
                flip = transform.flip_horizontal,
                "Derived orientation transform"
            );
            transform
        }
        Err(e) => {
            tracing::debug!(reason = %e, "Orientation metadata unavailable, skipping correction");
            Transform::IDENTITY
        }
    }
}

/// A validated scale factor in (0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ScaleFactor(f32);

impl ScaleFactor {
    pub fn new(value: f32) -> Result<Self, OrientError> {
        if value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(OrientError::InvalidArgument { scale: value })
        }
    }

    /// Validate an optional raw scale.
    pub fn from_option(scale: Option<f32>) -> Result<Option<Self>, OrientError> {
        scale.map(Self::new).transpose()
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

/// Composite matrix: scale first, then rotation.
pub fn orientation_affine(transform: Transform, scale: Option<ScaleFactor>) -> Affine {
    let mut matrix = Affine::IDENTITY;
    if let Some(scale) = scale {
        let s = scale.get() as f64;
        matrix = Affine::scale(s, s);
    }
    if transform.rotation_degrees != 0 {
        matrix = matrix.then(&Affine::rotate(transform.rotation_degrees as f64));
    }
    matrix
}

/// Decode `source` and correct its orientation using the default codec,
/// EXIF reader and configuration.
///
/// Runs on the calling thread; see [`crate::OrientationCorrector::submit`]
/// for the background variant.
///
/// # Errors
///
/// Returns `OrientError::InvalidArgument` if `scale` is outside (0.0, 1.0],
/// and `OrientError::Decode` if the buffer cannot be decoded.
pub fn decode_and_orient(source: &[u8], scale: Option<f32>) -> Result<DecodedImage, OrientError> {
    let scale = ScaleFactor::from_option(scale)?;
    orient_with(
        source,
        scale,
        &ImageCodec,
        &ExifReader,
        &CorrectorConfig::default(),
    )
}

/// The decode-and-orient pipeline with explicit collaborators.
pub(crate) fn orient_with(
    source: &[u8],
    scale: Option<ScaleFactor>,
    codec: &dyn PixelCodec,
    metadata: &dyn MetadataReader,
    config: &CorrectorConfig,
) -> Result<DecodedImage, OrientError> {
    let transform = extract_transform(metadata.read_orientation_tag(source));
    if transform.flip_horizontal {
        tracing::debug!("Mirroring detected but not applied");
    }

    let decoded = codec.decode(source)?;
    if !decoded.has_rgb_buffer() {
        return Err(DecodeError::CorruptedFile(format!(
            "{}x{} image with {} pixel bytes",
            decoded.width,
            decoded.height,
            decoded.pixels.len()
        ))
        .into());
    }

    let matrix = orientation_affine(transform, scale);
    if matrix.is_identity() {
        tracing::debug!(
            width = decoded.width,
            height = decoded.height,
            "No orientation correction needed"
        );
        return Ok(decoded);
    }

    if transform.rotation_degrees % 180 == 90 && decoded.width != decoded.height {
        tracing::debug!(
            width = decoded.width,
            height = decoded.height,
            "Quarter turn of a non-square image; content is clipped to the decoded canvas"
        );
    }

    tracing::debug!(
        width = decoded.width,
        height = decoded.height,
        rotation = transform.rotation_degrees,
        scale = scale.map(ScaleFactor::get),
        "Applying orientation warp"
    );
    Ok(warp_affine(
        &decoded,
        &matrix,
        config.filter,
        config.background,
    ))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Every tag value maps to a quarter turn; unknown ones to identity.
        #[test]
        fn prop_any_tag_maps_to_quarter_turn(tag in any::<u32>()) {
            let t = extract_transform(Ok(tag));
            prop_assert!(matches!(t.rotation_degrees, 0 | 90 | 180 | 270));
            if !(1..=8).contains(&tag) {
                prop_assert_eq!(t, Transform::IDENTITY);
            }
        }

        /// Property: Scales in (0, 1] are accepted.
        #[test]
        fn prop_valid_scale_accepted(scale in 0.0001f32..=1.0) {
            prop_assert!(ScaleFactor::new(scale).is_ok());
        }

        /// Property: Scales above 1 or at most 0 are rejected.
        #[test]
        fn prop_invalid_scale_rejected(scale in prop_oneof![-1000.0f32..=0.0, 1.0001f32..1000.0]) {
            let is_invalid = matches!(
                ScaleFactor::new(scale),
                Err(OrientError::InvalidArgument { .. })
            );
            prop_assert!(is_invalid);
        }
    }
}

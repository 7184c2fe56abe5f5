//! Geometric transforms: affine matrices and resampling.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downward
//! - Rotation angles are in degrees, positive = clockwise on screen
//! - Output canvases keep the source dimensions

mod affine;
mod warp;

pub use affine::Affine;
pub use warp::{warp_affine, InterpolationFilter};

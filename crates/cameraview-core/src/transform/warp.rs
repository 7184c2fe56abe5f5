//! Affine resampling into a fixed-size canvas.
//!
//! # Algorithm
//!
//! The warp uses inverse mapping: for each pixel centre in the output canvas
//! we compute which source position lands there and sample it.
//!
//! The forward transform is first shifted so the top-left corner of the
//! transformed source bounds sits at the canvas origin:
//! ```text
//! placed  = M then translate(-min_x, -min_y)
//! src_xy  = placed^-1 (dst_x + 0.5, dst_y + 0.5)
//! ```
//! The canvas keeps the source dimensions. Content that falls outside it is
//! clipped, and canvas pixels no source pixel maps to keep the background.

use serde::{Deserialize, Serialize};

use super::Affine;
use crate::decode::DecodedImage;

/// Tolerance for sample positions that land exactly on the outer border.
const EDGE_EPSILON: f64 = 1e-6;

/// Interpolation filter for affine warps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationFilter {
    /// Nearest neighbor - no smoothing.
    Nearest,
    /// Bilinear interpolation - smooth resampling.
    #[default]
    Bilinear,
}

/// Apply an affine transform to an image.
///
/// The output has the same width and height as `image`. Pixels outside the
/// transformed content are filled with `background`.
pub fn warp_affine(
    image: &DecodedImage,
    transform: &Affine,
    filter: InterpolationFilter,
    background: [u8; 3],
) -> DecodedImage {
    let mut output = DecodedImage::filled(image.width, image.height, background);
    if image.is_empty() {
        return output;
    }

    let (min_x, min_y, _, _) = transform.map_bounds(image.width as f64, image.height as f64);
    let placed = transform.then(&Affine::translate(-min_x, -min_y));

    let Some(inverse) = placed.invert() else {
        return output;
    };

    let width = image.width as usize;
    for dst_y in 0..image.height as usize {
        for dst_x in 0..width {
            let (src_x, src_y) = inverse.map_point(dst_x as f64 + 0.5, dst_y as f64 + 0.5);

            let sample = match filter {
                InterpolationFilter::Nearest => sample_nearest(image, src_x, src_y),
                // Shift from continuous coordinates to pixel-centre indices
                InterpolationFilter::Bilinear => sample_bilinear(image, src_x - 0.5, src_y - 0.5),
            };

            if let Some(pixel) = sample {
                let dst_idx = (dst_y * width + dst_x) * 3;
                output.pixels[dst_idx..dst_idx + 3].copy_from_slice(&pixel);
            }
        }
    }

    output
}

/// Get a pixel as [f64; 3] from an image at the given coordinates.
#[inline]
fn get_pixel_f64(image: &DecodedImage, px: usize, py: usize) -> [f64; 3] {
    let idx = (py * image.width as usize + px) * 3;
    [
        image.pixels[idx] as f64,
        image.pixels[idx + 1] as f64,
        image.pixels[idx + 2] as f64,
    ]
}

/// Sample the pixel containing continuous position (x, y).
fn sample_nearest(image: &DecodedImage, x: f64, y: f64) -> Option<[u8; 3]> {
    if x < 0.0 || y < 0.0 || x >= image.width as f64 || y >= image.height as f64 {
        return None;
    }
    image.pixel(x.floor() as u32, y.floor() as u32)
}

/// Sample a pixel using bilinear interpolation.
///
/// `(x, y)` is in pixel-centre index space. Positions within half a pixel of
/// the border clamp to the edge; anything further out is `None`.
fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> Option<[u8; 3]> {
    let max_x = (image.width - 1) as f64;
    let max_y = (image.height - 1) as f64;

    if x < -0.5 - EDGE_EPSILON
        || y < -0.5 - EDGE_EPSILON
        || x > max_x + 0.5 + EDGE_EPSILON
        || y > max_y + 0.5 + EDGE_EPSILON
    {
        return None;
    }

    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(image.width as usize - 1);
    let y1 = (y0 + 1).min(image.height as usize - 1);

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = get_pixel_f64(image, x0, y0);
    let p10 = get_pixel_f64(image, x1, y0);
    let p01 = get_pixel_f64(image, x0, y1);
    let p11 = get_pixel_f64(image, x1, y1);

    let mut result = [0u8; 3];
    for i in 0..3 {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    Some(result)
}

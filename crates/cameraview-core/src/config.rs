//! Configuration for orientation correction.

use serde::{Deserialize, Serialize};

use crate::transform::InterpolationFilter;

/// Resampling options applied when a decoded image needs a warp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectorConfig {
    /// Sampling filter (bilinear unless smoothing is turned off)
    pub filter: InterpolationFilter,
    /// RGB fill for canvas pixels no source pixel maps to
    pub background: [u8; 3],
}

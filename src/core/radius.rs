use serde::{Deserialize, Serialize};

use crate::core::size_config::{SizeBy, SizeConfig};

/// Per-series radius output of one layout pass.
///
/// Replaced wholesale on every pass; the series never patches individual
/// fields of a previous state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRadiusState {
    /// One entry per point; `None` for sizeless (`z == None`) points.
    pub radii: Vec<Option<f64>>,
    /// Resolved minimum bubble diameter in pixels.
    pub min_px_size: f64,
    /// Resolved maximum bubble diameter in pixels.
    pub max_px_size: f64,
}

impl SeriesRadiusState {
    #[must_use]
    pub fn radius_at(&self, index: usize) -> Option<f64> {
        self.radii.get(index).copied().flatten()
    }
}

/// Maps one z value to a pixel radius.
///
/// The mapping is deterministic and side-effect free so rendering, axis
/// padding, and tests all consume the exact same geometry output.
///
/// `z_min`/`z_max` are the shared working extremes for the axis (so bubbles
/// remain comparable across series); `min_px`/`max_px` are per-series
/// diameter bounds.
#[must_use]
pub fn compute_radius(
    value: Option<f64>,
    z_min: f64,
    z_max: f64,
    min_px: f64,
    max_px: f64,
    config: &SizeConfig,
) -> Option<f64> {
    let mut value = value?;
    let mut z_min = z_min;
    let mut z_max = z_max;

    if config.size_by_absolute_value {
        // Symmetric sizing around the threshold: the working range becomes
        // [0, max distance from threshold].
        value = (value - config.z_threshold).abs();
        z_max = (z_max - config.z_threshold).max((z_min - config.z_threshold).abs());
        z_min = 0.0;
    }

    if value < z_min {
        // Below-range bubbles stay visually distinguishable instead of
        // disappearing or inflating to the configured minimum. Minimum
        // diameters under 2px would go negative here, so floor at zero.
        return Some((min_px / 2.0 - 1.0).max(0.0));
    }

    let range = z_max - z_min;
    let mut pos = if range > 0.0 {
        ((value - z_min) / range).min(1.0)
    } else {
        0.5
    };

    if config.size_by == SizeBy::Area && pos > 0.0 {
        pos = pos.sqrt();
    }

    // Half of an integer-pixel diameter, avoiding sub-pixel rendering seams.
    Some((min_px + pos * (max_px - min_px)).ceil() / 2.0)
}

/// Maps a whole z column to radii. See [`compute_radius`].
#[must_use]
pub fn compute_radii(
    z_values: &[Option<f64>],
    z_min: f64,
    z_max: f64,
    min_px: f64,
    max_px: f64,
    config: &SizeConfig,
) -> Vec<Option<f64>> {
    #[cfg(feature = "parallel-projection")]
    {
        use rayon::prelude::*;
        z_values
            .par_iter()
            .map(|value| compute_radius(*value, z_min, z_max, min_px, max_px, config))
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        z_values
            .iter()
            .map(|value| compute_radius(*value, z_min, z_max, min_px, max_px, config))
            .collect()
    }
}

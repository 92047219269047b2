use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::axis::{AxisExtent, AxisKind};
use crate::core::radius::{SeriesRadiusState, compute_radii};
use crate::core::size_config::SizeConfig;
use crate::core::types::PlotArea;
use crate::error::ChartResult;

/// Which data dimension an axis maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisDim {
    X,
    Y,
}

/// Capability a series opts into so the axis layout loop can query it for
/// size-based extent padding.
///
/// The layout loop asks every attached series for this capability instead of
/// assuming bubble-aware behavior on every axis type.
pub trait SizePaddingContributor {
    fn is_visible(&self) -> bool;
    fn size_config(&self) -> &SizeConfig;
    /// One entry per point; `None` for sizeless points.
    fn z_values(&self) -> Vec<Option<f64>>;
    /// Per-point data values along `dim`; `None` for gap points.
    fn axis_values(&self, dim: AxisDim) -> Vec<Option<f64>>;
    fn radius_state(&self) -> Option<&SeriesRadiusState>;
    fn replace_radius_state(&mut self, state: SeriesRadiusState);
    fn clear_radius_state(&mut self);
}

/// Result of one axis-padding pass, also consumed by layout reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisPaddingOutcome {
    /// Whether the extent was actually adjusted.
    pub applied: bool,
    /// Accumulated left overflow in pixels (<= 0).
    pub px_min: f64,
    /// Accumulated right overflow in pixels (>= axis length).
    pub px_max: f64,
    /// Axis extent after the pass.
    pub min: f64,
    pub max: f64,
}

impl AxisPaddingOutcome {
    fn unchanged(axis: &AxisExtent) -> Self {
        Self {
            applied: false,
            px_min: 0.0,
            px_max: axis.len(),
            min: axis.min(),
            max: axis.max(),
        }
    }
}

/// Pads one axis so the largest bubbles stay inside the plot box.
///
/// Three sub-passes: collect per-series pixel bounds and the global z
/// extremes, compute radii (reusing state already computed earlier in the
/// same layout pass, so X and Y share one sizing), then accumulate pixel
/// overflow and stretch the extent once. Radii are fixed from the
/// pre-padding pixel length; the extent is adjusted a single time rather
/// than iterated to convergence, so extreme size ranges keep a small
/// residual overflow.
///
/// Logarithmic axes and degenerate (zero or negative) data ranges are left
/// untouched.
pub fn pad_axis<S: SizePaddingContributor + ?Sized>(
    axis: &mut AxisExtent,
    dim: AxisDim,
    plot: PlotArea,
    series: &mut [&mut S],
) -> ChartResult<AxisPaddingOutcome> {
    // Collection pass: which series contribute, their pixel bounds, and the
    // global z extremes shared across the axis.
    let mut contributors: SmallVec<[usize; 8]> = SmallVec::new();
    let mut z_min = f64::INFINITY;
    let mut z_max = f64::NEG_INFINITY;

    for (index, entry) in series.iter().enumerate() {
        if !entry.is_visible() {
            continue;
        }
        let Some((data_min, data_max)) = z_extremes(&entry.z_values()) else {
            // A series with no sized points contributes nothing here.
            continue;
        };
        let (series_min, series_max) = entry.size_config().contributed_z_range(data_min, data_max);
        z_min = z_min.min(series_min);
        z_max = z_max.max(series_max);
        contributors.push(index);
    }

    if contributors.is_empty() {
        return Ok(AxisPaddingOutcome::unchanged(axis));
    }

    // Radius pass: global z range, per-series pixel bounds. State computed
    // by an earlier axis in the same layout pass is reused as-is.
    for &index in &contributors {
        let entry = &mut *series[index];
        if entry.radius_state().is_some() {
            continue;
        }
        let bounds = entry.size_config().resolve_px_bounds(plot)?;
        let radii = compute_radii(
            &entry.z_values(),
            z_min,
            z_max,
            bounds.min_px,
            bounds.max_px,
            entry.size_config(),
        );
        entry.replace_radius_state(SeriesRadiusState {
            radii,
            min_px_size: bounds.min_px,
            max_px_size: bounds.max_px,
        });
    }

    // Padding pass: signed pixel overflow of every in-range point against
    // the plot edges.
    let len = axis.len();
    let trans_a = axis.translate_factor();
    let mut px_min = 0.0_f64;
    let mut px_max = len;

    for &index in &contributors {
        let entry = &*series[index];
        let Some(state) = entry.radius_state() else {
            continue;
        };
        for (point_index, value) in entry.axis_values(dim).iter().enumerate() {
            let Some(value) = value else {
                continue;
            };
            if !axis.contains(*value) {
                continue;
            }
            let Some(radius) = state.radius_at(point_index) else {
                continue;
            };
            let position = (value - axis.min()) * trans_a;
            px_min = px_min.min(position - radius);
            px_max = px_max.max(position + radius);
        }
    }

    if axis.is_empty() || axis.kind() == AxisKind::Logarithmic {
        return Ok(AxisPaddingOutcome::unchanged(axis));
    }

    let right_overflow = px_max - len;
    let shrink = (len + px_min - right_overflow) / len;
    if shrink <= 0.0 {
        // Overflow exceeds the whole axis; stretching would invert the
        // extent, so leave it alone.
        debug!(?dim, px_min, px_max, "skipping axis padding, overflow exceeds axis length");
        return Ok(AxisPaddingOutcome::unchanged(axis));
    }

    let padded_trans_a = trans_a * shrink;
    let mut new_min = axis.min();
    let mut new_max = axis.max();
    if axis.user_min().is_none() {
        new_min += px_min / padded_trans_a;
    }
    if axis.user_max().is_none() {
        new_max += right_overflow / padded_trans_a;
    }
    axis.set_range(new_min, new_max);

    debug!(
        ?dim,
        px_min,
        px_max,
        new_min,
        new_max,
        contributors = contributors.len(),
        "applied size-based axis padding"
    );

    Ok(AxisPaddingOutcome {
        applied: true,
        px_min,
        px_max,
        min: new_min,
        max: new_max,
    })
}

fn z_extremes(z_values: &[Option<f64>]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in z_values.iter().flatten() {
        if value.is_finite() {
            min = min.min(*value);
            max = max.max(*value);
        }
    }
    (min <= max).then_some((min, max))
}

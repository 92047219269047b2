use serde::{Deserialize, Serialize};

use crate::core::axis_padding::{AxisDim, SizePaddingContributor};
use crate::core::radius::SeriesRadiusState;
use crate::core::size_config::SizeConfig;
use crate::core::types::BubblePoint;

/// One bubble series: caller-supplied points plus sizing configuration and
/// the derived radius state of the latest layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BubbleSeries {
    name: String,
    points: Vec<BubblePoint>,
    size_config: SizeConfig,
    #[serde(default = "default_visible")]
    visible: bool,
    /// Derived per-pass state, rebuilt by layout; never persisted.
    #[serde(skip)]
    radius_state: Option<SeriesRadiusState>,
    /// Size config with responsive overrides applied, recomputed from the
    /// base `size_config` on every rule evaluation.
    #[serde(skip)]
    effective_size_config: Option<SizeConfig>,
    #[serde(skip)]
    has_animated_once: bool,
}

fn default_visible() -> bool {
    true
}

impl BubbleSeries {
    #[must_use]
    pub fn new(name: impl Into<String>, points: Vec<BubblePoint>) -> Self {
        Self {
            name: name.into(),
            points,
            size_config: SizeConfig::default(),
            visible: true,
            radius_state: None,
            effective_size_config: None,
            has_animated_once: false,
        }
    }

    #[must_use]
    pub fn with_size_config(mut self, size_config: SizeConfig) -> Self {
        self.size_config = size_config;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn points(&self) -> &[BubblePoint] {
        &self.points
    }

    /// Replaces the data and discards derived radius state.
    pub fn set_points(&mut self, points: Vec<BubblePoint>) {
        self.points = points;
        self.radius_state = None;
    }

    pub fn set_size_config(&mut self, size_config: SizeConfig) {
        self.size_config = size_config;
        self.radius_state = None;
    }

    /// Base size config, without responsive overrides.
    #[must_use]
    pub fn base_size_config(&self) -> &SizeConfig {
        &self.size_config
    }

    /// Installs (or clears) the responsive-override result for this series.
    ///
    /// Layout always derives this from the base config plus the currently
    /// merged override fragment, so repeated evaluation with an unchanged
    /// rule set is a no-op.
    pub fn set_effective_size_config(&mut self, effective: Option<SizeConfig>) {
        if self.effective_size_config != effective {
            self.radius_state = None;
        }
        self.effective_size_config = effective;
    }

    /// Size config layout actually uses: the override when present, the base
    /// otherwise.
    #[must_use]
    pub fn effective_size_config(&self) -> &SizeConfig {
        self.effective_size_config.as_ref().unwrap_or(&self.size_config)
    }

    #[must_use]
    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// One-shot gate for the initial grow-in animation.
    ///
    /// Returns `true` exactly once per series lifetime; the flag is explicit
    /// state, not a self-mutating callback.
    pub fn begin_initial_animation(&mut self) -> bool {
        let first = !self.has_animated_once;
        self.has_animated_once = true;
        first
    }

    #[must_use]
    pub fn has_animated_once(&self) -> bool {
        self.has_animated_once
    }
}

impl SizePaddingContributor for BubbleSeries {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn size_config(&self) -> &SizeConfig {
        self.effective_size_config()
    }

    fn z_values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|point| point.z).collect()
    }

    fn axis_values(&self, dim: AxisDim) -> Vec<Option<f64>> {
        match dim {
            AxisDim::X => self.points.iter().map(|point| Some(point.x)).collect(),
            AxisDim::Y => self.points.iter().map(|point| point.y).collect(),
        }
    }

    fn radius_state(&self) -> Option<&SeriesRadiusState> {
        self.radius_state.as_ref()
    }

    fn replace_radius_state(&mut self, state: SeriesRadiusState) {
        self.radius_state = Some(state);
    }

    fn clear_radius_state(&mut self) {
        self.radius_state = None;
    }
}

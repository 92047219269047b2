use serde::{Deserialize, Serialize};

use crate::api::drilldown::BreadcrumbPosition;
use crate::api::responsive::ResponsiveRule;
use crate::core::{AxisKind, Viewport};
use crate::error::{ChartError, ChartResult};

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart
/// setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub viewport: Viewport,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    /// Explicit user pins; padding never moves a pinned side.
    #[serde(default)]
    pub x_user_min: Option<f64>,
    #[serde(default)]
    pub x_user_max: Option<f64>,
    #[serde(default)]
    pub y_user_min: Option<f64>,
    #[serde(default)]
    pub y_user_max: Option<f64>,
    #[serde(default)]
    pub x_kind: AxisKind,
    #[serde(default)]
    pub y_kind: AxisKind,
    #[serde(default)]
    pub breadcrumb_position: BreadcrumbPosition,
    /// Ordered width/height-conditioned overrides; later rules win.
    #[serde(default)]
    pub responsive_rules: Vec<ResponsiveRule>,
}

impl ChartEngineConfig {
    /// Creates a minimal config with unit data domains.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            x_min: 0.0,
            x_max: 1.0,
            y_min: 0.0,
            y_max: 1.0,
            x_user_min: None,
            x_user_max: None,
            y_user_min: None,
            y_user_max: None,
            x_kind: AxisKind::default(),
            y_kind: AxisKind::default(),
            breadcrumb_position: BreadcrumbPosition::default(),
            responsive_rules: Vec::new(),
        }
    }

    /// Sets the initial X data domain.
    #[must_use]
    pub fn with_x_domain(mut self, x_min: f64, x_max: f64) -> Self {
        self.x_min = x_min;
        self.x_max = x_max;
        self
    }

    /// Sets the initial Y data domain.
    #[must_use]
    pub fn with_y_domain(mut self, y_min: f64, y_max: f64) -> Self {
        self.y_min = y_min;
        self.y_max = y_max;
        self
    }

    /// Pins the X minimum; size padding will not move it.
    #[must_use]
    pub fn with_pinned_x_min(mut self, x_min: f64) -> Self {
        self.x_user_min = Some(x_min);
        self.x_min = x_min;
        self
    }

    /// Pins the X maximum; size padding will not move it.
    #[must_use]
    pub fn with_pinned_x_max(mut self, x_max: f64) -> Self {
        self.x_user_max = Some(x_max);
        self.x_max = x_max;
        self
    }

    /// Pins the Y minimum; size padding will not move it.
    #[must_use]
    pub fn with_pinned_y_min(mut self, y_min: f64) -> Self {
        self.y_user_min = Some(y_min);
        self.y_min = y_min;
        self
    }

    /// Pins the Y maximum; size padding will not move it.
    #[must_use]
    pub fn with_pinned_y_max(mut self, y_max: f64) -> Self {
        self.y_user_max = Some(y_max);
        self.y_max = y_max;
        self
    }

    #[must_use]
    pub fn with_axis_kinds(mut self, x_kind: AxisKind, y_kind: AxisKind) -> Self {
        self.x_kind = x_kind;
        self.y_kind = y_kind;
        self
    }

    #[must_use]
    pub fn with_breadcrumb_position(mut self, position: BreadcrumbPosition) -> Self {
        self.breadcrumb_position = position;
        self
    }

    #[must_use]
    pub fn with_responsive_rules(mut self, rules: Vec<ResponsiveRule>) -> Self {
        self.responsive_rules = rules;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.x_min.is_finite()
            || !self.x_max.is_finite()
            || !self.y_min.is_finite()
            || !self.y_max.is_finite()
            || self.x_min > self.x_max
            || self.y_min > self.y_max
        {
            return Err(ChartError::InvalidConfig(
                "axis domains must be finite with min <= max".to_owned(),
            ));
        }
        for rule in &self.responsive_rules {
            if !rule.overrides.is_object() {
                return Err(ChartError::InvalidConfig(
                    "responsive rule overrides must be a JSON object".to_owned(),
                ));
            }
        }
        Ok(())
    }
}

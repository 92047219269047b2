use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Axis transform family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    #[default]
    Linear,
    /// Size-aware padding is not applied to logarithmic axes.
    Logarithmic,
}

/// Data-unit extent of one axis plus its pixel length.
///
/// `min`/`max` are mutated only by the axis-padding pass, and only on sides
/// the user has not pinned via `user_min`/`user_max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisExtent {
    min: f64,
    max: f64,
    #[serde(default)]
    user_min: Option<f64>,
    #[serde(default)]
    user_max: Option<f64>,
    len: f64,
    #[serde(default)]
    kind: AxisKind,
}

impl AxisExtent {
    pub fn new(min: f64, max: f64, len: f64) -> ChartResult<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(ChartError::InvalidData(
                "axis extent must be finite with min <= max".to_owned(),
            ));
        }
        if !len.is_finite() || len <= 0.0 {
            return Err(ChartError::InvalidData(
                "axis pixel length must be finite and > 0".to_owned(),
            ));
        }

        Ok(Self {
            min,
            max,
            user_min: None,
            user_max: None,
            len,
            kind: AxisKind::Linear,
        })
    }

    /// Pins the minimum to a user-supplied value; padding never moves it.
    #[must_use]
    pub fn with_user_min(mut self, user_min: f64) -> Self {
        self.user_min = Some(user_min);
        self.min = user_min;
        self
    }

    /// Pins the maximum to a user-supplied value; padding never moves it.
    #[must_use]
    pub fn with_user_max(mut self, user_max: f64) -> Self {
        self.user_max = Some(user_max);
        self.max = user_max;
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: AxisKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn min(self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn len(self) -> f64 {
        self.len
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.max <= self.min
    }

    #[must_use]
    pub fn user_min(self) -> Option<f64> {
        self.user_min
    }

    #[must_use]
    pub fn user_max(self) -> Option<f64> {
        self.user_max
    }

    #[must_use]
    pub fn kind(self) -> AxisKind {
        self.kind
    }

    /// Pixels per data unit over the current extent.
    #[must_use]
    pub fn translate_factor(self) -> f64 {
        let range = self.max - self.min;
        if range > 0.0 { self.len / range } else { 0.0 }
    }

    /// Maps a data value to its pixel offset along the axis.
    #[must_use]
    pub fn data_to_pixel(self, value: f64) -> f64 {
        (value - self.min) * self.translate_factor()
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Replaces the pixel length, e.g. after a container resize.
    pub(crate) fn set_len(&mut self, len: f64) {
        self.len = len;
    }

    /// Extent mutation reserved for the axis-padding pass.
    pub(crate) fn set_range(&mut self, min: f64, max: f64) {
        self.min = min;
        self.max = max;
    }
}

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::PlotArea;
use crate::error::{ChartError, ChartResult};

/// Bubble diameter bound, either absolute pixels or a percentage of the
/// smaller plot-area side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeValue {
    Pixels(f64),
    Percent(f64),
}

impl SizeValue {
    /// Resolves the bound to pixels against the given plot box.
    #[must_use]
    pub fn resolve(self, plot: PlotArea) -> f64 {
        match self {
            Self::Pixels(px) => px,
            Self::Percent(pct) => plot.smallest_side() * pct / 100.0,
        }
    }

    fn validate(self) -> ChartResult<Self> {
        let raw = match self {
            Self::Pixels(px) => px,
            Self::Percent(pct) => pct,
        };
        if !raw.is_finite() || raw < 0.0 {
            return Err(ChartError::InvalidConfig(
                "bubble size values must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

impl FromStr for SizeValue {
    type Err = ChartError;

    /// Parses `"42"` as pixels and `"25%"` as a percentage.
    ///
    /// Malformed input fails here, once, at configuration-resolution time.
    fn from_str(raw: &str) -> ChartResult<Self> {
        let trimmed = raw.trim();
        let parsed = if let Some(percent_part) = trimmed.strip_suffix('%') {
            percent_part
                .trim()
                .parse::<f64>()
                .map(Self::Percent)
                .map_err(|_| {
                    ChartError::InvalidConfig(format!("unparseable size percentage: {trimmed:?}"))
                })?
        } else {
            trimmed.parse::<f64>().map(Self::Pixels).map_err(|_| {
                ChartError::InvalidConfig(format!("unparseable size value: {trimmed:?}"))
            })?
        };
        parsed.validate()
    }
}

impl fmt::Display for SizeValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixels(px) => write!(formatter, "{px}"),
            Self::Percent(pct) => write!(formatter, "{pct}%"),
        }
    }
}

impl Serialize for SizeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Pixels(px) => serializer.serialize_f64(*px),
            Self::Percent(_) => serializer.serialize_str(&self.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for SizeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SizeValueVisitor;

        impl Visitor<'_> for SizeValueVisitor {
            type Value = SizeValue;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a pixel number or a percentage string like \"25%\"")
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<SizeValue, E> {
                SizeValue::Pixels(value)
                    .validate()
                    .map_err(|err| E::custom(err.to_string()))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<SizeValue, E> {
                self.visit_f64(value as f64)
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<SizeValue, E> {
                self.visit_f64(value as f64)
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<SizeValue, E> {
                value.parse().map_err(|err: ChartError| E::custom(err.to_string()))
            }
        }

        deserializer.deserialize_any(SizeValueVisitor)
    }
}

/// How the z magnitude maps onto bubble size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SizeBy {
    /// Bubble area scales linearly with z (perceptually linear).
    #[default]
    Area,
    /// Bubble diameter scales linearly with z.
    Width,
}

/// Bubble sizing controls for one series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeConfig {
    pub min_size: SizeValue,
    pub max_size: SizeValue,
    #[serde(default)]
    pub size_by: SizeBy,
    /// Size by `|z - z_threshold|` instead of raw z, symmetric around the threshold.
    #[serde(default)]
    pub size_by_absolute_value: bool,
    #[serde(default)]
    pub z_threshold: f64,
    #[serde(default)]
    pub z_min: Option<f64>,
    #[serde(default)]
    pub z_max: Option<f64>,
    #[serde(default = "default_display_negative")]
    pub display_negative: bool,
}

fn default_display_negative() -> bool {
    true
}

impl Default for SizeConfig {
    fn default() -> Self {
        Self {
            min_size: SizeValue::Pixels(8.0),
            max_size: SizeValue::Percent(20.0),
            size_by: SizeBy::Area,
            size_by_absolute_value: false,
            z_threshold: 0.0,
            z_min: None,
            z_max: None,
            display_negative: true,
        }
    }
}

/// Series pixel bounds after percent resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSizeBounds {
    pub min_px: f64,
    pub max_px: f64,
}

impl SizeConfig {
    /// Resolves `min_size`/`max_size` to pixel diameters against the plot box.
    ///
    /// A max below the resolved min is clamped up to it: bubbles must never
    /// shrink below the configured minimum, so the minimum wins when the two
    /// bounds conflict.
    pub fn resolve_px_bounds(&self, plot: PlotArea) -> ChartResult<ResolvedSizeBounds> {
        if !plot.is_valid() {
            return Err(ChartError::InvalidConfig(
                "plot area must have positive finite dimensions".to_owned(),
            ));
        }

        let min_px = self.min_size.validate()?.resolve(plot);
        let max_px = self.max_size.validate()?.resolve(plot).max(min_px);
        Ok(ResolvedSizeBounds { min_px, max_px })
    }

    /// Z range this series contributes to the shared sizing extremes,
    /// honoring explicit `z_min`/`z_max` overrides and `display_negative`.
    ///
    /// With `display_negative == false`, values below `z_threshold` do not
    /// stretch the sizing range downward; they are still rendered and sized.
    /// The absolute-value remap around the threshold happens later, inside
    /// radius computation.
    #[must_use]
    pub fn contributed_z_range(&self, data_z_min: f64, data_z_max: f64) -> (f64, f64) {
        let z_min = self.z_min.unwrap_or_else(|| {
            if self.display_negative {
                data_z_min
            } else {
                data_z_min.max(self.z_threshold)
            }
        });
        let z_max = self.z_max.unwrap_or(data_z_max);
        (z_min, z_max)
    }
}

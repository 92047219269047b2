use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Plot box in pixels, after axis/label chrome has been subtracted.
///
/// Percent-valued bubble sizes resolve against the smaller plot dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn from_viewport(viewport: Viewport) -> Self {
        Self {
            width: f64::from(viewport.width),
            height: f64::from(viewport.height),
        }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// The reference length percent-valued bubble sizes resolve against.
    #[must_use]
    pub fn smallest_side(self) -> f64 {
        self.width.min(self.height)
    }
}

/// Single bubble datum.
///
/// `y == None` marks a gap point; `z == None` marks a sizeless point that is
/// excluded from radius computation and never drawn as a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BubblePoint {
    pub x: f64,
    pub y: Option<f64>,
    pub z: Option<f64>,
    #[serde(default)]
    pub name: Option<String>,
    /// Per-point style override fragment, merged over the series style.
    #[serde(default)]
    pub style: Option<serde_json::Value>,
}

impl BubblePoint {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y: Some(y),
            z: Some(z),
            name: None,
            style: None,
        }
    }

    #[must_use]
    pub fn sizeless(x: f64, y: f64) -> Self {
        Self {
            x,
            y: Some(y),
            z: None,
            name: None,
            style: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

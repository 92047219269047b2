use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};

/// One bubble with finalized pixel geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedBubble {
    pub series: String,
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    #[serde(default)]
    pub name: Option<String>,
}

impl ProjectedBubble {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.center_x.is_finite() || !self.center_y.is_finite() {
            return Err(ChartError::InvalidData(
                "bubble center must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(ChartError::InvalidData(
                "bubble radius must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Breadcrumb trail geometry resolved from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreadcrumbFrame {
    /// Drill path labels, root first.
    pub path: Vec<String>,
    pub position_x: f64,
    pub position_y: f64,
}

impl BreadcrumbFrame {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.position_x.is_finite() || !self.position_y.is_finite() {
            return Err(ChartError::InvalidData(
                "breadcrumb position must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Backend-agnostic scene for one completed layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub bubbles: Vec<ProjectedBubble>,
    #[serde(default)]
    pub breadcrumbs: Option<BreadcrumbFrame>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            bubbles: Vec::new(),
            breadcrumbs: None,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for bubble in &self.bubbles {
            bubble.validate()?;
        }
        if let Some(breadcrumbs) = &self.breadcrumbs {
            breadcrumbs.validate()?;
        }

        Ok(())
    }
}

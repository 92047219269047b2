use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::responsive::lookup_path;

/// Configured breadcrumb anchor, overridable by responsive rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreadcrumbPosition {
    pub x: f64,
    pub y: f64,
}

impl Default for BreadcrumbPosition {
    fn default() -> Self {
        Self { x: 10.0, y: 10.0 }
    }
}

impl BreadcrumbPosition {
    /// Applies `drilldown.breadcrumbs.position.*` overrides from the merged
    /// responsive fragment on top of the configured anchor.
    #[must_use]
    pub fn resolved(self, overrides: &Value) -> Self {
        let x = lookup_path(overrides, "drilldown.breadcrumbs.position.x")
            .and_then(Value::as_f64)
            .unwrap_or(self.x);
        let y = lookup_path(overrides, "drilldown.breadcrumbs.position.y")
            .and_then(Value::as_f64)
            .unwrap_or(self.y);
        Self { x, y }
    }
}

/// Current drill path. The root level has an empty path and shows no
/// breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DrilldownState {
    path: Vec<String>,
}

impl DrilldownState {
    #[must_use]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    #[must_use]
    pub fn is_drilled(&self) -> bool {
        !self.path.is_empty()
    }

    pub(crate) fn push(&mut self, level: String) {
        self.path.push(level);
    }

    /// Pops one level; returns `false` when already at the root.
    pub(crate) fn pop(&mut self) -> bool {
        self.path.pop().is_some()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{BreadcrumbPosition, DrilldownState};

    #[test]
    fn breadcrumb_position_prefers_override_fragment() {
        let overrides = json!({"drilldown": {"breadcrumbs": {"position": {"y": 100.0}}}});
        let position = BreadcrumbPosition::default().resolved(&overrides);
        assert_eq!(position.x, 10.0);
        assert_eq!(position.y, 100.0);
    }

    #[test]
    fn drill_path_push_pop() {
        let mut state = DrilldownState::default();
        assert!(!state.is_drilled());
        state.push("Europe".to_owned());
        state.push("Portugal".to_owned());
        assert_eq!(state.depth(), 2);
        assert!(state.pop());
        assert!(state.pop());
        assert!(!state.pop());
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Container-dimension condition gating one responsive rule.
///
/// Absent bounds do not constrain; all present bounds must hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct RuleCondition {
    #[serde(default)]
    pub max_width: Option<f64>,
    #[serde(default)]
    pub min_width: Option<f64>,
    #[serde(default)]
    pub max_height: Option<f64>,
    #[serde(default)]
    pub min_height: Option<f64>,
}

impl RuleCondition {
    #[must_use]
    pub fn matches(self, width: f64, height: f64) -> bool {
        self.max_width.is_none_or(|bound| width <= bound)
            && self.min_width.is_none_or(|bound| width >= bound)
            && self.max_height.is_none_or(|bound| height <= bound)
            && self.min_height.is_none_or(|bound| height >= bound)
    }
}

/// One width/height-conditioned configuration override.
///
/// Rule order in the configured list is precedence: later active rules win
/// on conflicting keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsiveRule {
    pub condition: RuleCondition,
    /// JSON fragment deep-merged over the effective options.
    pub overrides: Value,
}

/// Pure evaluation of which rules apply at the given container dimensions.
#[must_use]
pub fn active_rules(width: f64, height: f64, rules: &[ResponsiveRule]) -> Vec<&ResponsiveRule> {
    rules
        .iter()
        .filter(|rule| rule.condition.matches(width, height))
        .collect()
}

/// Deep-merges `overlay` into `target`: objects merge key-wise, everything
/// else is replaced (last fragment wins).
pub fn deep_merge(target: &mut Value, overlay: &Value) {
    match (target, overlay) {
        (Value::Object(target_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                deep_merge(
                    target_map.entry(key.clone()).or_insert(Value::Null),
                    overlay_value,
                );
            }
        }
        (target_slot, overlay_value) => {
            *target_slot = overlay_value.clone();
        }
    }
}

/// Merged override fragment produced by the currently active rules.
///
/// Idempotent in the rule set: the same dimensions and rules always produce
/// the same fragment, and an empty active set produces an empty object.
#[must_use]
pub fn merged_overrides(width: f64, height: f64, rules: &[ResponsiveRule]) -> Value {
    let mut merged = Value::Object(serde_json::Map::new());
    for rule in active_rules(width, height, rules) {
        deep_merge(&mut merged, &rule.overrides);
    }
    merged
}

/// Looks up a dotted path (`"drilldown.breadcrumbs.position.y"`) in a
/// fragment.
#[must_use]
pub fn lookup_path<'fragment>(fragment: &'fragment Value, path: &str) -> Option<&'fragment Value> {
    let mut current = fragment;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

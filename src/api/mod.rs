mod drilldown;
mod engine;
mod engine_config;
mod layout;
mod responsive;

pub use drilldown::{BreadcrumbPosition, DrilldownState};
pub use engine::ChartEngine;
pub use engine_config::ChartEngineConfig;
pub use layout::{LayoutPassReport, LayoutPhase, LayoutTrigger, RelayoutCoordinator};
pub use responsive::{
    ResponsiveRule, RuleCondition, active_rules, deep_merge, lookup_path, merged_overrides,
};

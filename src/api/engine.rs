use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::api::drilldown::DrilldownState;
use crate::api::engine_config::ChartEngineConfig;
use crate::api::layout::{LayoutPassReport, LayoutPhase, LayoutTrigger, RelayoutCoordinator};
use crate::api::responsive::ResponsiveRule;
use crate::core::{AxisExtent, AxisKind, BubblePoint, BubbleSeries, SizeConfig, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{RenderFrame, Renderer};

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the axes, the bubble-series registry, drilldown and
/// responsive-rule state, and drives the layout coordinator on every
/// size-affecting trigger.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) viewport: Viewport,
    pub(super) config: ChartEngineConfig,
    pub(super) axis_x: AxisExtent,
    pub(super) axis_y: AxisExtent,
    /// Insertion-ordered: draw order matches attach order.
    pub(super) series: IndexMap<String, BubbleSeries>,
    pub(super) drill: DrilldownState,
    /// Merged responsive fragment currently applied to effective options.
    pub(super) applied_overrides: Value,
    pub(super) layout: RelayoutCoordinator,
    pub(super) last_frame: Option<RenderFrame>,
}

impl<R: Renderer> ChartEngine<R> {
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        config.validate()?;

        let axis_x = build_axis(
            config.x_min,
            config.x_max,
            f64::from(config.viewport.width),
            config.x_user_min,
            config.x_user_max,
            config.x_kind,
        )?;
        let axis_y = build_axis(
            config.y_min,
            config.y_max,
            f64::from(config.viewport.height),
            config.y_user_min,
            config.y_user_max,
            config.y_kind,
        )?;

        Ok(Self {
            renderer,
            viewport: config.viewport,
            axis_x,
            axis_y,
            series: IndexMap::new(),
            drill: DrilldownState::default(),
            applied_overrides: Value::Object(serde_json::Map::new()),
            layout: RelayoutCoordinator::default(),
            last_frame: None,
            config,
        })
    }

    /// Runs the initial layout pass and hands the frame to the renderer.
    pub fn render(&mut self) -> ChartResult<()> {
        self.request_layout(LayoutTrigger::InitialRender)
    }

    /// Attaches a series and relayouts.
    ///
    /// Series names are unique; the name doubles as the override key under
    /// the responsive `series.<name>` section.
    pub fn add_series(&mut self, series: BubbleSeries) -> ChartResult<()> {
        let name = series.name().to_owned();
        if self.series.contains_key(&name) {
            return Err(ChartError::InvalidConfig(format!(
                "duplicate series name: {name:?}"
            )));
        }
        debug!(series = %name, points = series.points().len(), "attached bubble series");
        self.series.insert(name, series);
        self.request_layout(LayoutTrigger::DataChange)
    }

    /// Replaces one series' data and relayouts.
    pub fn set_series_points(&mut self, name: &str, points: Vec<BubblePoint>) -> ChartResult<()> {
        let series = self.series_mut(name)?;
        series.set_points(points);
        self.request_layout(LayoutTrigger::DataChange)
    }

    /// Replaces one series' base size configuration and relayouts.
    pub fn set_series_size_config(&mut self, name: &str, config: SizeConfig) -> ChartResult<()> {
        let series = self.series_mut(name)?;
        series.set_size_config(config);
        self.request_layout(LayoutTrigger::DataChange)
    }

    pub fn set_series_visible(&mut self, name: &str, visible: bool) -> ChartResult<()> {
        let series = self.series_mut(name)?;
        series.set_visible(visible);
        self.request_layout(LayoutTrigger::DataChange)
    }

    /// Resizes the container and relayouts with the new pixel geometry.
    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = viewport;
        self.axis_x.set_len(f64::from(viewport.width));
        self.axis_y.set_len(f64::from(viewport.height));
        self.request_layout(LayoutTrigger::Resize)
    }

    /// Replaces the responsive rule list and relayouts.
    pub fn set_responsive_rules(&mut self, rules: Vec<ResponsiveRule>) -> ChartResult<()> {
        for rule in &rules {
            if !rule.overrides.is_object() {
                return Err(ChartError::InvalidConfig(
                    "responsive rule overrides must be a JSON object".to_owned(),
                ));
            }
        }
        self.config.responsive_rules = rules;
        self.request_layout(LayoutTrigger::ResponsiveRuleChange)
    }

    /// Descends one drill level. The drilldown feature owns navigation;
    /// layout only consumes the trigger.
    pub fn drill_down(&mut self, level: impl Into<String>) -> ChartResult<()> {
        let level = level.into();
        debug!(level = %level, "drill down");
        self.drill.push(level);
        self.request_layout(LayoutTrigger::DrillDown)
    }

    /// Ascends one drill level; a no-op at the root.
    pub fn drill_up(&mut self) -> ChartResult<()> {
        if !self.drill.pop() {
            return Ok(());
        }
        self.request_layout(LayoutTrigger::DrillUp)
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn axis_x(&self) -> AxisExtent {
        self.axis_x
    }

    #[must_use]
    pub fn axis_y(&self) -> AxisExtent {
        self.axis_y
    }

    #[must_use]
    pub fn series(&self, name: &str) -> Option<&BubbleSeries> {
        self.series.get(name)
    }

    #[must_use]
    pub fn series_names(&self) -> Vec<&str> {
        self.series.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn drilldown(&self) -> &DrilldownState {
        &self.drill
    }

    #[must_use]
    pub fn applied_overrides(&self) -> &Value {
        &self.applied_overrides
    }

    #[must_use]
    pub fn layout_phase(&self) -> LayoutPhase {
        self.layout.phase()
    }

    #[must_use]
    pub fn last_report(&self) -> Option<&LayoutPassReport> {
        self.layout.last_report()
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.last_frame.as_ref()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Restores both extents to their configured bounds before padding.
    ///
    /// Padding is re-derived from scratch each pass so repeated passes do
    /// not accumulate extent growth.
    pub(super) fn reset_axis_extents(&mut self) {
        self.axis_x.set_range(self.config.x_min, self.config.x_max);
        self.axis_y.set_range(self.config.y_min, self.config.y_max);
    }

    fn series_mut(&mut self, name: &str) -> ChartResult<&mut BubbleSeries> {
        self.series
            .get_mut(name)
            .ok_or_else(|| ChartError::InvalidData(format!("unknown series: {name:?}")))
    }
}

fn build_axis(
    min: f64,
    max: f64,
    len: f64,
    user_min: Option<f64>,
    user_max: Option<f64>,
    kind: AxisKind,
) -> ChartResult<AxisExtent> {
    let mut axis = AxisExtent::new(min, max, len)?.with_kind(kind);
    if let Some(user_min) = user_min {
        axis = axis.with_user_min(user_min);
    }
    if let Some(user_max) = user_max {
        axis = axis.with_user_max(user_max);
    }
    Ok(axis)
}

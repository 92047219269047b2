use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::api::ChartEngine;
use crate::api::responsive::{active_rules, deep_merge, merged_overrides};
use crate::core::{
    AxisDim, AxisPaddingOutcome, BubbleSeries, PlotArea, SizeConfig, SizePaddingContributor,
    pad_axis,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{BreadcrumbFrame, ProjectedBubble, RenderFrame, Renderer};

/// Where the chart instance currently is in its layout cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LayoutPhase {
    #[default]
    Idle,
    Evaluating,
    LayingOut,
}

/// Event that re-enters the layout pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutTrigger {
    InitialRender,
    DataChange,
    Resize,
    DrillDown,
    DrillUp,
    ResponsiveRuleChange,
}

/// Serializable summary of one completed layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPassReport {
    pub pass: u64,
    pub trigger: LayoutTrigger,
    /// Whether the merged responsive fragment differed from the last applied one.
    pub overrides_changed: bool,
    pub active_rule_count: usize,
    pub x_padding: AxisPaddingOutcome,
    pub y_padding: AxisPaddingOutcome,
    pub bubble_count: usize,
}

/// State machine coalescing layout triggers into at most one pending pass.
///
/// A trigger arriving while a pass is in progress replaces any earlier
/// pending trigger; the queued pass runs with the latest configuration and
/// data, never with a stale snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RelayoutCoordinator {
    phase: LayoutPhase,
    #[serde(default)]
    pending: Option<LayoutTrigger>,
    pass_count: u64,
    #[serde(default)]
    last_report: Option<LayoutPassReport>,
}

impl RelayoutCoordinator {
    #[must_use]
    pub fn phase(&self) -> LayoutPhase {
        self.phase
    }

    #[must_use]
    pub fn pass_count(&self) -> u64 {
        self.pass_count
    }

    #[must_use]
    pub fn last_report(&self) -> Option<&LayoutPassReport> {
        self.last_report.as_ref()
    }

    #[must_use]
    pub fn pending(&self) -> Option<LayoutTrigger> {
        self.pending
    }

    /// Admits a trigger. Returns the trigger to run now when the coordinator
    /// is idle; otherwise coalesces it into the single pending slot and
    /// returns `None`.
    pub fn request(&mut self, trigger: LayoutTrigger) -> Option<LayoutTrigger> {
        match self.phase {
            LayoutPhase::Idle => Some(trigger),
            LayoutPhase::Evaluating | LayoutPhase::LayingOut => {
                if let Some(superseded) = self.pending.replace(trigger) {
                    debug!(?superseded, ?trigger, "coalesced pending layout trigger");
                }
                None
            }
        }
    }

    pub fn begin(&mut self, trigger: LayoutTrigger) {
        debug!(?trigger, "entering layout evaluation");
        self.phase = LayoutPhase::Evaluating;
    }

    pub fn advance_to_laying_out(&mut self) {
        self.phase = LayoutPhase::LayingOut;
    }

    pub fn complete(&mut self, report: LayoutPassReport) {
        self.phase = LayoutPhase::Idle;
        self.pass_count = report.pass;
        self.last_report = Some(report);
    }

    /// Takes the coalesced trigger queued while the last pass ran.
    pub fn take_pending(&mut self) -> Option<LayoutTrigger> {
        self.pending.take()
    }

    /// Returns to `Idle` after a failed pass so later triggers still run.
    ///
    /// Any coalesced pending trigger is dropped with it: whatever queued it
    /// will be superseded by the caller's next request against current state.
    pub fn abort(&mut self) {
        debug!(dropped = ?self.pending, "layout pass aborted");
        self.phase = LayoutPhase::Idle;
        self.pending = None;
    }
}

impl<R: Renderer> ChartEngine<R> {
    /// Runs a layout pass for `trigger`, then drains any trigger that was
    /// coalesced while the pass ran.
    pub fn request_layout(&mut self, trigger: LayoutTrigger) -> ChartResult<()> {
        let Some(first) = self.layout.request(trigger) else {
            return Ok(());
        };

        let mut next = Some(first);
        while let Some(trigger) = next.take() {
            if let Err(err) = self.run_layout_pass(trigger) {
                // A failed pass must not wedge the coordinator: leave it
                // idle so the caller can fix the input and trigger again.
                self.layout.abort();
                return Err(err);
            }
            next = self.layout.take_pending();
        }
        Ok(())
    }

    fn run_layout_pass(&mut self, trigger: LayoutTrigger) -> ChartResult<()> {
        let span = debug_span!("layout_pass", ?trigger);
        let _guard = span.enter();

        self.layout.begin(trigger);

        // Evaluating: re-derive the merged responsive fragment from the rule
        // list and the current container size.
        let width = f64::from(self.viewport.width);
        let height = f64::from(self.viewport.height);
        let merged = merged_overrides(width, height, &self.config.responsive_rules);
        let active_rule_count = active_rules(width, height, &self.config.responsive_rules).len();
        let overrides_changed = merged != self.applied_overrides;
        if overrides_changed {
            debug!(active_rule_count, "applying changed responsive overrides");
            self.applied_overrides = merged;
        }
        self.apply_series_size_overrides()?;

        // Laying out: fresh extents from configuration, sizing computed on
        // the X pass and shared with Y, then one padding adjustment each.
        self.layout.advance_to_laying_out();
        self.reset_axis_extents();
        for series in self.series.values_mut() {
            SizePaddingContributor::clear_radius_state(series);
        }

        let plot = PlotArea::from_viewport(self.viewport);
        let mut contributors: Vec<&mut BubbleSeries> = self.series.values_mut().collect();
        let x_padding = pad_axis(&mut self.axis_x, AxisDim::X, plot, &mut contributors)?;
        let y_padding = pad_axis(&mut self.axis_y, AxisDim::Y, plot, &mut contributors)?;
        drop(contributors);

        let frame = self.build_frame();
        self.renderer.render(&frame)?;

        let report = LayoutPassReport {
            pass: self.layout.pass_count() + 1,
            trigger,
            overrides_changed,
            active_rule_count,
            x_padding,
            y_padding,
            bubble_count: frame.bubbles.len(),
        };
        debug!(pass = report.pass, bubbles = report.bubble_count, "layout pass complete");
        self.last_frame = Some(frame);
        self.layout.complete(report);
        Ok(())
    }

    /// Recomputes each series' effective size config from its base config
    /// plus the `bubble` and `series.<name>` sections of the applied
    /// fragment. Idempotent: derived from the base on every evaluation.
    fn apply_series_size_overrides(&mut self) -> ChartResult<()> {
        let shared = self.applied_overrides.get("bubble").cloned();
        let per_series = self.applied_overrides.get("series").cloned();

        for (name, series) in &mut self.series {
            let own = per_series.as_ref().and_then(|section| section.get(name.as_str()));
            if shared.is_none() && own.is_none() {
                series.set_effective_size_config(None);
                continue;
            }

            let mut effective = serde_json::to_value(series.base_size_config())
                .map_err(|err| ChartError::InvalidConfig(err.to_string()))?;
            if let Some(fragment) = &shared {
                deep_merge(&mut effective, fragment);
            }
            if let Some(fragment) = own {
                deep_merge(&mut effective, fragment);
            }
            let resolved: SizeConfig = serde_json::from_value(effective).map_err(|err| {
                ChartError::InvalidConfig(format!(
                    "responsive size override for series {name:?} is invalid: {err}"
                ))
            })?;
            series.set_effective_size_config(Some(resolved));
        }
        Ok(())
    }

    fn build_frame(&self) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport);

        for series in self.series.values() {
            if !series.visible() {
                continue;
            }
            let Some(state) = SizePaddingContributor::radius_state(series) else {
                continue;
            };
            for (index, point) in series.points().iter().enumerate() {
                let Some(y) = point.y else {
                    continue;
                };
                let Some(radius) = state.radius_at(index) else {
                    continue;
                };
                frame.bubbles.push(ProjectedBubble {
                    series: series.name().to_owned(),
                    center_x: self.axis_x.data_to_pixel(point.x),
                    // Pixel Y grows downward; data Y grows upward.
                    center_y: self.axis_y.len() - self.axis_y.data_to_pixel(y),
                    radius,
                    name: point.name.clone(),
                });
            }
        }

        if self.drill.is_drilled() {
            let position = self
                .config
                .breadcrumb_position
                .resolved(&self.applied_overrides);
            frame.breadcrumbs = Some(BreadcrumbFrame {
                path: self.drill.path().to_vec(),
                position_x: position.x,
                position_y: position.y,
            });
        }

        frame
    }
}

#[cfg(test)]
mod tests {
    use super::{LayoutPassReport, LayoutPhase, LayoutTrigger, RelayoutCoordinator};
    use crate::core::AxisPaddingOutcome;

    fn dummy_report(pass: u64, trigger: LayoutTrigger) -> LayoutPassReport {
        let padding = AxisPaddingOutcome {
            applied: false,
            px_min: 0.0,
            px_max: 100.0,
            min: 0.0,
            max: 1.0,
        };
        LayoutPassReport {
            pass,
            trigger,
            overrides_changed: false,
            active_rule_count: 0,
            x_padding: padding,
            y_padding: padding,
            bubble_count: 0,
        }
    }

    #[test]
    fn idle_trigger_runs_immediately() {
        let mut coordinator = RelayoutCoordinator::default();
        assert_eq!(
            coordinator.request(LayoutTrigger::InitialRender),
            Some(LayoutTrigger::InitialRender)
        );
    }

    #[test]
    fn mid_pass_triggers_coalesce_to_latest() {
        let mut coordinator = RelayoutCoordinator::default();
        let trigger = coordinator
            .request(LayoutTrigger::InitialRender)
            .expect("idle");
        coordinator.begin(trigger);

        assert_eq!(coordinator.request(LayoutTrigger::Resize), None);
        assert_eq!(coordinator.request(LayoutTrigger::DrillDown), None);

        coordinator.advance_to_laying_out();
        assert_eq!(coordinator.phase(), LayoutPhase::LayingOut);
        coordinator.complete(dummy_report(1, trigger));

        // Only the latest queued trigger survives.
        assert_eq!(coordinator.take_pending(), Some(LayoutTrigger::DrillDown));
        assert_eq!(coordinator.take_pending(), None);
        assert_eq!(coordinator.pass_count(), 1);
        assert_eq!(coordinator.phase(), LayoutPhase::Idle);
    }

    #[test]
    fn abort_returns_to_idle_and_drops_pending() {
        let mut coordinator = RelayoutCoordinator::default();
        let trigger = coordinator
            .request(LayoutTrigger::InitialRender)
            .expect("idle");
        coordinator.begin(trigger);
        assert_eq!(coordinator.request(LayoutTrigger::Resize), None);

        coordinator.abort();
        assert_eq!(coordinator.phase(), LayoutPhase::Idle);
        assert_eq!(coordinator.take_pending(), None);

        // A fresh trigger runs immediately again.
        assert_eq!(
            coordinator.request(LayoutTrigger::DataChange),
            Some(LayoutTrigger::DataChange)
        );
    }
}

//! Axis-selection state machine and the re-render pipeline it drives.

use crate::config::ChartConfig;
use crate::models::{Axis, Dataset, Metric, Selection, XField, YField};
use crate::scale::{LinearScale, build_scale, x_scale, y_scale};
use crate::scene::{Frame, Scene, TooltipFrame};
use crate::storage::PlotRow;
use crate::tooltip::{Tooltip, TooltipController};

/// Distance between an abbreviation's baseline and the tooltip above it.
const TOOLTIP_GAP_PX: f64 = 14.0;

/// Outcome of a click on an axis title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The title was already active; nothing was recomputed.
    Unchanged,
    /// The given axis switched metric and was re-rendered.
    Changed(Axis),
}

/// Everything the chart needs between events. Handlers receive it explicitly.
#[derive(Debug, Clone)]
pub struct ChartState {
    data: Dataset,
    cfg: ChartConfig,
    selection: Selection,
    x_scale: LinearScale,
    y_scale: LinearScale,
    scene: Scene,
    tooltip: TooltipController,
    renders: u64,
}

impl ChartState {
    /// Initial draw at (poverty, healthcare).
    pub fn new(data: Dataset, cfg: ChartConfig) -> Self {
        Self::with_selection(data, cfg, Selection::default())
    }

    /// Initial draw at an arbitrary selection.
    pub fn with_selection(data: Dataset, cfg: ChartConfig, selection: Selection) -> Self {
        let xs = x_scale(&data, selection.x, &cfg);
        let ys = y_scale(&data, selection.y, &cfg);
        let scene = Scene::initial(&data, &cfg, &xs, &ys, selection);
        let mut tooltip = TooltipController::new();
        tooltip.bind(selection.x, selection.y, scene.labels().len());
        Self {
            data,
            cfg,
            selection,
            x_scale: xs,
            y_scale: ys,
            scene,
            tooltip,
            renders: 0,
        }
    }

    pub fn data(&self) -> &Dataset {
        &self.data
    }

    pub fn config(&self) -> &ChartConfig {
        &self.cfg
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn x_scale(&self) -> &LinearScale {
        &self.x_scale
    }

    pub fn y_scale(&self) -> &LinearScale {
        &self.y_scale
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Number of accepted transitions since the initial draw.
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Handle a click on the title for `metric` at clock time `now` (seconds).
    pub fn click(&mut self, metric: Metric, now: f64) -> Transition {
        if self.selection.is_selected(metric) {
            log::trace!("click on active title {metric} ignored");
            return Transition::Unchanged;
        }

        let axis = metric.axis();
        match metric {
            Metric::X(f) => self.selection.x = f,
            Metric::Y(f) => self.selection.y = f,
        }
        let scale = build_scale(&self.data, metric, &self.cfg);
        match axis {
            Axis::X => self.x_scale = scale,
            Axis::Y => self.y_scale = scale,
        }

        self.scene.render_axis(axis, &scale, now);
        self.scene.render_points(&self.data, &scale, metric, now);
        self.scene.render_labels(&self.data, &scale, metric, now);
        self.tooltip
            .bind(self.selection.x, self.selection.y, self.scene.labels().len());
        self.scene.update_emphasis(self.selection);
        self.renders += 1;

        log::debug!(
            "{:?} axis -> {} (domain {:?})",
            axis,
            metric,
            scale.domain()
        );
        Transition::Changed(axis)
    }

    pub fn select_x(&mut self, field: XField, now: f64) -> Transition {
        self.click(Metric::X(field), now)
    }

    pub fn select_y(&mut self, field: YField, now: f64) -> Transition {
        self.click(Metric::Y(field), now)
    }

    pub fn hover_enter(&mut self, label: usize) -> Option<&Tooltip> {
        self.tooltip.hover_enter(&self.data, label)
    }

    pub fn hover_leave(&mut self) {
        self.tooltip.hover_leave();
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.visible()
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.scene.is_animating(now)
    }

    /// Scene at `now`, with the visible tooltip placed above its label.
    pub fn frame(&self, now: f64) -> Frame {
        let mut frame = self.scene.frame(now);
        frame.tooltip = self.tooltip.visible().and_then(|t| {
            let label = frame.labels.get(t.target)?;
            Some(TooltipFrame {
                record: t.target,
                anchor: (label.x, label.y - TOOLTIP_GAP_PX),
                text: t.text.clone(),
            })
        });
        frame
    }

    /// Plotted values per record under the current selection.
    pub fn plot_rows(&self) -> Vec<PlotRow> {
        let sel = self.selection;
        self.data
            .records()
            .iter()
            .map(|r| PlotRow {
                state: r.state.clone(),
                abbr: r.abbr.clone(),
                x_field: sel.x.key(),
                x_value: sel.x.value(r),
                x_px: self.x_scale.map(sel.x.value(r)),
                y_field: sel.y.key(),
                y_value: sel.y.value(r),
                y_px: self.y_scale.map(sel.y.value(r)),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StateRecord;

    fn state() -> ChartState {
        let data = Dataset::new(vec![
            StateRecord::new(1, "Alabama", "AL", 19.3, 38.6, 42830.0, 13.9, 21.1, 33.5),
            StateRecord::new(2, "Alaska", "AK", 11.2, 33.3, 71583.0, 15.0, 19.9, 29.7),
        ])
        .unwrap();
        ChartState::new(data, ChartConfig::default())
    }

    #[test]
    fn initial_selection_and_binding() {
        let s = state();
        assert_eq!(s.selection(), Selection::default());
        assert_eq!(s.render_count(), 0);
        assert!(!s.is_animating(0.0));
    }

    #[test]
    fn accepted_click_starts_animation() {
        let mut s = state();
        assert_eq!(s.select_y(YField::Smokes, 10.0), Transition::Changed(Axis::Y));
        assert!(s.is_animating(10.5));
        assert!(!s.is_animating(11.0));
    }

    #[test]
    fn plot_rows_follow_selection() {
        let mut s = state();
        s.select_x(XField::Income, 0.0);
        let rows = s.plot_rows();
        assert_eq!(rows[1].x_field, "income");
        assert_eq!(rows[1].x_value, 71583.0);
        assert_eq!(rows[1].y_field, "healthcare");
    }
}

//! Retained scene: one circle and one abbreviation per record, two axes and
//! six clickable axis titles.
//!
//! Primitives are created once by [`Scene::initial`] and afterwards only
//! re-targeted. Every positional change is a [`Tween`] evaluated against the
//! caller's clock (`now`, in seconds), so the same scene drives the live GUI
//! and one-off SVG renders. All coordinates are relative to the top-left
//! corner of the plot area (inside the margins).

use crate::config::ChartConfig;
use crate::models::{Axis, Dataset, Metric, Selection, XField, YField};
use crate::scale::LinearScale;
use serde::Serialize;

/// Cubic in-out easing on `t` in [0, 1].
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// A single animated scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    start: f64,
    duration: f64,
}

impl Tween {
    /// A value at rest.
    pub fn fixed(v: f64) -> Self {
        Self {
            from: v,
            to: v,
            start: 0.0,
            duration: 0.0,
        }
    }

    /// Eased progress in [0, 1].
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ease_cubic_in_out(((now - self.start) / self.duration).clamp(0.0, 1.0))
    }

    pub fn value_at(&self, now: f64) -> f64 {
        self.from + (self.to - self.from) * self.progress(now)
    }

    /// Final value once the transition completes.
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Start a new transition from wherever the value is at `now`.
    pub fn retarget(&mut self, to: f64, now: f64, duration: f64) {
        self.from = self.value_at(now);
        self.to = to;
        self.start = now;
        self.duration = duration;
    }

    pub fn is_done(&self, now: f64) -> bool {
        self.duration <= 0.0 || now >= self.start + self.duration
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointPrimitive {
    /// Index of the bound record in the dataset.
    pub record: usize,
    pub cx: Tween,
    pub cy: Tween,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelPrimitive {
    pub record: usize,
    pub text: String,
    pub x: Tween,
    pub y: Tween,
}

/// Tick ruler for one axis. Keeps the scale it is leaving so ticks can slide.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisPrimitive {
    pub axis: Axis,
    previous: Option<LinearScale>,
    current: LinearScale,
    start: f64,
    duration: f64,
    tick_count: usize,
}

/// One tick resolved at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickMark {
    pub value: f64,
    /// Pixel position along the axis.
    pub offset: f64,
    pub opacity: f64,
}

impl AxisPrimitive {
    fn new(axis: Axis, scale: LinearScale, tick_count: usize) -> Self {
        Self {
            axis,
            previous: None,
            current: scale,
            start: 0.0,
            duration: 0.0,
            tick_count,
        }
    }

    fn progress(&self, now: f64) -> f64 {
        if self.previous.is_none() || self.duration <= 0.0 {
            return 1.0;
        }
        ease_cubic_in_out(((now - self.start) / self.duration).clamp(0.0, 1.0))
    }

    /// Scale this axis is heading to.
    pub fn scale(&self) -> &LinearScale {
        &self.current
    }

    /// Scale as currently displayed (mid-transition domains are interpolated).
    pub fn scale_at(&self, now: f64) -> LinearScale {
        match &self.previous {
            Some(prev) => prev.lerp(&self.current, self.progress(now)),
            None => self.current,
        }
    }

    fn retarget(&mut self, scale: LinearScale, now: f64, duration: f64) {
        self.previous = Some(self.scale_at(now));
        self.current = scale;
        self.start = now;
        self.duration = duration;
    }

    pub fn is_done(&self, now: f64) -> bool {
        self.previous.is_none() || now >= self.start + self.duration
    }

    /// Ticks at `now`. Surviving ticks slide from their old position, new ones
    /// fade in and removed ones fade out while following the new scale.
    pub fn ticks_at(&self, now: f64) -> Vec<TickMark> {
        let target = self.current.ticks(self.tick_count);
        let Some(prev) = self.previous.filter(|_| !self.is_done(now)) else {
            return target
                .into_iter()
                .map(|value| TickMark {
                    value,
                    offset: self.current.map(value),
                    opacity: 1.0,
                })
                .collect();
        };

        let t = self.progress(now);
        let old = prev.ticks(self.tick_count);
        let slide = |v: f64| prev.map(v) + (self.current.map(v) - prev.map(v)) * t;
        let contains = |set: &[f64], v: f64| set.iter().any(|o| (o - v).abs() < 1e-9);

        let mut marks: Vec<TickMark> = target
            .iter()
            .map(|&value| TickMark {
                value,
                offset: slide(value),
                opacity: if contains(&old, value) { 1.0 } else { t },
            })
            .collect();
        marks.extend(
            old.iter()
                .filter(|&&v| !contains(&target, v))
                .map(|&value| TickMark {
                    value,
                    offset: slide(value),
                    opacity: 1.0 - t,
                }),
        );
        marks
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Emphasis {
    Active,
    Inactive,
}

/// A clickable axis title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTitle {
    pub metric: Metric,
    pub text: &'static str,
    /// Centre of the text.
    pub anchor: (f64, f64),
    /// Drawn rotated by -90° (y titles).
    pub rotated: bool,
    pub emphasis: Emphasis,
}

impl AxisTitle {
    pub fn is_active(&self) -> bool {
        self.emphasis == Emphasis::Active
    }
}

fn axis_titles(cfg: &ChartConfig, selection: Selection) -> Vec<AxisTitle> {
    let (w, h) = (cfg.inner_width(), cfg.inner_height());
    let xs = XField::ALL.into_iter().enumerate().map(|(i, f)| AxisTitle {
        metric: Metric::X(f),
        text: f.label(),
        anchor: (w / 2.0, h + 20.0 + 20.0 * (i as f64 + 1.0)),
        rotated: false,
        emphasis: Emphasis::Inactive,
    });
    let ys = YField::ALL.into_iter().enumerate().map(|(i, f)| AxisTitle {
        metric: Metric::Y(f),
        text: f.label(),
        anchor: (-cfg.margin.left + 60.0 - 20.0 * i as f64, h / 2.0),
        rotated: true,
        emphasis: Emphasis::Inactive,
    });
    let mut titles: Vec<AxisTitle> = xs.chain(ys).collect();
    apply_emphasis(&mut titles, selection);
    titles
}

fn apply_emphasis(titles: &mut [AxisTitle], selection: Selection) {
    for t in titles {
        t.emphasis = if selection.is_selected(t.metric) {
            Emphasis::Active
        } else {
            Emphasis::Inactive
        };
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointFrame {
    pub record: usize,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelFrame {
    pub record: usize,
    pub text: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisFrame {
    pub axis: Axis,
    pub ticks: Vec<TickMark>,
    /// Spacing of the target ticks, for label precision.
    pub step: Option<f64>,
}

/// Tooltip placed above ("north of") the hovered abbreviation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipFrame {
    pub record: usize,
    /// Bottom-centre of the tooltip box.
    pub anchor: (f64, f64),
    pub text: String,
}

/// Every primitive resolved at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    /// Top-left corner of the plot area on the canvas.
    pub origin: (f64, f64),
    pub inner_width: f64,
    pub inner_height: f64,
    pub points: Vec<PointFrame>,
    pub labels: Vec<LabelFrame>,
    pub x_axis: AxisFrame,
    pub y_axis: AxisFrame,
    pub titles: Vec<AxisTitle>,
    pub tooltip: Option<TooltipFrame>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    cfg: ChartConfig,
    points: Vec<PointPrimitive>,
    labels: Vec<LabelPrimitive>,
    x_axis: AxisPrimitive,
    y_axis: AxisPrimitive,
    titles: Vec<AxisTitle>,
}

impl Scene {
    /// Create all primitives, positioned from both scales at once.
    pub fn initial(
        data: &Dataset,
        cfg: &ChartConfig,
        x: &LinearScale,
        y: &LinearScale,
        selection: Selection,
    ) -> Self {
        let mut points = Vec::with_capacity(data.len());
        let mut labels = Vec::with_capacity(data.len());
        for (i, rec) in data.records().iter().enumerate() {
            let px = x.map(selection.x.value(rec));
            let py = y.map(selection.y.value(rec));
            points.push(PointPrimitive {
                record: i,
                cx: Tween::fixed(px),
                cy: Tween::fixed(py),
                radius: cfg.point_radius,
            });
            labels.push(LabelPrimitive {
                record: i,
                text: rec.abbr.clone(),
                x: Tween::fixed(px),
                y: Tween::fixed(py + cfg.label_nudge_px),
            });
        }
        Self {
            cfg: cfg.clone(),
            points,
            labels,
            x_axis: AxisPrimitive::new(Axis::X, *x, cfg.tick_count),
            y_axis: AxisPrimitive::new(Axis::Y, *y, cfg.tick_count),
            titles: axis_titles(cfg, selection),
        }
    }

    fn duration(&self) -> f64 {
        self.cfg.transition_secs()
    }

    pub fn config(&self) -> &ChartConfig {
        &self.cfg
    }

    pub fn points(&self) -> &[PointPrimitive] {
        &self.points
    }

    pub fn labels(&self) -> &[LabelPrimitive] {
        &self.labels
    }

    pub fn titles(&self) -> &[AxisTitle] {
        &self.titles
    }

    pub fn axis(&self, axis: Axis) -> &AxisPrimitive {
        match axis {
            Axis::X => &self.x_axis,
            Axis::Y => &self.y_axis,
        }
    }

    /// Animate one axis's ticks to a new scale.
    pub fn render_axis(&mut self, axis: Axis, scale: &LinearScale, now: f64) {
        let d = self.duration();
        match axis {
            Axis::X => self.x_axis.retarget(*scale, now, d),
            Axis::Y => self.y_axis.retarget(*scale, now, d),
        }
    }

    /// Move every circle along the metric's axis only.
    pub fn render_points(&mut self, data: &Dataset, scale: &LinearScale, metric: Metric, now: f64) {
        let d = self.duration();
        for p in &mut self.points {
            let Some(rec) = data.get(p.record) else { continue };
            let target = scale.map(metric.value(rec));
            match metric.axis() {
                Axis::X => p.cx.retarget(target, now, d),
                Axis::Y => p.cy.retarget(target, now, d),
            }
        }
    }

    /// Move every abbreviation along the metric's axis only.
    pub fn render_labels(&mut self, data: &Dataset, scale: &LinearScale, metric: Metric, now: f64) {
        let d = self.duration();
        let nudge = self.cfg.label_nudge_px;
        for l in &mut self.labels {
            let Some(rec) = data.get(l.record) else { continue };
            let target = scale.map(metric.value(rec));
            match metric.axis() {
                Axis::X => l.x.retarget(target, now, d),
                Axis::Y => l.y.retarget(target + nudge, now, d),
            }
        }
    }

    /// Mark exactly the selected title on each axis as active.
    pub fn update_emphasis(&mut self, selection: Selection) {
        apply_emphasis(&mut self.titles, selection);
    }

    pub fn is_animating(&self, now: f64) -> bool {
        !self.x_axis.is_done(now)
            || !self.y_axis.is_done(now)
            || self.points.iter().any(|p| !p.cx.is_done(now) || !p.cy.is_done(now))
            || self.labels.iter().any(|l| !l.x.is_done(now) || !l.y.is_done(now))
    }

    pub fn frame(&self, now: f64) -> Frame {
        let axis_frame = |a: &AxisPrimitive| AxisFrame {
            axis: a.axis,
            ticks: a.ticks_at(now),
            step: a.scale().tick_step(a.tick_count),
        };
        Frame {
            width: self.cfg.width,
            height: self.cfg.height,
            origin: (self.cfg.margin.left, self.cfg.margin.top),
            inner_width: self.cfg.inner_width(),
            inner_height: self.cfg.inner_height(),
            points: self
                .points
                .iter()
                .map(|p| PointFrame {
                    record: p.record,
                    cx: p.cx.value_at(now),
                    cy: p.cy.value_at(now),
                    radius: p.radius,
                })
                .collect(),
            labels: self
                .labels
                .iter()
                .map(|l| LabelFrame {
                    record: l.record,
                    text: l.text.clone(),
                    x: l.x.value_at(now),
                    y: l.y.value_at(now),
                })
                .collect(),
            x_axis: axis_frame(&self.x_axis),
            y_axis: axis_frame(&self.y_axis),
            titles: self.titles.clone(),
            tooltip: None,
        }
    }
}

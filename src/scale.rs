//! Linear scales from metric values to plot-area pixels.

use crate::config::ChartConfig;
use crate::models::{Dataset, Metric, XField, YField};
use serde::{Deserialize, Serialize};

/// Lower x-domain bound as a fraction of the smallest value.
pub const X_DOMAIN_PAD_LOW: f64 = 0.8;
/// Upper domain bound (both axes) as a multiple of the largest value.
pub const DOMAIN_PAD_HIGH: f64 = 1.2;

/// Affine map from a numeric domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map a domain value to pixels. A zero-width domain maps to the range midpoint.
    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span == 0.0 { 0.5 } else { (v - d0) / span };
        r0 + (r1 - r0) * t
    }

    /// Map a pixel position back to the domain.
    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        let t = if span == 0.0 { 0.5 } else { (px - r0) / span };
        d0 + (d1 - d0) * t
    }

    /// Scale whose domain endpoints are interpolated between `self` and `other`.
    pub fn lerp(&self, other: &LinearScale, t: f64) -> LinearScale {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        LinearScale {
            domain: (mix(self.domain.0, other.domain.0), mix(self.domain.1, other.domain.1)),
            range: (mix(self.range.0, other.range.0), mix(self.range.1, other.range.1)),
        }
    }

    /// Distance between consecutive ticks for roughly `count` ticks, or `None`
    /// when the domain is empty.
    pub fn tick_step(&self, count: usize) -> Option<f64> {
        let (lo, hi) = ordered(self.domain);
        if count == 0 || !(hi > lo) {
            return None;
        }
        let (inc, _) = tick_increment(lo, hi, count);
        Some(inc)
    }

    /// Round tick values (1, 2 or 5 × 10^k apart) lying inside the domain, ascending.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = ordered(self.domain);
        if count == 0 || !lo.is_finite() || !hi.is_finite() {
            return Vec::new();
        }
        if hi == lo {
            return vec![lo];
        }
        let (inc, power) = tick_increment(lo, hi, count);
        let (start, stop) = ((lo / inc).ceil() as i64, (hi / inc).floor() as i64);
        (start..=stop)
            .map(|i| {
                if power >= 0 {
                    i as f64 * inc
                } else {
                    // Divide by an integer so e.g. 0.3 prints as 0.3, not 0.30000000000000004.
                    i as f64 / (1.0 / inc).round()
                }
            })
            .collect()
    }
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Returns (step, power-of-ten exponent of the step).
fn tick_increment(lo: f64, hi: f64, count: usize) -> (f64, i32) {
    let raw = (hi - lo) / count as f64;
    let power = raw.log10().floor() as i32;
    let error = raw / 10f64.powi(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    let step = factor * 10f64.powi(power);
    let power = if factor == 10.0 { power + 1 } else { power };
    (step, power)
}

/// Horizontal scale: domain [0.8·min, 1.2·max] onto [0, inner width].
pub fn x_scale(data: &Dataset, field: XField, cfg: &ChartConfig) -> LinearScale {
    let (min, max) = data.extent(Metric::X(field));
    LinearScale::new(
        (min * X_DOMAIN_PAD_LOW, max * DOMAIN_PAD_HIGH),
        (0.0, cfg.inner_width()),
    )
}

/// Vertical scale: domain [0, 1.2·max] onto [inner height, 0].
pub fn y_scale(data: &Dataset, field: YField, cfg: &ChartConfig) -> LinearScale {
    let (_, max) = data.extent(Metric::Y(field));
    LinearScale::new((0.0, max * DOMAIN_PAD_HIGH), (cfg.inner_height(), 0.0))
}

/// Scale for whichever axis `metric` belongs to.
pub fn build_scale(data: &Dataset, metric: Metric, cfg: &ChartConfig) -> LinearScale {
    match metric {
        Metric::X(f) => x_scale(data, f, cfg),
        Metric::Y(f) => y_scale(data, f, cfg),
    }
}

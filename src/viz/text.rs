//! Text measurement and hit boxes for labels drawn without a font rasterizer.

use crate::models::Metric;
use crate::scene::Frame;

/// Font size of the state abbreviations inside the circles.
pub const LABEL_FONT_PX: u32 = 10;
/// Font size of the clickable axis titles.
pub const TITLE_FONT_PX: u32 = 14;
/// Font size of tick labels.
pub const TICK_FONT_PX: u32 = 12;

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Axis-aligned rectangle in plot-area coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitBox {
    pub min: (f64, f64),
    pub max: (f64, f64),
}

impl HitBox {
    /// Box of `w`×`h` centred on `c`.
    pub fn centered(c: (f64, f64), w: f64, h: f64) -> Self {
        Self {
            min: (c.0 - w / 2.0, c.1 - h / 2.0),
            max: (c.0 + w / 2.0, c.1 + h / 2.0),
        }
    }

    pub fn contains(&self, p: (f64, f64)) -> bool {
        p.0 >= self.min.0 && p.0 <= self.max.0 && p.1 >= self.min.1 && p.1 <= self.max.1
    }
}

impl Frame {
    /// Clickable area of every axis title.
    pub fn title_boxes(&self) -> Vec<(Metric, HitBox)> {
        self.titles
            .iter()
            .map(|t| {
                let w = estimate_text_width_px(t.text, TITLE_FONT_PX) as f64;
                let h = TITLE_FONT_PX as f64 + 4.0;
                let b = if t.rotated {
                    HitBox::centered(t.anchor, h, w)
                } else {
                    HitBox::centered(t.anchor, w, h)
                };
                (t.metric, b)
            })
            .collect()
    }

    /// Axis title under plot-area point `p`.
    pub fn title_at(&self, p: (f64, f64)) -> Option<Metric> {
        self.title_boxes()
            .into_iter()
            .find(|(_, b)| b.contains(p))
            .map(|(m, _)| m)
    }

    /// Abbreviation glyph under plot-area point `p`; the last drawn wins.
    pub fn label_at(&self, p: (f64, f64)) -> Option<usize> {
        self.labels
            .iter()
            .rev()
            .find(|l| {
                let w = estimate_text_width_px(&l.text, LABEL_FONT_PX) as f64;
                // Text baseline sits at `y`; the glyphs occupy the box just above it.
                let c = (l.x, l.y - LABEL_FONT_PX as f64 / 2.0);
                HitBox::centered(c, w, LABEL_FONT_PX as f64).contains(p)
            })
            .map(|l| l.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_grows_with_length() {
        assert_eq!(estimate_text_width_px("AL", 10), 12);
        assert!(estimate_text_width_px("Lacks Healthcare (%)", 14) > 100);
    }

    #[test]
    fn hit_box_contains_edges() {
        let b = HitBox::centered((0.0, 0.0), 10.0, 4.0);
        assert!(b.contains((5.0, 2.0)));
        assert!(!b.contains((5.1, 0.0)));
    }
}

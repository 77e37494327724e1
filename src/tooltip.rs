//! Hover annotations for the state abbreviations.

use crate::models::{Dataset, StateRecord, XField, YField};

/// Tooltip body for one record: name, then the plotted x and y values.
pub fn tooltip_text(rec: &StateRecord, x: XField, y: YField) -> String {
    format!(
        "{}\n{}: {}\n{}: {}",
        rec.state,
        x.label(),
        x.value(rec),
        y.label(),
        y.value(rec)
    )
}

/// Fields the current hover handlers were bound with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooltipBinding {
    pub x: XField,
    pub y: YField,
    /// Number of label primitives with handlers attached.
    pub targets: usize,
}

/// Tooltip currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    /// Index of the hovered label (and its record).
    pub target: usize,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct TooltipController {
    binding: Option<TooltipBinding>,
    visible: Option<Tooltip>,
}

impl TooltipController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the hover handlers on all `targets` labels. Any visible tooltip
    /// was built for the old fields and is hidden.
    pub fn bind(&mut self, x: XField, y: YField, targets: usize) {
        self.binding = Some(TooltipBinding { x, y, targets });
        self.visible = None;
    }

    pub fn binding(&self) -> Option<TooltipBinding> {
        self.binding
    }

    /// Show the tooltip for label `target`. Returns `None` when nothing is
    /// bound or `target` has no handler.
    pub fn hover_enter(&mut self, data: &Dataset, target: usize) -> Option<&Tooltip> {
        let b = self.binding?;
        if target >= b.targets {
            return None;
        }
        let rec = data.get(target)?;
        self.visible = Some(Tooltip {
            target,
            text: tooltip_text(rec, b.x, b.y),
        });
        self.visible.as_ref()
    }

    pub fn hover_leave(&mut self) {
        self.visible = None;
    }

    pub fn visible(&self) -> Option<&Tooltip> {
        self.visible.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> Dataset {
        Dataset::new(vec![StateRecord::new(
            1, "Alabama", "AL", 19.3, 38.6, 42830.0, 13.9, 21.1, 33.5,
        )])
        .unwrap()
    }

    #[test]
    fn values_print_without_trailing_zero() {
        let rec = StateRecord::new(1, "Ohio", "OH", 10.0, 30.0, 50000.0, 5.0, 20.0, 25.0);
        assert_eq!(
            tooltip_text(&rec, XField::Income, YField::Obesity),
            "Ohio\nHousehold Income (Median): 50000\nObese (%): 25"
        );
    }

    #[test]
    fn nothing_shown_before_bind() {
        let d = data();
        let mut c = TooltipController::new();
        assert!(c.hover_enter(&d, 0).is_none());
        c.bind(XField::Age, YField::Smokes, d.len());
        let t = c.hover_enter(&d, 0).unwrap();
        assert_eq!(t.text, "Alabama\nAge (Median): 38.6\nSmokes (%): 21.1");
        assert!(c.hover_enter(&d, 5).is_none());
    }

    #[test]
    fn rebinding_hides_stale_tooltip() {
        let d = data();
        let mut c = TooltipController::new();
        c.bind(XField::Poverty, YField::Healthcare, d.len());
        c.hover_enter(&d, 0);
        assert!(c.visible().is_some());
        c.bind(XField::Income, YField::Healthcare, d.len());
        assert!(c.visible().is_none());
    }
}

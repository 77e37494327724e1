//! Utility functions for visualization: colors, locale mapping, tick formatting.

use num_format::{Locale, ToFormattedString};
use plotters::prelude::*;

/// Circle fill (before opacity).
pub const POINT_COLOR: RGBColor = RGBColor(0, 0, 255);
pub const POINT_OPACITY: f64 = 0.75;
/// Fill of inactive axis titles.
pub const INACTIVE_TITLE_COLOR: RGBColor = RGBColor(170, 170, 170);
/// Tooltip background.
pub const TOOLTIP_BACKGROUND: RGBColor = RGBColor(30, 30, 30);

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'), // default
    }
}

/// Decimal places needed to tell ticks `step` apart.
pub fn tick_precision(step: Option<f64>) -> usize {
    match step {
        Some(s) if s > 0.0 && s < 1.0 => (-s.log10() - 1e-9).ceil().max(0.0) as usize,
        _ => 0,
    }
}

/// Format a tick value with thousands separators and just enough decimals for `step`.
pub fn format_tick(value: f64, step: Option<f64>, locale_tag: &str) -> String {
    let (locale, dec_sep) = map_locale(locale_tag);
    let prec = tick_precision(step);
    let rounded = format!("{:.*}", prec, value);
    let (int_part, frac_part) = match rounded.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rounded.as_str(), None),
    };
    let negative = int_part.starts_with('-');
    let digits: i64 = int_part.trim_start_matches('-').parse().unwrap_or(0);
    let mut out = String::new();
    if negative && (digits != 0 || frac_part.is_some_and(|f| f.chars().any(|c| c != '0'))) {
        out.push('-');
    }
    out.push_str(&digits.to_formatted_string(locale));
    if let Some(f) = frac_part {
        out.push(dec_sep);
        out.push_str(f);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_ticks_get_grouping() {
        assert_eq!(format_tick(40000.0, Some(5000.0), "en"), "40,000");
        assert_eq!(format_tick(40000.0, Some(5000.0), "de"), "40.000");
    }

    #[test]
    fn fractional_ticks_keep_step_precision() {
        assert_eq!(format_tick(8.5, Some(0.5), "en"), "8.5");
        assert_eq!(format_tick(9.0, Some(0.5), "en"), "9.0");
        assert_eq!(format_tick(0.25, Some(0.05), "de"), "0,25");
    }

    #[test]
    fn negative_zero_prints_as_zero() {
        assert_eq!(format_tick(-0.0001, Some(1.0), "en"), "0");
        assert_eq!(format_tick(-2.0, Some(1.0), "en"), "-2");
    }
}

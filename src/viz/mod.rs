//! Visualization: draw a resolved [`Frame`] to **SVG**.
//!
//! - Blue, 75%-opaque circles with white bold abbreviations on top
//! - Bottom and left axes with locale-aware tick labels (`40,000` vs `40.000`)
//! - Six axis titles; the active one per axis is bold black, the others grey
//! - The visible tooltip, if any, above its abbreviation
//!
//! Ticks fading in or out mid-transition are drawn with their current opacity,
//! so a frame taken during an animation looks exactly like the GUI at that instant.

pub mod text;
pub mod util;

use crate::scene::{AxisFrame, Frame, TooltipFrame};
use crate::models::Axis;
use anyhow::{Result, anyhow};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use plotters_svg::SVGBackend;

use std::path::Path;

use text::{LABEL_FONT_PX, TICK_FONT_PX, TITLE_FONT_PX, estimate_text_width_px};
use util::{INACTIVE_TITLE_COLOR, POINT_COLOR, POINT_OPACITY, TOOLTIP_BACKGROUND, format_tick};

/// Length of a tick mark in pixels.
const TICK_SIZE: i32 = 6;
/// Gap between a tick mark and its label.
const TICK_PADDING: i32 = 3;

/// Write `frame` as an SVG file.
pub fn render_svg<P: AsRef<Path>>(frame: &Frame, out_path: P, locale_tag: &str) -> Result<()> {
    let out_path = out_path.as_ref();
    let size = canvas_size(frame)?;
    let root = SVGBackend::new(out_path, size).into_drawing_area();
    draw_frame(root, frame, locale_tag)
}

/// Render `frame` to an in-memory SVG document.
pub fn render_svg_string(frame: &Frame, locale_tag: &str) -> Result<String> {
    let size = canvas_size(frame)?;
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, size).into_drawing_area();
        draw_frame(root, frame, locale_tag)?;
    }
    Ok(buf)
}

fn canvas_size(frame: &Frame) -> Result<(u32, u32)> {
    if frame.width < 1.0 || frame.height < 1.0 {
        return Err(anyhow!(
            "canvas too small: {}x{}",
            frame.width,
            frame.height
        ));
    }
    Ok((frame.width.round() as u32, frame.height.round() as u32))
}

/// Helper that draws to any Plotters backend.
fn draw_frame<DB>(root: DrawingArea<DB, Shift>, frame: &Frame, locale_tag: &str) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    // Plot-area coordinates -> canvas pixels.
    let (ox, oy) = frame.origin;
    let px = |x: f64, y: f64| ((ox + x).round() as i32, (oy + y).round() as i32);

    draw_axis(&root, frame, &frame.x_axis, locale_tag, &px)?;
    draw_axis(&root, frame, &frame.y_axis, locale_tag, &px)?;

    let fill = POINT_COLOR.mix(POINT_OPACITY).filled();
    for p in &frame.points {
        root.draw(&Circle::new(px(p.cx, p.cy), p.radius.round() as i32, fill))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    let label_style = TextStyle::from(
        (FontFamily::SansSerif, LABEL_FONT_PX as f64)
            .into_font()
            .style(FontStyle::Bold),
    )
    .color(&WHITE)
    .pos(Pos::new(HPos::Center, VPos::Bottom));
    for l in &frame.labels {
        root.draw(&Text::new(l.text.clone(), px(l.x, l.y), label_style.clone()))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    for t in &frame.titles {
        let (color, weight) = if t.is_active() {
            (BLACK, FontStyle::Bold)
        } else {
            (INACTIVE_TITLE_COLOR, FontStyle::Normal)
        };
        let mut font = (FontFamily::SansSerif, TITLE_FONT_PX as f64)
            .into_font()
            .style(weight);
        if t.rotated {
            font = font.transform(FontTransform::Rotate270);
        }
        let style = TextStyle::from(font)
            .color(&color)
            .pos(Pos::new(HPos::Center, VPos::Center));
        root.draw(&Text::new(t.text, px(t.anchor.0, t.anchor.1), style))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    if let Some(tip) = &frame.tooltip {
        draw_tooltip(&root, tip, &px)?;
    }

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

fn draw_axis<DB, F>(
    root: &DrawingArea<DB, Shift>,
    frame: &Frame,
    axis: &AxisFrame,
    locale_tag: &str,
    px: &F,
) -> Result<()>
where
    DB: DrawingBackend,
    F: Fn(f64, f64) -> (i32, i32),
{
    let (w, h) = (frame.inner_width, frame.inner_height);
    let domain_line = match axis.axis {
        Axis::X => vec![px(0.0, h), px(w, h)],
        Axis::Y => vec![px(0.0, 0.0), px(0.0, h)],
    };
    root.draw(&PathElement::new(domain_line, BLACK.stroke_width(1)))
        .map_err(|e| anyhow!("{:?}", e))?;

    let font = (FontFamily::SansSerif, TICK_FONT_PX as f64).into_font();
    for tick in &axis.ticks {
        if tick.opacity <= 0.0 {
            continue;
        }
        let color = BLACK.mix(tick.opacity);
        let label = format_tick(tick.value, axis.step, locale_tag);
        let (mark, anchor, pos) = match axis.axis {
            Axis::X => {
                let (x, y) = px(tick.offset, h);
                (
                    vec![(x, y), (x, y + TICK_SIZE)],
                    (x, y + TICK_SIZE + TICK_PADDING),
                    Pos::new(HPos::Center, VPos::Top),
                )
            }
            Axis::Y => {
                let (x, y) = px(0.0, tick.offset);
                (
                    vec![(x - TICK_SIZE, y), (x, y)],
                    (x - TICK_SIZE - TICK_PADDING, y),
                    Pos::new(HPos::Right, VPos::Center),
                )
            }
        };
        root.draw(&PathElement::new(mark, color.stroke_width(1)))
            .map_err(|e| anyhow!("{:?}", e))?;
        let style = TextStyle::from(font.clone()).color(&color).pos(pos);
        root.draw(&Text::new(label, anchor, style))
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}

fn draw_tooltip<DB, F>(root: &DrawingArea<DB, Shift>, tip: &TooltipFrame, px: &F) -> Result<()>
where
    DB: DrawingBackend,
    F: Fn(f64, f64) -> (i32, i32),
{
    let font_px = TICK_FONT_PX as i32;
    let line_h = font_px + 4;
    let pad = 6;
    let lines: Vec<&str> = tip.text.lines().collect();
    let text_w = lines
        .iter()
        .map(|l| estimate_text_width_px(l, TICK_FONT_PX) as i32)
        .max()
        .unwrap_or(0);
    let box_w = text_w + 2 * pad;
    let box_h = line_h * lines.len() as i32 + 2 * pad;

    let (cx, bottom) = px(tip.anchor.0, tip.anchor.1);
    let (left, top) = (cx - box_w / 2, bottom - box_h);
    root.draw(&Rectangle::new(
        [(left, top), (left + box_w, bottom)],
        TOOLTIP_BACKGROUND.mix(0.85).filled(),
    ))
    .map_err(|e| anyhow!("{:?}", e))?;

    let style = TextStyle::from((FontFamily::SansSerif, TICK_FONT_PX as f64).into_font())
        .color(&WHITE)
        .pos(Pos::new(HPos::Center, VPos::Top));
    for (i, line) in lines.iter().enumerate() {
        let y = top + pad + i as i32 * line_h;
        root.draw(&Text::new(line.to_string(), (cx, y), style.clone()))
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}

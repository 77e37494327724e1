/*!
 * Desktop application for statescatter - interactive U.S. state scatter plot
 *
 * - Loads the dataset in the background, then draws the chart
 * - Click an axis title to plot that metric; points and ticks animate
 * - Hover a state abbreviation for its values
 * - Export the current frame as SVG
 *
 * Platform support: Windows, macOS, Linux
 */

use clap::Parser;
use eframe::egui;
use egui::epaint::TextShape;
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Sense, Stroke, Vec2};
use statescatter::loader::{self, DEFAULT_DATA_PATH, LoadError};
use statescatter::scene::Frame;
use statescatter::viz::{self, text, util::format_tick};
use statescatter::{Axis, ChartConfig, ChartState, Dataset};
use std::f32::consts::FRAC_PI_2;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

#[derive(Parser, Debug)]
#[command(name = "statescatter-gui", version, about = "Interactive state scatter plot")]
struct GuiArgs {
    /// CSV path or http(s) URL of the dataset.
    #[arg(short, long, default_value = DEFAULT_DATA_PATH)]
    data: String,
    /// JSON file overriding chart geometry and animation settings.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), eframe::Error> {
    env_logger::init();
    let args = GuiArgs::parse();

    let cfg = match &args.config {
        Some(path) => ChartConfig::from_json_file(path).unwrap_or_else(|err| {
            log::warn!("ignoring config {}: {}", path.display(), err);
            ChartConfig::default()
        }),
        None => ChartConfig::default(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([cfg.width as f32 + 40.0, cfg.height as f32 + 90.0])
            .with_min_inner_size([600.0, 400.0])
            .with_title("State Scatter - statescatter"),
        ..Default::default()
    };

    eframe::run_native(
        "State Scatter",
        options,
        Box::new(move |_cc| Ok(Box::new(ScatterApp::new(args.data, cfg)))),
    )
}

/// Main application state
struct ScatterApp {
    source: String,
    cfg: ChartConfig,
    locale: String,

    // Chart state, present once the dataset has loaded
    chart: Option<ChartState>,
    hovered: Option<usize>,

    // UI state
    status_message: String,
    error_message: String,

    // Background load
    load_receiver: Option<mpsc::Receiver<Result<Dataset, LoadError>>>,
}

impl ScatterApp {
    fn new(source: String, cfg: ChartConfig) -> Self {
        let (sender, receiver) = mpsc::channel();
        let src = source.clone();
        thread::spawn(move || {
            let _ = sender.send(loader::load_source(&src));
        });

        Self {
            source,
            cfg,
            locale: "en".to_string(),
            chart: None,
            hovered: None,
            status_message: "Loading dataset...".to_string(),
            error_message: String::new(),
            load_receiver: Some(receiver),
        }
    }

    fn check_load_result(&mut self) {
        let Some(receiver) = &self.load_receiver else {
            return;
        };
        if let Ok(result) = receiver.try_recv() {
            self.load_receiver = None;
            match result {
                Ok(data) => {
                    self.status_message = format!("Loaded {} states", data.len());
                    self.chart = Some(ChartState::new(data, self.cfg.clone()));
                }
                Err(err) => {
                    // Nothing is drawn without data.
                    log::error!("failed to load {}: {}", self.source, err);
                    self.error_message = format!("Failed to load {}: {}", self.source, err);
                    self.status_message.clear();
                }
            }
        }
    }

    fn export_svg(&mut self, now: f64) {
        let Some(chart) = &self.chart else { return };
        let start_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let Some(path) = rfd::FileDialog::new()
            .add_filter("SVG", &["svg"])
            .set_directory(start_dir)
            .set_file_name("statescatter.svg")
            .save_file()
        else {
            return;
        };
        match viz::render_svg(&chart.frame(now), &path, &self.locale) {
            Ok(()) => {
                self.status_message = format!("Wrote {}", path.display());
                self.error_message.clear();
            }
            Err(err) => self.error_message = format!("Failed to export SVG: {}", err),
        }
    }
}

impl eframe::App for ScatterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_result();
        let now = ctx.input(|i| i.time);

        if self.load_receiver.is_some() {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("Data: {}", self.source));
                ui.separator();
                egui::ComboBox::from_label("Locale")
                    .selected_text(self.locale.as_str())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.locale, "en".to_string(), "English (en)");
                        ui.selectable_value(&mut self.locale, "de".to_string(), "German (de)");
                        ui.selectable_value(&mut self.locale, "fr".to_string(), "French (fr)");
                    });
                if ui
                    .add_enabled(self.chart.is_some(), egui::Button::new("Export SVG"))
                    .clicked()
                {
                    self.export_svg(now);
                }
            });
            if !self.status_message.is_empty() {
                ui.colored_label(Color32::DARK_GREEN, self.status_message.as_str());
            }
            if !self.error_message.is_empty() {
                ui.colored_label(Color32::RED, self.error_message.as_str());
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.load_receiver.is_some() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Processing...");
                });
                return;
            }
            let Some(chart) = self.chart.as_mut() else {
                return;
            };

            let size = Vec2::new(self.cfg.width as f32, self.cfg.height as f32);
            let (response, painter) = ui.allocate_painter(size, Sense::click());
            let origin = response.rect.min
                + Vec2::new(self.cfg.margin.left as f32, self.cfg.margin.top as f32);
            let to_plot = |p: Pos2| ((p.x - origin.x) as f64, (p.y - origin.y) as f64);

            let before = chart.frame(now);
            if response.clicked() {
                if let Some(metric) = response
                    .interact_pointer_pos()
                    .and_then(|pos| before.title_at(to_plot(pos)))
                {
                    chart.click(metric, now);
                }
            }

            let hovered = response.hover_pos().and_then(|p| before.label_at(to_plot(p)));
            if hovered != self.hovered || (hovered.is_some() && chart.tooltip().is_none()) {
                match hovered {
                    Some(i) => {
                        chart.hover_enter(i);
                    }
                    None => chart.hover_leave(),
                }
                self.hovered = hovered;
            }

            paint_frame(&painter, &chart.frame(now), origin, &self.locale);

            if chart.is_animating(now) {
                ctx.request_repaint();
            }
        });
    }
}

fn paint_frame(painter: &Painter, frame: &Frame, origin: Pos2, locale: &str) {
    let at = |x: f64, y: f64| origin + Vec2::new(x as f32, y as f32);
    let (w, h) = (frame.inner_width, frame.inner_height);
    let axis_stroke = Stroke::new(1.0, Color32::BLACK);
    let tick_font = FontId::proportional(text::TICK_FONT_PX as f32);

    painter.line_segment([at(0.0, h), at(w, h)], axis_stroke);
    painter.line_segment([at(0.0, 0.0), at(0.0, h)], axis_stroke);
    for axis in [&frame.x_axis, &frame.y_axis] {
        for tick in axis.ticks.iter().filter(|t| t.opacity > 0.0) {
            let color = Color32::from_black_alpha((tick.opacity * 255.0).round() as u8);
            let label = format_tick(tick.value, axis.step, locale);
            match axis.axis {
                Axis::X => {
                    let p = at(tick.offset, h);
                    painter.line_segment([p, p + Vec2::new(0.0, 6.0)], Stroke::new(1.0, color));
                    painter.text(p + Vec2::new(0.0, 9.0), Align2::CENTER_TOP, label, tick_font.clone(), color);
                }
                Axis::Y => {
                    let p = at(0.0, tick.offset);
                    painter.line_segment([p - Vec2::new(6.0, 0.0), p], Stroke::new(1.0, color));
                    painter.text(p - Vec2::new(9.0, 0.0), Align2::RIGHT_CENTER, label, tick_font.clone(), color);
                }
            }
        }
    }

    let fill = Color32::from_rgba_unmultiplied(0, 0, 255, 191);
    for p in &frame.points {
        painter.circle_filled(at(p.cx, p.cy), p.radius as f32, fill);
    }
    let label_font = FontId::proportional(text::LABEL_FONT_PX as f32);
    for l in &frame.labels {
        painter.text(at(l.x, l.y), Align2::CENTER_BOTTOM, &l.text, label_font.clone(), Color32::WHITE);
    }

    let title_font = FontId::proportional(text::TITLE_FONT_PX as f32);
    for t in &frame.titles {
        let color = if t.is_active() {
            Color32::BLACK
        } else {
            Color32::from_gray(170)
        };
        let center = at(t.anchor.0, t.anchor.1);
        if t.rotated {
            let galley = painter.layout_no_wrap(t.text.to_string(), title_font.clone(), color);
            let s = galley.size();
            // Rotation pivots on the galley's top-left corner.
            let pos = center + Vec2::new(-s.y / 2.0, s.x / 2.0);
            painter.add(TextShape::new(pos, galley, color).with_angle(-FRAC_PI_2));
        } else {
            painter.text(center, Align2::CENTER_CENTER, t.text, title_font.clone(), color);
        }
    }

    if let Some(tip) = &frame.tooltip {
        let galley = painter.layout_no_wrap(tip.text.clone(), tick_font, Color32::WHITE);
        let pad = 6.0;
        let s = galley.size() + Vec2::splat(2.0 * pad);
        let bottom = at(tip.anchor.0, tip.anchor.1);
        let rect = Rect::from_min_size(Pos2::new(bottom.x - s.x / 2.0, bottom.y - s.y), s);
        painter.rect_filled(rect, 4.0, Color32::from_black_alpha(216));
        painter.galley(rect.min + Vec2::splat(pad), galley, Color32::WHITE);
    }
}

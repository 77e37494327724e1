use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use statescatter::loader::{self, DEFAULT_DATA_PATH};
use statescatter::{ChartConfig, ChartState, Dataset, XField, YField};
use statescatter::{stats, storage, tooltip, viz};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "statescatter",
    version,
    about = "Render U.S. state demographic scatter plots"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the chart for an axis selection to SVG (and optionally export rows / print stats).
    Render(RenderArgs),
    /// Print the hover tooltip for one state.
    Tooltip(TooltipArgs),
}

#[derive(Args, Debug)]
struct DataArgs {
    /// CSV path or http(s) URL of the dataset.
    #[arg(short, long, default_value = DEFAULT_DATA_PATH)]
    data: String,
    /// Metric on the x axis: poverty, age or income.
    #[arg(short = 'x', long = "x", default_value = "poverty")]
    x_field: XField,
    /// Metric on the y axis: healthcare, smokes or obesity.
    #[arg(short = 'y', long = "y", default_value = "healthcare")]
    y_field: YField,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    data: DataArgs,
    /// Output SVG path.
    #[arg(short, long)]
    out: PathBuf,
    /// JSON file overriding chart geometry and animation settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Locale for tick labels (e.g. en, de).
    #[arg(long, default_value = "en")]
    locale: String,
    /// Write the plotted rows to a .csv or .json file.
    #[arg(long)]
    export: Option<PathBuf>,
    /// Print per-metric statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

#[derive(Args, Debug)]
struct TooltipArgs {
    #[command(flatten)]
    data: DataArgs,
    /// State abbreviation (e.g. AL).
    #[arg(short, long)]
    state: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Tooltip(args) => cmd_tooltip(args),
    }
}

fn load(args: &DataArgs) -> Result<Dataset> {
    loader::load_source(&args.data).with_context(|| format!("failed to load {}", args.data))
}

/// Start from the default selection and click through to the requested one,
/// so the output matches what the GUI shows after the same clicks.
fn chart_for(data: Dataset, cfg: ChartConfig, args: &DataArgs) -> ChartState {
    let mut chart = ChartState::new(data, cfg);
    chart.select_x(args.x_field, 0.0);
    chart.select_y(args.y_field, 0.0);
    chart
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let cfg = match &args.config {
        Some(path) => ChartConfig::from_json_file(path)?,
        None => ChartConfig::default(),
    };
    let data = load(&args.data)?;
    let chart = chart_for(data, cfg, &args.data);

    // Past every transition.
    let settled = chart.config().transition_secs() + 1.0;
    viz::render_svg(&chart.frame(settled), &args.out, &args.locale)?;
    eprintln!("Wrote chart to {}", args.out.display());

    if let Some(path) = args.export.as_ref() {
        let rows = chart.plot_rows();
        storage::save_rows(&rows, path)?;
        eprintln!("Saved {} rows to {}", rows.len(), path.display());
    }

    if args.stats {
        for s in stats::summary_table(chart.data()) {
            println!(
                "{:<10}  count={} min={} max={} mean={} median={}",
                s.metric,
                s.count,
                fmt_num(s.min),
                fmt_num(s.max),
                fmt_num(s.mean),
                fmt_num(s.median)
            );
        }
    }
    Ok(())
}

fn cmd_tooltip(args: TooltipArgs) -> Result<()> {
    let data = load(&args.data)?;
    let idx = data
        .position_by_abbr(&args.state)
        .ok_or_else(|| anyhow::anyhow!("no state with abbreviation {:?}", args.state))?;
    let rec = &data.records()[idx];
    println!(
        "{}",
        tooltip::tooltip_text(rec, args.data.x_field, args.data.y_field)
    );
    Ok(())
}

fn fmt_num(x: f64) -> String {
    // Format up to 4 decimals, then trim trailing zeros and trailing dot.
    let s = format!("{:.4}", x);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

//! statescatter
//!
//! An interactive scatter plot of U.S. state demographic indicators. Clicking
//! an axis title swaps the plotted metric and animates circles, abbreviations
//! and ticks to their new positions. Pairs with the `statescatter` CLI and the
//! `statescatter-gui` desktop app.
//!
//! ### Features
//! - Load the per-state CSV from disk or over HTTP(S), rejecting non-numeric cells
//! - Linear scales padded 20% around the data (x) or anchored at zero (y)
//! - A retained scene whose transitions are evaluated against any clock
//! - Hover tooltips bound to the currently plotted fields
//! - SVG export of any animation frame, CSV/JSON export of the plotted rows
//!
//! ### Example
//! ```no_run
//! use statescatter::{ChartConfig, ChartState, XField};
//!
//! let data = statescatter::loader::load_source("assets/data/popData.csv")?;
//! let mut chart = ChartState::new(data, ChartConfig::default());
//! chart.select_x(XField::Age, 0.0);
//! // One second later the transition has settled.
//! statescatter::viz::render_svg(&chart.frame(1.0), "age_vs_healthcare.svg", "en")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod loader;
pub mod models;
pub mod scale;
pub mod scene;
pub mod state;
pub mod stats;
pub mod storage;
pub mod tooltip;
pub mod viz;

pub use config::ChartConfig;
pub use models::{Axis, Dataset, Metric, Selection, StateRecord, XField, YField};
pub use state::{ChartState, Transition};

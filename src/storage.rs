use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// One plotted state under the current axis selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotRow {
    pub state: String,
    pub abbr: String,
    pub x_field: &'static str,
    pub x_value: f64,
    /// Position inside the plot area once transitions settle.
    pub x_px: f64,
    pub y_field: &'static str,
    pub y_value: f64,
    pub y_px: f64,
}

/// Prefix cells that spreadsheet apps would evaluate as formulas.
fn sanitize_cell(s: &str) -> String {
    match s.chars().next() {
        Some('=' | '+' | '-' | '@') => format!("'{s}"),
        _ => s.to_string(),
    }
}

/// Save plotted rows as CSV with header.
pub fn save_csv<P: AsRef<Path>>(rows: &[PlotRow], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("state", "abbr", "x_field", "x_value", "x_px", "y_field", "y_value", "y_px"))?;
    for r in rows {
        wtr.serialize((
            sanitize_cell(&r.state),
            sanitize_cell(&r.abbr),
            r.x_field,
            r.x_value,
            r.x_px,
            r.y_field,
            r.y_value,
            r.y_px,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save plotted rows as pretty JSON array.
pub fn save_json<P: AsRef<Path>>(rows: &[PlotRow], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(rows)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Pick CSV or JSON from the file extension (CSV when absent or unknown).
pub fn save_rows<P: AsRef<Path>>(rows: &[PlotRow], path: P) -> Result<()> {
    let path = path.as_ref();
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("json") => save_json(rows, path),
        _ => save_csv(rows, path),
    }
}

use std::fs;
use std::path::PathBuf;
use statescatter::storage::{self, PlotRow};

fn sample(n: usize) -> Vec<PlotRow> {
    (0..n)
        .map(|i| PlotRow {
            state: format!("State {i}"),
            abbr: format!("S{i}"),
            x_field: "poverty",
            x_value: 10.0 + i as f64,
            x_px: 100.0 * i as f64,
            y_field: "healthcare",
            y_value: 5.0 + i as f64,
            y_px: 400.0 - 50.0 * i as f64,
        })
        .collect()
}

#[test]
fn save_csv_and_json() {
    let rows = sample(3);
    let tmp = tempfile::tempdir().unwrap();

    let csv_path: PathBuf = tmp.path().join("rows.csv");
    storage::save_csv(&rows, &csv_path).unwrap();
    let csv_txt = fs::read_to_string(&csv_path).unwrap();
    assert!(csv_txt.starts_with("state,abbr,x_field,x_value,x_px,"));
    assert_eq!(csv_txt.lines().count(), 1 + rows.len());

    let json_path: PathBuf = tmp.path().join("rows.json");
    storage::save_json(&rows, &json_path).unwrap();
    let json_txt = fs::read_to_string(&json_path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json_txt).unwrap();
    let arr = v.as_array().unwrap();
    assert_eq!(arr.len(), rows.len());
    assert_eq!(arr[1]["abbr"], "S1");
    assert_eq!(arr[1]["y_field"], "healthcare");
}

#[test]
fn save_rows_picks_format_from_extension() {
    let rows = sample(2);
    let tmp = tempfile::tempdir().unwrap();

    let json_path = tmp.path().join("rows.JSON");
    storage::save_rows(&rows, &json_path).unwrap();
    assert!(fs::read_to_string(&json_path).unwrap().trim_start().starts_with('['));

    let other = tmp.path().join("rows.txt");
    storage::save_rows(&rows, &other).unwrap();
    assert!(fs::read_to_string(&other).unwrap().starts_with("state,"));
}

// Cells starting with =, +, - or @ would be evaluated by spreadsheet apps;
// they are written with a leading single quote.
#[test]
fn csv_cells_are_prefixed_to_avoid_formulas() {
    let mut rows = sample(1);
    rows[0].state = "=HYPERLINK(\"http://evil\")".into();
    rows[0].abbr = "@foo".into();

    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("csv_injection.csv");
    storage::save_csv(&rows, &path).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    let row = rdr.records().next().expect("one data row expected").unwrap();
    let cell = |name: &str| {
        let idx = headers
            .iter()
            .position(|h| h == name)
            .expect("header present");
        row.get(idx).unwrap().to_string()
    };

    let state = cell("state");
    assert!(state.starts_with('\''), "state not prefixed: {state}");
    assert!(state.contains("=HYPERLINK"), "state content changed: {state}");

    let abbr = cell("abbr");
    assert_eq!(abbr, "'@foo");

    // Numeric cells are untouched.
    assert_eq!(cell("x_value"), "10.0");
}

//! Loading of the per-state dataset from a local CSV file or an HTTP(S) URL.
//!
//! The first row must be a header. Required columns are `id`, `state`, `abbr`
//! and the six metrics (`poverty`, `age`, `income`, `healthcare`, `smokes`,
//! `obesity`). Margin-of-error and confidence-bound columns (`povertyMoe`,
//! `healthcareLow`, `healthcareHigh`, ...) are read when present.
//!
//! ### Notes
//! - Every numeric cell must parse to a finite `f64`. A blank, textual or
//!   `NaN` cell fails the whole load with [`LoadError::NonNumeric`]; nothing is
//!   ever plotted from a partially valid file.
//! - An empty table (header only) is [`LoadError::Empty`].
//!
//! Typical usage:
//! ```no_run
//! let data = statescatter::loader::load_source("assets/data/popData.csv")?;
//! println!("{} states", data.len());
//! # Ok::<(), statescatter::loader::LoadError>(())
//! ```
use crate::models::{Bounds, Dataset, StateRecord};
use csv::{ReaderBuilder, StringRecord};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default location of the dataset relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "assets/data/popData.csv";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("GET {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),
    #[error("line {line}: column `{column}` has non-numeric value {value:?}")]
    NonNumeric {
        line: u64,
        column: &'static str,
        value: String,
    },
    #[error("dataset contains no records")]
    Empty,
}

/// Column positions resolved once from the header row.
struct Columns {
    id: usize,
    state: usize,
    abbr: usize,
    poverty: usize,
    poverty_moe: Option<usize>,
    age: usize,
    age_moe: Option<usize>,
    income: usize,
    income_moe: Option<usize>,
    healthcare: usize,
    healthcare_low: Option<usize>,
    healthcare_high: Option<usize>,
    smokes: usize,
    smokes_low: Option<usize>,
    smokes_high: Option<usize>,
    obesity: usize,
    obesity_low: Option<usize>,
    obesity_high: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, LoadError> {
        let find = |name: &'static str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &'static str| find(name).ok_or(LoadError::MissingColumn(name));
        Ok(Self {
            id: require("id")?,
            state: require("state")?,
            abbr: require("abbr")?,
            poverty: require("poverty")?,
            poverty_moe: find("povertyMoe"),
            age: require("age")?,
            age_moe: find("ageMoe"),
            income: require("income")?,
            income_moe: find("incomeMoe"),
            healthcare: require("healthcare")?,
            healthcare_low: find("healthcareLow"),
            healthcare_high: find("healthcareHigh"),
            smokes: require("smokes")?,
            smokes_low: find("smokesLow"),
            smokes_high: find("smokesHigh"),
            obesity: require("obesity")?,
            obesity_low: find("obesityLow"),
            obesity_high: find("obesityHigh"),
        })
    }
}

/// Per-row cell accessor that reports the failing line and column.
struct Row<'a> {
    rec: &'a StringRecord,
    line: u64,
}

impl Row<'_> {
    fn text(&self, idx: usize) -> &str {
        self.rec.get(idx).unwrap_or("").trim()
    }

    fn number(&self, idx: usize, column: &'static str) -> Result<f64, LoadError> {
        let raw = self.text(idx);
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(LoadError::NonNumeric {
                line: self.line,
                column,
                value: raw.to_string(),
            }),
        }
    }

    fn optional(&self, idx: Option<usize>, column: &'static str) -> Result<Option<f64>, LoadError> {
        idx.map(|i| self.number(i, column)).transpose()
    }

    fn bounds(
        &self,
        low: Option<usize>,
        low_name: &'static str,
        high: Option<usize>,
        high_name: &'static str,
    ) -> Result<Option<Bounds>, LoadError> {
        let low = self.optional(low, low_name)?;
        let high = self.optional(high, high_name)?;
        Ok(match (low, high) {
            (Some(low), Some(high)) => Some(Bounds { low, high }),
            _ => None,
        })
    }

    fn id(&self, idx: usize) -> Result<u32, LoadError> {
        let raw = self.text(idx);
        raw.parse::<u32>().map_err(|_| LoadError::NonNumeric {
            line: self.line,
            column: "id",
            value: raw.to_string(),
        })
    }
}

fn parse_row(cols: &Columns, row: &Row<'_>) -> Result<StateRecord, LoadError> {
    Ok(StateRecord {
        id: row.id(cols.id)?,
        state: row.text(cols.state).to_string(),
        abbr: row.text(cols.abbr).to_string(),
        poverty: row.number(cols.poverty, "poverty")?,
        poverty_moe: row.optional(cols.poverty_moe, "povertyMoe")?,
        age: row.number(cols.age, "age")?,
        age_moe: row.optional(cols.age_moe, "ageMoe")?,
        income: row.number(cols.income, "income")?,
        income_moe: row.optional(cols.income_moe, "incomeMoe")?,
        healthcare: row.number(cols.healthcare, "healthcare")?,
        healthcare_bounds: row.bounds(
            cols.healthcare_low,
            "healthcareLow",
            cols.healthcare_high,
            "healthcareHigh",
        )?,
        smokes: row.number(cols.smokes, "smokes")?,
        smokes_bounds: row.bounds(cols.smokes_low, "smokesLow", cols.smokes_high, "smokesHigh")?,
        obesity: row.number(cols.obesity, "obesity")?,
        obesity_bounds: row.bounds(
            cols.obesity_low,
            "obesityLow",
            cols.obesity_high,
            "obesityHigh",
        )?,
    })
}

/// Parse CSV text (with header) into a dataset.
pub fn parse_records<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let cols = Columns::resolve(rdr.headers()?)?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let rec = result?;
        let line = rec.position().map(|p| p.line()).unwrap_or(0);
        records.push(parse_row(&cols, &Row { rec: &rec, line })?);
    }
    Dataset::new(records).map_err(|_| LoadError::Empty)
}

/// Read and parse a local CSV file.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let data = parse_records(file)?;
    log::info!("loaded {} records from {}", data.len(), path.display());
    Ok(data)
}

fn http_client() -> Result<HttpClient, LoadError> {
    Ok(HttpClient::builder()
        .timeout(Duration::from_secs(30)) // total request timeout
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(5))
        .user_agent(concat!("statescatter/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Fetch and parse a CSV resource over HTTP(S).
pub fn fetch_records(url: &str) -> Result<Dataset, LoadError> {
    let resp = http_client()?.get(url).send()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let body = resp.bytes()?;
    let data = parse_records(body.as_ref())?;
    log::info!("fetched {} records from {}", data.len(), url);
    Ok(data)
}

/// Load from a URL when `source` starts with `http://` or `https://`, otherwise from disk.
pub fn load_source(source: &str) -> Result<Dataset, LoadError> {
    let lower = source.trim().to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        fetch_records(source.trim())
    } else {
        load_records(source)
    }
}

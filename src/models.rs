use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Metrics selectable on the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XField {
    /// Share of the population in poverty (%).
    Poverty,
    /// Median age.
    Age,
    /// Median household income.
    Income,
}

/// Metrics selectable on the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YField {
    /// Share lacking healthcare coverage (%).
    Healthcare,
    /// Share of smokers (%).
    Smokes,
    /// Share of obese adults (%).
    Obesity,
}

impl XField {
    pub const ALL: [XField; 3] = [XField::Poverty, XField::Age, XField::Income];

    /// Column name in the source CSV.
    pub fn key(self) -> &'static str {
        match self {
            XField::Poverty => "poverty",
            XField::Age => "age",
            XField::Income => "income",
        }
    }

    /// Human-readable axis title, also used in tooltips.
    pub fn label(self) -> &'static str {
        match self {
            XField::Poverty => "In Poverty (%)",
            XField::Age => "Age (Median)",
            XField::Income => "Household Income (Median)",
        }
    }

    pub fn value(self, rec: &StateRecord) -> f64 {
        match self {
            XField::Poverty => rec.poverty,
            XField::Age => rec.age,
            XField::Income => rec.income,
        }
    }
}

impl YField {
    pub const ALL: [YField; 3] = [YField::Healthcare, YField::Smokes, YField::Obesity];

    pub fn key(self) -> &'static str {
        match self {
            YField::Healthcare => "healthcare",
            YField::Smokes => "smokes",
            YField::Obesity => "obesity",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            YField::Healthcare => "Lacks Healthcare (%)",
            YField::Smokes => "Smokes (%)",
            YField::Obesity => "Obese (%)",
        }
    }

    pub fn value(self, rec: &StateRecord) -> f64 {
        match self {
            YField::Healthcare => rec.healthcare,
            YField::Smokes => rec.smokes,
            YField::Obesity => rec.obesity,
        }
    }
}

/// Which axis a metric or primitive coordinate belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Any selectable metric. This is the payload of a click on an axis title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    X(XField),
    Y(YField),
}

impl Metric {
    /// All six metrics, x titles first.
    pub const ALL: [Metric; 6] = [
        Metric::X(XField::Poverty),
        Metric::X(XField::Age),
        Metric::X(XField::Income),
        Metric::Y(YField::Healthcare),
        Metric::Y(YField::Smokes),
        Metric::Y(YField::Obesity),
    ];

    pub fn axis(self) -> Axis {
        match self {
            Metric::X(_) => Axis::X,
            Metric::Y(_) => Axis::Y,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Metric::X(f) => f.key(),
            Metric::Y(f) => f.key(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::X(f) => f.label(),
            Metric::Y(f) => f.label(),
        }
    }

    pub fn value(self, rec: &StateRecord) -> f64 {
        match self {
            Metric::X(f) => f.value(rec),
            Metric::Y(f) => f.value(rec),
        }
    }
}

impl From<XField> for Metric {
    fn from(f: XField) -> Self {
        Metric::X(f)
    }
}

impl From<YField> for Metric {
    fn from(f: YField) -> Self {
        Metric::Y(f)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

/// A field key that is not one of the six selectable metrics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field `{key}` (expected one of: {expected})")]
pub struct UnknownField {
    pub key: String,
    pub expected: &'static str,
}

impl FromStr for XField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        XField::ALL
            .into_iter()
            .find(|f| f.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownField {
                key: s.to_string(),
                expected: "poverty, age, income",
            })
    }
}

impl FromStr for YField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        YField::ALL
            .into_iter()
            .find(|f| f.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownField {
                key: s.to_string(),
                expected: "healthcare, smokes, obesity",
            })
    }
}

impl FromStr for Metric {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(x) = s.parse::<XField>() {
            return Ok(Metric::X(x));
        }
        s.parse::<YField>().map(Metric::Y).map_err(|_| UnknownField {
            key: s.to_string(),
            expected: "poverty, age, income, healthcare, smokes, obesity",
        })
    }
}

/// Human-readable label for a raw field key. Unknown keys are an error.
pub fn field_label(key: &str) -> Result<&'static str, UnknownField> {
    key.parse::<Metric>().map(Metric::label)
}

/// The (x, y) pair currently plotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub x: XField,
    pub y: YField,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            x: XField::Poverty,
            y: YField::Healthcare,
        }
    }
}

impl Selection {
    pub fn is_selected(&self, metric: Metric) -> bool {
        match metric {
            Metric::X(f) => self.x == f,
            Metric::Y(f) => self.y == f,
        }
    }

    /// All nine legal combinations.
    pub fn all() -> impl Iterator<Item = Selection> {
        XField::ALL
            .into_iter()
            .flat_map(|x| YField::ALL.into_iter().map(move |y| Selection { x, y }))
    }
}

/// Lower/upper confidence bound reported alongside a rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub low: f64,
    pub high: f64,
}

/// One row of the dataset: a single U.S. state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
    pub id: u32,
    pub state: String,
    pub abbr: String,
    pub poverty: f64,
    pub poverty_moe: Option<f64>,
    pub age: f64,
    pub age_moe: Option<f64>,
    pub income: f64,
    pub income_moe: Option<f64>,
    pub healthcare: f64,
    pub healthcare_bounds: Option<Bounds>,
    pub smokes: f64,
    pub smokes_bounds: Option<Bounds>,
    pub obesity: f64,
    pub obesity_bounds: Option<Bounds>,
}

impl StateRecord {
    /// Record with the six metrics set and no error bounds.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u32,
        state: impl Into<String>,
        abbr: impl Into<String>,
        poverty: f64,
        age: f64,
        income: f64,
        healthcare: f64,
        smokes: f64,
        obesity: f64,
    ) -> Self {
        Self {
            id,
            state: state.into(),
            abbr: abbr.into(),
            poverty,
            poverty_moe: None,
            age,
            age_moe: None,
            income,
            income_moe: None,
            healthcare,
            healthcare_bounds: None,
            smokes,
            smokes_bounds: None,
            obesity,
            obesity_bounds: None,
        }
    }
}

/// Returned when a dataset would contain no records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("dataset contains no records")]
pub struct EmptyDataset;

/// Non-empty, ordered collection of records. Scale domains are always defined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    records: Vec<StateRecord>,
}

impl Dataset {
    pub fn new(records: Vec<StateRecord>) -> Result<Self, EmptyDataset> {
        if records.is_empty() {
            return Err(EmptyDataset);
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[StateRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StateRecord> {
        self.records.get(index)
    }

    /// Position of the record with the given abbreviation (case-insensitive).
    pub fn position_by_abbr(&self, abbr: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|r| r.abbr.eq_ignore_ascii_case(abbr.trim()))
    }

    /// (min, max) of a metric over all records.
    pub fn extent(&self, metric: Metric) -> (f64, f64) {
        self.records.iter().map(|r| metric.value(r)).fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), v| (lo.min(v), hi.max(v)),
        )
    }
}

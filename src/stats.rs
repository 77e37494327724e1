use crate::models::{Dataset, Metric};
use serde::Serialize;

/// Summary statistics for one metric across all states.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Summary {
    pub metric: Metric,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

/// Summarize a single metric. The dataset is never empty, so every field is defined.
pub fn summarize(data: &Dataset, metric: Metric) -> Summary {
    let mut vals: Vec<f64> = data.records().iter().map(|r| metric.value(r)).collect();
    vals.sort_by(|a, b| a.total_cmp(b));
    let count = vals.len();
    let mean = vals.iter().sum::<f64>() / count as f64;
    let median = if count % 2 == 1 {
        vals[count / 2]
    } else {
        (vals[count / 2 - 1] + vals[count / 2]) / 2.0
    };
    Summary {
        metric,
        count,
        min: vals[0],
        max: vals[count - 1],
        mean,
        median,
    }
}

/// Summaries for all six metrics, x metrics first.
pub fn summary_table(data: &Dataset) -> Vec<Summary> {
    Metric::ALL.into_iter().map(|m| summarize(data, m)).collect()
}

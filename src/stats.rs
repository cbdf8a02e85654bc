use serde::Serialize;

use crate::frame::{Column, FeatureFrame};
use crate::metrics::utility::{mean, sample_stddev};

/// Descriptive statistics for one numeric column. `std` is the sample
/// standard deviation and is `None` below two values.
#[derive(Debug, Default, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub count: usize,
    pub missing: usize,
    pub missing_pct: f64,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Row count plus per-column statistics for a feature frame.
#[derive(Debug, Default, Serialize)]
pub struct FrameSummary {
    pub rows: usize,
    pub columns: Vec<ColumnSummary>,
}

impl FrameSummary {
    /// Summarizes every numeric column; text columns are skipped.
    pub fn from_frame(frame: &FeatureFrame) -> Self {
        let columns = frame
            .columns()
            .filter_map(|(name, column)| {
                let values: Vec<Option<f64>> = match column {
                    Column::Float(v) => v.clone(),
                    Column::Int(v) => v.iter().map(|x| x.map(|x| x as f64)).collect(),
                    Column::Text(_) => return None,
                };
                Some(ColumnSummary::from_values(name, &values))
            })
            .collect();

        FrameSummary {
            rows: frame.len(),
            columns,
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.name == name)
    }
}

impl ColumnSummary {
    fn from_values(name: &str, values: &[Option<f64>]) -> Self {
        let present: Vec<f64> = values.iter().flatten().copied().filter(|v| !v.is_nan()).collect();
        let missing = values.len() - present.len();

        let mut s = ColumnSummary {
            name: name.to_string(),
            count: present.len(),
            missing,
            missing_pct: Self::pct(missing, values.len()),
            ..Default::default()
        };

        if !present.is_empty() {
            let avg = mean(&present);
            s.mean = Some(avg);
            s.std = sample_stddev(&present, avg);
            s.min = present.iter().copied().reduce(f64::min);
            s.max = present.iter().copied().reduce(f64::max);
        }

        s
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }
}

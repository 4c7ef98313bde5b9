//! The normalized, periods-in-rows view of a financial statement.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{LoadError, Result};

pub const PERIOD_COLUMN: &str = "Year";

/// How the statement was laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Metrics down the first column, one column per period. Transposed on load.
    MetricsInRows,
    /// One row per period, one column per metric.
    PeriodsInRows,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub period: String,
    pub values: Vec<Option<f64>>,
}

/// Outcome of a load, suitable for showing to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadReport {
    pub orientation: Orientation,
    pub periods: usize,
    pub metrics: usize,
    pub null_cells: usize,
    pub pruned_columns: Vec<String>,
}

/// Rectangular table: every record carries one value slot per metric, in
/// metric declaration order, and period labels are unique.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    period_label: String,
    metrics: Vec<String>,
    records: Vec<Record>,
    orientation: Orientation,
    pruned_columns: Vec<String>,
}

impl NormalizedTable {
    pub fn new(
        period_label: impl Into<String>,
        metrics: Vec<String>,
        records: Vec<Record>,
        orientation: Orientation,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.period.as_str()) {
                return Err(LoadError::DuplicatePeriod(record.period.clone()));
            }
        }
        let width = metrics.len();
        let records = records
            .into_iter()
            .map(|mut record| {
                record.values.resize(width, None);
                record
            })
            .collect();
        Ok(Self {
            period_label: period_label.into(),
            metrics,
            records,
            orientation,
            pruned_columns: Vec::new(),
        })
    }

    pub(crate) fn with_pruned_columns(mut self, pruned: Vec<String>) -> Self {
        self.pruned_columns = pruned;
        self
    }

    pub fn period_label(&self) -> &str {
        &self.period_label
    }

    pub fn metrics(&self) -> &[String] {
        &self.metrics
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn metric_index(&self, name: &str) -> Option<usize> {
        self.metrics.iter().position(|metric| metric == name)
    }

    pub fn periods(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(|record| record.period.as_str())
    }

    /// Values of one metric in table order.
    pub fn series(&self, idx: usize) -> impl Iterator<Item = Option<f64>> + '_ {
        self.records
            .iter()
            .map(move |record| record.values.get(idx).copied().flatten())
    }

    pub fn non_null_count(&self, idx: usize) -> usize {
        self.series(idx).filter(Option::is_some).count()
    }

    /// Header row of the normalized table, period column first.
    pub fn headers(&self) -> Vec<String> {
        std::iter::once(self.period_label.clone())
            .chain(self.metrics.iter().cloned())
            .collect()
    }

    /// Cells as strings in header order, with full numeric precision and
    /// empty strings for nulls. Feeding these back through
    /// [`crate::normalize::normalize`] reproduces the table.
    pub fn to_string_rows(&self) -> Vec<Vec<String>> {
        self.records
            .iter()
            .map(|record| {
                std::iter::once(record.period.clone())
                    .chain(
                        record
                            .values
                            .iter()
                            .map(|value| value.map(|v| v.to_string()).unwrap_or_default()),
                    )
                    .collect()
            })
            .collect()
    }

    /// Appends a metric column, or overwrites it when a column of that name
    /// already exists. Existing metrics are never reordered or removed.
    pub fn upsert_metric(&mut self, name: &str, values: Vec<Option<f64>>) {
        let idx = match self.metric_index(name) {
            Some(idx) => idx,
            None => {
                self.metrics.push(name.to_string());
                for record in &mut self.records {
                    record.values.push(None);
                }
                self.metrics.len() - 1
            }
        };
        for (record, value) in self.records.iter_mut().zip(values) {
            record.values[idx] = value;
        }
    }

    pub fn load_report(&self) -> LoadReport {
        LoadReport {
            orientation: self.orientation,
            periods: self.records.len(),
            metrics: self.metrics.len(),
            null_cells: self
                .records
                .iter()
                .flat_map(|record| record.values.iter())
                .filter(|value| value.is_none())
                .count(),
            pruned_columns: self.pruned_columns.clone(),
        }
    }
}

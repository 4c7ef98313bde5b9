//! Question answering against a loaded statement.
//!
//! A [`QueryEngine`] owns its [`NormalizedTable`] and can only be built from
//! a table that loaded successfully. Each question runs independently:
//! classify, resolve the topic's column, then execute.

use std::path::Path;

use itertools::Itertools;
use log::debug;
use serde::Serialize;

use crate::{
    data::{format_cell, percent_change, ratio},
    error::Result,
    intent::{QueryIntent, RatioKind, Topic, classify},
    keywords::{KeywordExtractor, extract_keywords},
    matching::{find_matching_columns, resolve_metric},
    normalize::load_statement,
    raw::ReadOptions,
    statement::{NormalizedTable, Record},
};

pub const GROWTH_COLUMN: &str = "growth_percent";
pub const UNRECOGNIZED_MESSAGE: &str = "Sorry, I couldn't understand that query.";
pub const NO_MATCHES_MESSAGE: &str =
    "No exact matches found via keywords. Try simpler words (e.g., 'assets', 'cash', 'liabilities').";

/// A slice of the table: the period column plus one or more value columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub period_label: String,
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
}

impl Projection {
    fn of(table: &NormalizedTable, metrics: &[usize]) -> Self {
        Self {
            period_label: table.period_label().to_string(),
            columns: metrics
                .iter()
                .map(|&idx| table.metrics()[idx].clone())
                .collect(),
            rows: table
                .records()
                .iter()
                .map(|record| Record {
                    period: record.period.clone(),
                    values: metrics.iter().map(|&idx| record.values[idx]).collect(),
                })
                .collect(),
        }
    }

    fn with_column(mut self, name: &str, values: impl IntoIterator<Item = Option<f64>>) -> Self {
        self.columns.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.values.push(value);
        }
        self
    }

    pub fn headers(&self) -> Vec<String> {
        std::iter::once(self.period_label.clone())
            .chain(self.columns.iter().cloned())
            .collect()
    }

    pub fn column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let idx = self.columns.iter().position(|column| column == name)?;
        Some(self.rows.iter().map(|row| row.values[idx]).collect())
    }

    /// Display strings, period first, nulls as `-`.
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                std::iter::once(row.period.clone())
                    .chain(row.values.iter().map(|value| format_cell(*value)))
                    .collect()
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryResult {
    /// Period plus the requested metric(s), as stored.
    Series(Projection),
    /// Period, the metric, and its period-over-period change in percent.
    Growth(Projection),
    /// Period plus a derived ratio column.
    Ratio(Projection),
    /// No metric contains the topic's keyword. The message names the topic's
    /// display label (`'Liabilities'`); `keyword` carries the search stem
    /// that was matched against (`liabilit`).
    NoColumnFound { topic: Topic, keyword: String },
    MissingColumns { ratio: RatioKind, required: Vec<String> },
    NoMatches { keywords: Vec<String> },
    Unrecognized { query: String },
}

impl QueryResult {
    pub fn projection(&self) -> Option<&Projection> {
        match self {
            QueryResult::Series(p) | QueryResult::Growth(p) | QueryResult::Ratio(p) => Some(p),
            _ => None,
        }
    }

    /// Human-readable text for results that carry no data.
    pub fn message(&self) -> Option<String> {
        match self {
            QueryResult::Series(_) | QueryResult::Growth(_) | QueryResult::Ratio(_) => None,
            QueryResult::NoColumnFound { topic, .. } => Some(format!(
                "No column related to '{}' found.",
                topic.label()
            )),
            QueryResult::MissingColumns { required, .. } => Some(format!(
                "Columns named {} required for this ratio.",
                required.iter().map(|c| format!("'{c}'")).join(" and ")
            )),
            QueryResult::NoMatches { .. } => Some(NO_MATCHES_MESSAGE.to_string()),
            QueryResult::Unrecognized { .. } => Some(UNRECOGNIZED_MESSAGE.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct QueryEngine {
    table: NormalizedTable,
}

impl QueryEngine {
    pub fn new(table: NormalizedTable) -> Self {
        Self { table }
    }

    pub fn load(path: &Path, options: ReadOptions) -> Result<Self> {
        load_statement(path, options).map(Self::new)
    }

    pub fn table(&self) -> &NormalizedTable {
        &self.table
    }

    pub fn into_table(self) -> NormalizedTable {
        self.table
    }

    pub fn answer(&self, question: &str) -> QueryResult {
        let intent = classify(question);
        debug!("Classified {question:?} as {intent:?}");
        self.execute(intent, question)
    }

    pub fn execute(&self, intent: QueryIntent, question: &str) -> QueryResult {
        match intent {
            QueryIntent::MetricSeries(topic) => match self.resolve(topic) {
                Ok(idx) => QueryResult::Series(Projection::of(&self.table, &[idx])),
                Err(missing) => missing,
            },
            QueryIntent::GrowthSeries(topic) => match self.resolve(topic) {
                Ok(idx) => QueryResult::Growth(self.growth(idx)),
                Err(missing) => missing,
            },
            QueryIntent::DerivedRatio(kind) => self.ratio(kind),
            QueryIntent::Unrecognized => QueryResult::Unrecognized {
                query: question.to_string(),
            },
        }
    }

    /// Free-text mode: every metric matching any extracted keyword.
    pub fn search(&self, text: &str, extractor: Option<&dyn KeywordExtractor>) -> QueryResult {
        let keywords = extract_keywords(extractor, text);
        let matches = find_matching_columns(&self.table, keywords.as_slice());
        debug!("Keywords {keywords:?} matched {matches:?}");
        if matches.is_empty() {
            return QueryResult::NoMatches { keywords };
        }
        let indices = matches
            .iter()
            .filter_map(|name| self.table.metric_index(name))
            .collect::<Vec<_>>();
        QueryResult::Series(Projection::of(&self.table, &indices))
    }

    /// Computes a derived ratio without touching the table.
    pub fn ratio(&self, kind: RatioKind) -> QueryResult {
        match self.ratio_values(kind) {
            Some(values) => QueryResult::Ratio(
                Projection::of(&self.table, &[]).with_column(kind.column_name(), values),
            ),
            None => QueryResult::MissingColumns {
                ratio: kind,
                required: kind.required_columns().map(String::from).into(),
            },
        }
    }

    /// Computes a derived ratio and appends it to the table as a new metric
    /// (replacing an earlier run of the same ratio).
    pub fn add_ratio_column(&mut self, kind: RatioKind) -> QueryResult {
        let result = self.ratio(kind);
        if let Some(values) = result
            .projection()
            .and_then(|projection| projection.column(kind.column_name()))
        {
            self.table.upsert_metric(kind.column_name(), values);
        }
        result
    }

    fn resolve(&self, topic: Topic) -> std::result::Result<usize, QueryResult> {
        let keyword = topic.keyword();
        resolve_metric(&self.table, keyword)
            .and_then(|name| self.table.metric_index(name))
            .ok_or_else(|| QueryResult::NoColumnFound {
                topic,
                keyword: keyword.to_string(),
            })
    }

    fn growth(&self, idx: usize) -> Projection {
        let values = self.table.series(idx).collect::<Vec<_>>();
        let growth = std::iter::once(None).chain(
            values
                .iter()
                .tuple_windows()
                .map(|(previous, current)| percent_change(*previous, *current)),
        );
        Projection::of(&self.table, &[idx]).with_column(GROWTH_COLUMN, growth)
    }

    fn ratio_values(&self, kind: RatioKind) -> Option<Vec<Option<f64>>> {
        let numerator = self.table.metric_index(kind.numerator())?;
        let denominator = self.table.metric_index(kind.denominator())?;
        Some(
            self.table
                .series(numerator)
                .zip(self.table.series(denominator))
                .map(|(n, d)| ratio(n?, d?))
                .collect(),
        )
    }
}

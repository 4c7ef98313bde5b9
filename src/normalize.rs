//! Statement normalization.
//!
//! Financial statements are usually exported with one row per line item and
//! one column per reporting date. Queries want the opposite, so
//! [`normalize`] detects the orientation from the header row and transposes
//! when needed:
//!
//! - two or more date-shaped headers (digit runs joined by `-` or `/`, e.g.
//!   `2012-12-31` or `9/28/2019`) mean metrics-in-rows; the headers after the
//!   first become the `Year` column and the first column's labels become
//!   metric names. Hyphenated line items like `Long-term Debt` do not count;
//! - otherwise the table already has one row per period and only the period
//!   column is identified (`Year` or `period`, else the first column).
//!
//! Every non-period cell is coerced with [`crate::data::coerce_numeric`];
//! failures become nulls and never abort the load.

use std::{path::Path, sync::OnceLock};

use log::{debug, info, warn};
use regex::Regex;

use crate::{
    data::coerce_numeric,
    error::Result,
    raw::{RawTable, ReadOptions, dedupe_names},
    statement::{NormalizedTable, Orientation, PERIOD_COLUMN, Record},
};

pub const DATE_LIKE_THRESHOLD: usize = 2;

const PERIOD_ALIASES: &[&str] = &[PERIOD_COLUMN, "period"];

fn date_label() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\d{1,4}[-/]\d{1,2}(?:[-/]\d{1,4})?(?:[ T]\d{1,2}:\d{2}(?::\d{2})?)?$")
            .expect("valid date label pattern")
    })
}

/// True for reporting-date headers such as `2021-12-31`, `2021-12`,
/// `12/31/2021` or `2021-12-31 00:00:00`.
pub fn is_date_like(header: &str) -> bool {
    date_label().is_match(header.trim())
}

pub fn detect_orientation(headers: &[String]) -> Orientation {
    let date_like = headers.iter().filter(|h| is_date_like(h)).count();
    debug!("{date_like} date-like header(s) out of {}", headers.len());
    if date_like >= DATE_LIKE_THRESHOLD {
        Orientation::MetricsInRows
    } else {
        Orientation::PeriodsInRows
    }
}

pub fn normalize(raw: &RawTable) -> Result<NormalizedTable> {
    match detect_orientation(&raw.headers) {
        Orientation::MetricsInRows => transpose(raw),
        Orientation::PeriodsInRows => standardize(raw),
    }
}

/// Reads and normalizes a statement file, logging the load outcome.
pub fn load_statement(path: &Path, options: ReadOptions) -> Result<NormalizedTable> {
    let raw = RawTable::read(path, options)?;
    let table = normalize(&raw)?;
    let report = table.load_report();
    info!(
        "Loaded {:?}: {} period(s) x {} metric(s), {} null cell(s) ({:?})",
        path, report.periods, report.metrics, report.null_cells, report.orientation
    );
    Ok(table)
}

fn transpose(raw: &RawTable) -> Result<NormalizedTable> {
    let (kept, pruned): (Vec<usize>, Vec<usize>) = (1..raw.headers.len())
        .partition(|&idx| raw.column(idx).any(|cell| !cell.trim().is_empty()));
    let pruned = pruned
        .into_iter()
        .map(|idx| raw.headers[idx].clone())
        .collect::<Vec<_>>();
    if !pruned.is_empty() {
        warn!("Dropped empty column(s): {}", pruned.join(", "));
    }

    let metric_rows = raw
        .rows
        .iter()
        .filter(|row| {
            let blank = row[0].trim().is_empty();
            if blank {
                debug!("Skipping unlabeled statement row");
            }
            !blank
        })
        .collect::<Vec<_>>();
    let metrics = dedupe_names(metric_rows.iter().map(|row| row[0].trim().to_string()));

    let records = kept
        .iter()
        .map(|&col| Record {
            period: raw.headers[col].clone(),
            values: metric_rows
                .iter()
                .map(|row| coerce_numeric(&row[col]))
                .collect(),
        })
        .collect();

    debug!(
        "Transposed {} metric row(s) into {} period record(s)",
        metrics.len(),
        kept.len()
    );
    Ok(
        NormalizedTable::new(PERIOD_COLUMN, metrics, records, Orientation::MetricsInRows)?
            .with_pruned_columns(pruned),
    )
}

fn standardize(raw: &RawTable) -> Result<NormalizedTable> {
    let (period_idx, period_label) = match raw
        .headers
        .iter()
        .position(|h| PERIOD_ALIASES.contains(&h.as_str()))
    {
        Some(idx) => (idx, raw.headers[idx].clone()),
        None => {
            debug!(
                "Treating first column '{}' as {PERIOD_COLUMN}",
                raw.headers[0]
            );
            (0, PERIOD_COLUMN.to_string())
        }
    };

    let metric_columns = (0..raw.headers.len())
        .filter(|&idx| idx != period_idx)
        .collect::<Vec<_>>();
    let metrics = metric_columns
        .iter()
        .map(|&idx| raw.headers[idx].clone())
        .collect();

    let records = raw
        .rows
        .iter()
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .map(|row| Record {
            period: row[period_idx].trim().to_string(),
            values: metric_columns
                .iter()
                .map(|&idx| coerce_numeric(&row[idx]))
                .collect(),
        })
        .collect();

    NormalizedTable::new(period_label, metrics, records, Orientation::PeriodsInRows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn single_hyphenated_header_is_not_enough_to_transpose() {
        let headers = strings(&["Year", "Pre-tax Income", "Revenue"]);
        assert_eq!(detect_orientation(&headers), Orientation::PeriodsInRows);
    }

    #[test]
    fn hyphenated_metric_names_are_not_dates() {
        let headers = strings(&["Year", "Pre-tax Income", "Long-term Debt"]);
        assert_eq!(detect_orientation(&headers), Orientation::PeriodsInRows);
    }

    #[test]
    fn date_labels_in_common_shapes_are_recognized() {
        for header in ["2021-12-31", "2021-12", "12/31/2021", " 2019-09-28 ", "2021-12-31 00:00:00"] {
            assert!(is_date_like(header), "{header}");
        }
        for header in ["line-item", "FY2022", "Pre-tax Income", "2021", "-", "Q1-2021"] {
            assert!(!is_date_like(header), "{header}");
        }
    }

    #[test]
    fn date_shaped_first_header_counts_towards_detection() {
        let headers = strings(&["2020-12-31", "2021-12-31", "FY2022"]);
        assert_eq!(detect_orientation(&headers), Orientation::MetricsInRows);
    }

    #[test]
    fn existing_period_column_is_kept_in_place() {
        let raw = RawTable::new(
            strings(&["Revenue", "period", "Cash"]),
            vec![strings(&["10", "2020", "3"])],
        )
        .unwrap();
        let table = normalize(&raw).unwrap();
        assert_eq!(table.period_label(), "period");
        assert_eq!(table.metrics(), &strings(&["Revenue", "Cash"])[..]);
        assert_eq!(table.records()[0].values, vec![Some(10.0), Some(3.0)]);
    }
}

//! Metric listing for a loaded statement.
//!
//! Prints each metric with its position and how many periods carry a value,
//! which is the quickest way to see what a question can match against.

use anyhow::Result;
use log::info;

use crate::{cli::ColumnsArgs, load_engine, table};

pub fn execute(args: &ColumnsArgs) -> Result<()> {
    let engine = load_engine(&args.source)?;
    let statement = engine.table();
    let report = statement.load_report();

    if statement.metrics().is_empty() {
        info!("{:?} does not contain any metrics", args.source.input);
        return Ok(());
    }

    let rows = statement
        .metrics()
        .iter()
        .enumerate()
        .map(|(idx, metric)| {
            vec![
                (idx + 1).to_string(),
                metric.clone(),
                format!("{}/{}", statement.non_null_count(idx), statement.len()),
            ]
        })
        .collect::<Vec<_>>();
    let headers = vec!["#".to_string(), "metric".to_string(), "values".to_string()];
    table::print_table(&headers, &rows);
    info!(
        "Listed {} metric(s) across {} period(s) ({:?}, {} empty column(s) dropped)",
        report.metrics,
        report.periods,
        report.orientation,
        report.pruned_columns.len()
    );
    Ok(())
}

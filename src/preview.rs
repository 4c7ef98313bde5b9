use anyhow::Result;
use log::info;

use crate::{cli::PreviewArgs, data::format_cell, load_engine, table};

pub fn execute(args: &PreviewArgs) -> Result<()> {
    let engine = load_engine(&args.source)?;
    let statement = engine.table();
    let rows = statement
        .records()
        .iter()
        .take(args.rows)
        .map(|record| {
            std::iter::once(record.period.clone())
                .chain(record.values.iter().map(|value| format_cell(*value)))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::print_table(&statement.headers(), &rows);
    info!("Displayed {} of {} period(s)", rows.len(), statement.len());
    Ok(())
}

//! Rendering query results for the terminal or for other tools.

use std::io::Write;

use anyhow::{Context, Result, anyhow};
use csv::QuoteStyle;

use crate::{
    cli::OutputFormat,
    engine::{Projection, QueryResult},
    table,
};

pub fn render_result(result: &QueryResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(result).context("Serializing result")?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Table => Ok(match result.projection() {
            Some(projection) => {
                table::render_table(&projection.headers(), &projection.display_rows())
            }
            None => message_line(result),
        }),
        OutputFormat::Csv => match result.projection() {
            Some(projection) => render_csv(projection),
            None => Ok(message_line(result)),
        },
    }
}

fn message_line(result: &QueryResult) -> String {
    format!("{}\n", result.message().unwrap_or_default())
}

fn render_csv(projection: &Projection) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());
    writer
        .write_record(projection.headers())
        .context("Writing CSV header")?;
    for row in &projection.rows {
        let cells = std::iter::once(row.period.clone()).chain(
            row.values
                .iter()
                .map(|value| value.map(|v| v.to_string()).unwrap_or_default()),
        );
        writer.write_record(cells).context("Writing CSV row")?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow!("Flushing CSV output: {}", err.error()))?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

pub fn write_result<W: Write>(out: &mut W, result: &QueryResult, format: OutputFormat) -> Result<()> {
    let rendered = render_result(result, format)?;
    out.write_all(rendered.as_bytes())
        .context("Writing result")?;
    Ok(())
}

//! I/O utilities for reading statements and writing normalized output.
//!
//! All file I/O in finquery flows through this module:
//!
//! - **Delimiter resolution**: extension-based auto-detection (`.csv` → comma,
//!   `.tsv` → tab) with manual override support.
//! - **Encoding**: input decoding via `encoding_rs`, defaulting to UTF-8.
//! - **stdin/stdout**: the `-` path convention routes through standard streams.
//! - **Quoting**: CSV output uses `QuoteStyle::Always`.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use anyhow::{Context, Result};
use csv::QuoteStyle;
use encoding_rs::{Encoding, UTF_8};

use crate::error::LoadError;

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding, LoadError> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| LoadError::UnknownEncoding(value.to_string()))
    } else {
        Ok(UTF_8)
    }
}

pub fn resolve_input_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

pub fn resolve_output_delimiter(path: Option<&Path>, provided: Option<u8>, fallback: u8) -> u8 {
    if let Some(delim) = provided {
        return delim;
    }
    if let Some(path) = path {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => return DEFAULT_TSV_DELIMITER,
            Some(ext) if ext.eq_ignore_ascii_case("csv") => return DEFAULT_CSV_DELIMITER,
            _ => {}
        }
    }
    fallback
}

/// Statements exported from spreadsheets are often ragged, so the reader is
/// flexible and row width is checked by [`crate::raw`].
pub fn open_csv_reader<R>(reader: R, delimiter: u8) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(reader)
}

pub fn open_csv_reader_from_path(
    path: &Path,
    delimiter: u8,
) -> Result<csv::Reader<Box<dyn Read>>, LoadError> {
    let reader: Box<dyn Read> = if is_dash(path) {
        Box::new(std::io::stdin().lock())
    } else {
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Box::new(BufReader::new(file))
    };
    Ok(open_csv_reader(reader, delimiter))
}

pub fn open_csv_writer(path: Option<&Path>, delimiter: u8) -> Result<csv::Writer<Box<dyn Write>>> {
    let writer: Box<dyn Write> = match path {
        Some(p) if !is_dash(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("Creating output file {p:?}"))?,
        )),
        _ => Box::new(std::io::stdout()),
    };

    let mut builder = csv::WriterBuilder::new();
    builder
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Always)
        .double_quote(true);
    Ok(builder.from_writer(writer))
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Option<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    (!had_errors).then(|| text.into_owned())
}

/// `row` is the 1-based line number used in error messages.
pub fn decode_record(
    record: &csv::ByteRecord,
    encoding: &'static Encoding,
    row: usize,
) -> Result<Vec<String>, LoadError> {
    record
        .iter()
        .map(|field| {
            decode_bytes(field, encoding).ok_or(LoadError::Encoding {
                row,
                encoding: encoding.name(),
            })
        })
        .collect()
}

//! Raw statement reading.
//!
//! A [`RawTable`] is the statement exactly as stored: one header row and a
//! grid of string cells. Orientation is unknown at this stage; see
//! [`crate::normalize`].

use std::{
    collections::HashSet,
    io::Read,
    path::{Path, PathBuf},
};

use encoding_rs::{Encoding, UTF_8};
use log::{debug, warn};

use crate::{
    error::{LoadError, Result},
    io_utils,
};

#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    pub delimiter: Option<u8>,
    pub encoding: &'static Encoding,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            encoding: UTF_8,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Builds a table from already-split cells. Headers are cleaned the same
    /// way as when reading a file; short rows are padded with empty cells.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if headers.is_empty() {
            return Err(LoadError::Empty);
        }
        let headers = clean_headers(headers);
        let width = headers.len();
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(idx, row)| fit_row(row, width, idx + 2))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { headers, rows })
    }

    pub fn read(path: &Path, options: ReadOptions) -> Result<Self> {
        let delimiter = io_utils::resolve_input_delimiter(path, options.delimiter);
        let reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
        Self::from_csv_reader(reader, options.encoding, path)
    }

    pub fn from_reader<R: Read>(reader: R, delimiter: u8, encoding: &'static Encoding) -> Result<Self> {
        let reader = io_utils::open_csv_reader(reader, delimiter);
        Self::from_csv_reader(reader, encoding, Path::new("-"))
    }

    fn from_csv_reader<R: Read>(
        mut reader: csv::Reader<R>,
        encoding: &'static Encoding,
        origin: &Path,
    ) -> Result<Self> {
        let csv_error = |source: csv::Error| LoadError::Csv {
            path: PathBuf::from(origin),
            source,
        };
        let mut records = reader.byte_records();
        let headers = match records.next() {
            Some(record) => io_utils::decode_record(&record.map_err(csv_error)?, encoding, 1)?,
            None => return Err(LoadError::Empty),
        };
        let mut rows = Vec::new();
        for (idx, record) in records.enumerate() {
            let record = record.map_err(csv_error)?;
            rows.push(io_utils::decode_record(&record, encoding, idx + 2)?);
        }
        debug!(
            "Read {} header cell(s) and {} row(s) from {:?}",
            headers.len(),
            rows.len(),
            origin
        );
        Self::new(headers, rows)
    }

    pub fn column(&self, idx: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |row| row[idx].as_str())
    }
}

/// Names blank headers `Unnamed: <idx>` and suffixes repeats with `.1`, `.2`, ...
pub fn clean_headers(headers: Vec<String>) -> Vec<String> {
    let named = headers.into_iter().enumerate().map(|(idx, header)| {
        let trimmed = header.trim_start_matches('\u{feff}').trim();
        if trimmed.is_empty() {
            format!("Unnamed: {idx}")
        } else {
            trimmed.to_string()
        }
    });
    dedupe_names(named)
}

pub fn dedupe_names(names: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for name in names {
        let mut candidate = name.clone();
        let mut suffix = 1;
        while !seen.insert(candidate.clone()) {
            candidate = format!("{name}.{suffix}");
            suffix += 1;
        }
        if candidate != name {
            warn!("Renamed duplicate column '{name}' to '{candidate}'");
        }
        out.push(candidate);
    }
    out
}

fn fit_row(mut row: Vec<String>, width: usize, line: usize) -> Result<Vec<String>> {
    if row.len() > width {
        if row[width..].iter().any(|cell| !cell.trim().is_empty()) {
            return Err(LoadError::RaggedRow {
                row: line,
                found: row.len(),
                expected: width,
            });
        }
        row.truncate(width);
    }
    row.resize(width, String::new());
    Ok(row)
}

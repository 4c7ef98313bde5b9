//! Load-time error taxonomy.
//!
//! Only loading a statement can fail. Everything that can go wrong while
//! answering a question is reported as a [`crate::engine::QueryResult`]
//! variant instead, so callers can keep prompting after a bad query.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot read statement file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Unknown encoding '{0}'")]
    UnknownEncoding(String),

    #[error("Row {row} is not valid {encoding} text")]
    Encoding { row: usize, encoding: &'static str },

    #[error("Statement has no header row or no columns")]
    Empty,

    #[error("Row {row} has {found} cell(s) but the header declares {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("Period '{0}' appears more than once")]
    DuplicatePeriod(String),
}

pub type Result<T> = std::result::Result<T, LoadError>;

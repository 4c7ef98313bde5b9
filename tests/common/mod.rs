#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use encoding_rs::UTF_8;
use finquery::{
    normalize::normalize,
    raw::RawTable,
    statement::NormalizedTable,
};
use tempfile::{TempDir, tempdir};

pub const BALANCE_SHEET: &str = "apple_balance_sheet.csv";
pub const INCOME_BY_YEAR: &str = "income_by_year.csv";

/// Returns the absolute path to a fixture under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Parses CSV text and normalizes it.
pub fn statement_from_csv(contents: &str) -> NormalizedTable {
    let raw = RawTable::from_reader(contents.as_bytes(), b',', UTF_8).expect("read raw table");
    normalize(&raw).expect("normalize")
}

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }
}

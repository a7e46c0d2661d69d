//! CSV ingest: raw text in, ordered `RawTransaction` rows out.

use crate::{
    error::{ScanError, ScanResult},
    types::RawTransaction,
};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Reads the transaction file named at construction time.
#[derive(Debug, Clone)]
pub struct TransactionParser {
    csv_path: PathBuf,
}

impl TransactionParser {
    pub fn new(csv_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
        }
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    /// Read and parse the whole file. A missing file is reported as
    /// `FileNotFound`; every other read failure is an I/O error.
    pub fn parse_file(&self) -> ScanResult<Vec<RawTransaction>> {
        let content = std::fs::read_to_string(&self.csv_path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ScanError::FileNotFound {
                path: self.csv_path.clone(),
            },
            _ => ScanError::Io(e),
        })?;
        parse_str(&content)
    }
}

/// Parse CSV text with a header row. Blank lines are skipped and every
/// value is trimmed; a row whose width differs from the header fails.
pub fn parse_str(content: &str) -> ScanResult<Vec<RawTransaction>> {
    parse_reader(content.as_bytes())
}

pub fn parse_reader<R: Read>(reader: R) -> ScanResult<Vec<RawTransaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader);

    let transactions = rdr
        .deserialize()
        .collect::<Result<Vec<RawTransaction>, csv::Error>>()?;

    Ok(transactions)
}

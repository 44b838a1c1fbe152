//! Table reader builder and entry points.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::encoding::decode_text;
use crate::engine::table::{BuildReport, Table, build_table_with_report};
use crate::error::Result;

/// Builds [`Table`]s from CSV text, bytes, readers or files.
///
/// Building never fails on malformed data: rows whose field count differs
/// from the header are dropped, and blank input yields an empty table.
///
/// # Example
///
/// ```
/// use lumina_csv::TableReader;
///
/// let mut reader = TableReader::new();
/// reader.max_rows(1000);
///
/// let table = reader.read_str("name,qty\nbolt,12\nnut,\n");
/// assert_eq!(table.num_rows(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableReader {
    /// Maximum number of data rows to accept (0 = unlimited).
    max_rows: usize,
}

impl TableReader {
    /// Create a new reader with default settings.
    pub fn new() -> Self {
        Self { max_rows: 0 }
    }

    /// Stop after this many accepted rows (0 = unlimited).
    pub fn max_rows(&mut self, max_rows: usize) -> &mut Self {
        self.max_rows = max_rows;
        self
    }

    /// Build a table from CSV text.
    pub fn read_str(&self, text: &str) -> Table {
        self.read_str_with_report(text).0
    }

    /// Build a table from CSV text and report dropped lines.
    pub fn read_str_with_report(&self, text: &str) -> (Table, BuildReport) {
        build_table_with_report(text, self.max_rows)
    }

    /// Build a table from raw bytes, handling BOMs and non-UTF-8 encodings.
    pub fn read_bytes(&self, data: &[u8]) -> Table {
        self.read_bytes_with_report(data).0
    }

    /// Build a table from raw bytes and report dropped lines.
    pub fn read_bytes_with_report(&self, data: &[u8]) -> (Table, BuildReport) {
        let (text, transcoded) = decode_text(data);
        if transcoded {
            debug!(bytes = data.len(), "input transcoded to UTF-8");
        }
        self.read_str_with_report(&text)
    }

    /// Build a table from everything a reader yields.
    pub fn read_reader<R: Read>(&self, mut reader: R) -> Result<Table> {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;
        Ok(self.read_bytes(&buffer))
    }

    /// Build a table from a CSV file at the given path.
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Table> {
        info!(path = %path.as_ref().display(), "reading CSV file");
        let file = File::open(path.as_ref())?;
        self.read_reader(std::io::BufReader::new(file))
    }
}

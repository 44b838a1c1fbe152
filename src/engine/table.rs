//! Building the immutable typed table from raw CSV text.

use super::inference::infer_value;
use super::split::split_line;
use crate::value::Value;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

/// A typed row, positionally aligned with [`Table::headers`].
pub type Row = Vec<Value>;

static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a built table, used to key external caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TableId(u64);

impl TableId {
    fn next() -> Self {
        TableId(NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A parsed CSV table. Never mutated after construction.
///
/// Duplicate header names are kept positionally; name lookups resolve to the
/// first occurrence.
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    #[serde(skip)]
    id: TableId,
    headers: Vec<String>,
    rows: Vec<Row>,
    raw_rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::from_parts(Vec::new(), Vec::new(), Vec::new())
    }

    pub(crate) fn from_parts(
        headers: Vec<String>,
        rows: Vec<Row>,
        raw_rows: Vec<Vec<String>>,
    ) -> Self {
        debug_assert_eq!(rows.len(), raw_rows.len());
        Self {
            id: TableId::next(),
            headers,
            rows,
            raw_rows,
        }
    }

    #[inline]
    pub fn id(&self) -> TableId {
        self.id
    }

    /// Column names in file order.
    #[inline]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Typed rows in file order.
    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The trimmed, unquoted string fields of each accepted row.
    #[inline]
    pub fn raw_rows(&self) -> &[Vec<String>] {
        &self.raw_rows
    }

    /// Returns true if the table has no data rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of data rows.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of columns.
    #[inline]
    pub fn num_columns(&self) -> usize {
        self.headers.len()
    }

    /// Position of the first column with the given name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// All values of one column, in row order.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().filter_map(move |row| row.get(index))
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

/// A data line that was dropped because its field count did not match the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    /// 1-based physical line number in the input text.
    pub line: usize,
    /// Number of header fields.
    pub expected: usize,
    /// Number of fields found on the line.
    pub found: usize,
}

/// Diagnostics collected while building a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Non-blank data lines examined (header excluded).
    pub total_lines: usize,
    /// Rows that made it into the table.
    pub accepted_rows: usize,
    /// Lines dropped for a field count mismatch.
    pub rejected: Vec<RejectedRow>,
}

impl BuildReport {
    /// Number of rejected lines.
    #[inline]
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }
}

/// Build a table from CSV text, silently dropping malformed rows.
pub fn build_table(text: &str) -> Table {
    build_table_with_report(text, 0).0
}

/// Build a table from CSV text and report which lines were dropped.
///
/// # Arguments
/// * `text` - The CSV content, `\n` or `\r\n` terminated
/// * `max_rows` - Maximum number of rows to accept (0 = unlimited)
pub fn build_table_with_report(text: &str, max_rows: usize) -> (Table, BuildReport) {
    let mut report = BuildReport::default();

    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, header_line)) = lines.next() else {
        debug!("no non-blank lines, building empty table");
        return (Table::new(), report);
    };

    let headers = split_line(header_line);
    let limit = if max_rows == 0 { usize::MAX } else { max_rows };
    let capacity = bytecount::count(text.as_bytes(), b'\n').min(limit);

    let mut rows: Vec<Row> = Vec::with_capacity(capacity);
    let mut raw_rows: Vec<Vec<String>> = Vec::with_capacity(capacity);

    for (idx, line) in lines {
        if rows.len() >= limit {
            break;
        }
        report.total_lines += 1;

        let fields = split_line(line);
        if fields.len() != headers.len() {
            trace!(
                line = idx + 1,
                expected = headers.len(),
                found = fields.len(),
                "dropping row with mismatched field count"
            );
            report.rejected.push(RejectedRow {
                line: idx + 1,
                expected: headers.len(),
                found: fields.len(),
            });
            continue;
        }

        rows.push(fields.iter().map(|f| infer_value(f)).collect());
        raw_rows.push(fields);
    }

    report.accepted_rows = rows.len();
    debug!(
        columns = headers.len(),
        accepted = report.accepted_rows,
        rejected = report.rejected_count(),
        "built table"
    );

    (Table::from_parts(headers, rows, raw_rows), report)
}

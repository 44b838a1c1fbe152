use crate::engine::table::Table;
use crate::field_type::ColumnType;
use serde::Serialize;
use std::fmt;

/// A string column with fewer distinct defined values than this is categorical.
pub const CATEGORICAL_MAX_UNIQUE: usize = 20;

/// Number of raw data rows included in an [`AnalysisContext`].
pub const ANALYSIS_SAMPLE_ROWS: usize = 15;

/// Statistics about one column of a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    /// Header name.
    pub field: String,
    /// Position of the column in the table.
    pub index: usize,
    /// Inferred column type.
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Count of distinct non-empty values.
    pub unique_count: usize,
    /// Smallest defined value, for numeric columns with at least one value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Largest defined value, for numeric columns with at least one value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl ColumnStats {
    /// Returns true if the column is numeric.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        self.column_type.is_numeric()
    }

    /// Returns true if the column is a low-cardinality string column.
    #[inline]
    pub fn is_categorical(&self) -> bool {
        self.column_type == ColumnType::String && self.unique_count < CATEGORICAL_MAX_UNIQUE
    }
}

/// Shape of a dataset, as shown next to its charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub row_count: usize,
    pub column_count: usize,
    /// Names of numeric columns, in header order.
    pub numeric_fields: Vec<String>,
    /// Names of categorical columns, in header order.
    pub categorical_fields: Vec<String>,
}

impl DatasetSummary {
    /// Summarize a table from its already computed column statistics.
    pub fn new(table: &Table, stats: &[ColumnStats]) -> Self {
        Self {
            row_count: table.num_rows(),
            column_count: table.num_columns(),
            numeric_fields: stats
                .iter()
                .filter(|s| s.is_numeric())
                .map(|s| s.field.clone())
                .collect(),
            categorical_fields: stats
                .iter()
                .filter(|s| s.is_categorical())
                .map(|s| s.field.clone())
                .collect(),
        }
    }
}

/// The bounded text projection handed to a natural-language analysis service.
///
/// It carries the header line, the first [`ANALYSIS_SAMPLE_ROWS`] raw rows
/// (comma-joined) and the total row count. Prompt wording is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisContext {
    pub header_line: String,
    pub sample_rows: Vec<String>,
    pub row_count: usize,
}

impl AnalysisContext {
    pub fn from_table(table: &Table) -> Self {
        Self {
            header_line: table.headers().join(","),
            sample_rows: table
                .raw_rows()
                .iter()
                .take(ANALYSIS_SAMPLE_ROWS)
                .map(|row| row.join(","))
                .collect(),
            row_count: table.raw_rows().len(),
        }
    }
}

impl fmt::Display for AnalysisContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rows: {}", self.row_count)?;
        writeln!(f, "{}", self.header_line)?;
        for row in &self.sample_rows {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

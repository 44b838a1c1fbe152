//! lumina-csv: an in-memory CSV table engine
//!
//! Parses delimited text into an immutable, typed [`Table`] and answers the
//! questions a data grid and a chart gallery ask of it: search, sort,
//! pagination, per-column statistics and grouped aggregations.
//!
//! # Quick Start
//!
//! ```
//! use lumina_csv::{Query, SortSpec, TableReader, profile_columns, run_query};
//!
//! let text = "Date,Product,Sales\n2024-01-01,Laptop,1200\n2024-01-02,Mouse,45\n";
//! let table = TableReader::new().read_str(text);
//!
//! let stats = profile_columns(&table);
//! assert_eq!(stats[2].min, Some(45.0));
//! assert_eq!(stats[2].max, Some(1200.0));
//!
//! let mut query = Query::new();
//! query.search("mouse").sort(SortSpec::desc("Sales"));
//! let page = run_query(&table, &query).unwrap();
//! assert_eq!(page.total_matched, 1);
//! ```
//!
//! # Parsing rules
//!
//! - Lines end at `\n` or `\r\n`; blank lines are skipped.
//! - The first line is the header. Data lines with a different field count
//!   are dropped without error.
//! - Fields are split on commas outside `"` quotes, trimmed, unquoted once,
//!   and `""` becomes `"`.
//! - A field is a number when it is a plain signed decimal; everything else
//!   stays text.
//!
//! # Charts
//!
//! ```
//! use lumina_csv::{ChartSet, TableReader, profile_columns};
//!
//! let table = TableReader::new().read_str("region,units\nnorth,3\nsouth,4\nnorth,1\n");
//! let charts = ChartSet::build(&table, &profile_columns(&table));
//!
//! let totals = charts.totals.unwrap();
//! assert_eq!(totals[0].label, "north");
//! assert_eq!(totals[0].value, 4.0);
//! ```

mod cache;
mod encoding;
pub mod engine;
mod error;
mod field_type;
mod metadata;
mod options;
mod reader;
mod value;

// Re-export public API
pub use cache::{DEFAULT_CACHE_CAPACITY, EngineCache};
pub use engine::aggregate::{
    AggregateEntry, ChartColumns, ChartSet, ColumnRef, FREQUENCY_TOP_N, PROJECTION_ROWS,
    ProjectionPoint, SUM_TOP_N, frequency, ordered_projection, sum_by_category,
};
pub use engine::profile::{profile_column, profile_columns, summarize};
pub use engine::query::{Page, run_query, select_rows};
pub use engine::split::split_line;
pub use engine::table::{BuildReport, RejectedRow, Row, Table, TableId, build_table};
pub use error::{EngineError, Result};
pub use field_type::ColumnType;
pub use metadata::{
    ANALYSIS_SAMPLE_ROWS, AnalysisContext, CATEGORICAL_MAX_UNIQUE, ColumnStats, DatasetSummary,
};
pub use options::{DEFAULT_PAGE_SIZE, Query, SortDirection, SortSpec};
pub use reader::TableReader;
pub use value::Value;

// Re-export for advanced usage
pub use encoding::{decode_text, is_utf8, skip_bom};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api() {
        // Verify all public types are accessible
        let _reader = TableReader::new();
        let _query = Query::new();
        let _sort = SortSpec::asc("a");
        let _type = ColumnType::String;
        let _cache = EngineCache::new();
        let _value = Value::Number(1.0);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let table = build_table("Date,Product,Sales\n2024-01-01,Laptop,1200\n2024-01-02,Mouse,45\n");

        assert_eq!(table.headers(), ["Date", "Product", "Sales"]);
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.rows()[0][2], Value::Number(1200.0));
        assert_eq!(table.rows()[0][0], Value::from("2024-01-01"));

        let stats = profile_columns(&table);
        assert_eq!(stats[2].column_type, ColumnType::Number);
        assert_eq!((stats[2].min, stats[2].max), (Some(45.0), Some(1200.0)));
    }
}

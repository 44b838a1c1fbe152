//! Per-column statistics.

use super::table::Table;
use crate::field_type::ColumnType;
use crate::metadata::{ColumnStats, DatasetSummary};
use crate::value::Value;
use foldhash::{HashSet, HashSetExt};
use rayon::prelude::*;

/// Hashable identity of a defined value. Numbers and text never collide,
/// so `1` and `"1"` count as two distinct values.
#[derive(Debug, PartialEq, Eq, Hash)]
enum DistinctKey<'a> {
    Number(u64),
    Text(&'a str),
}

impl<'a> DistinctKey<'a> {
    fn of(value: &'a Value) -> Self {
        match value {
            // 0 and -0 are the same value
            Value::Number(n) if *n == 0.0 => DistinctKey::Number(0f64.to_bits()),
            Value::Number(n) => DistinctKey::Number(n.to_bits()),
            Value::Text(s) => DistinctKey::Text(s),
        }
    }
}

/// Compute statistics for every column, in header order.
pub fn profile_columns(table: &Table) -> Vec<ColumnStats> {
    (0..table.num_columns())
        .into_par_iter()
        .map(|index| profile_column(table, index))
        .collect()
}

/// Compute statistics for a single column.
///
/// Empty strings are ignored. A column with no defined values at all is
/// numeric, with no range.
pub fn profile_column(table: &Table, index: usize) -> ColumnStats {
    let mut column_type = ColumnType::Number;
    let mut distinct: HashSet<DistinctKey<'_>> = HashSet::new();
    let mut range: Option<(f64, f64)> = None;

    for value in table.column(index).filter(|v| v.is_defined()) {
        column_type = column_type.merge(value.column_type());
        distinct.insert(DistinctKey::of(value));

        if let Some(n) = value.as_number() {
            range = Some(match range {
                Some((lo, hi)) => (lo.min(n), hi.max(n)),
                None => (n, n),
            });
        }
    }

    let (min, max) = match (column_type, range) {
        (ColumnType::Number, Some((lo, hi))) => (Some(lo), Some(hi)),
        _ => (None, None),
    };

    ColumnStats {
        field: table.headers().get(index).cloned().unwrap_or_default(),
        index,
        column_type,
        unique_count: distinct.len(),
        min,
        max,
    }
}

/// Profile a table and summarize its shape.
pub fn summarize(table: &Table) -> DatasetSummary {
    DatasetSummary::new(table, &profile_columns(table))
}

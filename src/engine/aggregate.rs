//! Grouped aggregations feeding charts.

use super::table::Table;
use crate::error::{EngineError, Result};
use crate::metadata::ColumnStats;
use foldhash::{HashMap, HashMapExt};
use serde::Serialize;

/// Groups kept by [`sum_by_category`].
pub const SUM_TOP_N: usize = 10;
/// Groups kept by [`frequency`].
pub const FREQUENCY_TOP_N: usize = 6;
/// Rows covered by [`ordered_projection`].
pub const PROJECTION_ROWS: usize = 50;

/// One labelled bar or slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateEntry {
    pub label: String,
    pub value: f64,
}

/// One point of a row-ordered trend line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectionPoint {
    pub index: usize,
    pub value: f64,
}

fn resolve(table: &Table, name: &str) -> Result<usize> {
    table
        .column_index(name)
        .ok_or_else(|| EngineError::UnknownColumn(name.to_string()))
}

/// Fold rows into groups keyed by the category cell's string form.
/// Groups come out in first-appearance order.
fn group_by<F>(table: &Table, category: usize, mut value_of: F) -> Vec<AggregateEntry>
where
    F: FnMut(usize) -> f64,
{
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut entries: Vec<AggregateEntry> = Vec::new();

    for (row_idx, row) in table.rows().iter().enumerate() {
        let Some(cell) = row.get(category) else {
            continue;
        };
        let label = cell.to_string();
        let value = value_of(row_idx);

        match positions.get(&label) {
            Some(&pos) => entries[pos].value += value,
            None => {
                positions.insert(label.clone(), entries.len());
                entries.push(AggregateEntry { label, value });
            }
        }
    }

    entries
}

/// Stable descending sort, then keep the first `n`.
fn top_n(mut entries: Vec<AggregateEntry>, n: usize) -> Vec<AggregateEntry> {
    entries.sort_by(|a, b| b.value.total_cmp(&a.value));
    entries.truncate(n);
    entries
}

/// Sum the `measure` column per distinct `category` value, by column position.
/// Text and empty measure cells count as 0. Returns the top [`SUM_TOP_N`].
pub fn sum_by_category_at(table: &Table, category: usize, measure: usize) -> Vec<AggregateEntry> {
    let rows = table.rows();
    let groups = group_by(table, category, |i| {
        rows[i].get(measure).map_or(0.0, |v| v.number_or_zero())
    });
    top_n(groups, SUM_TOP_N)
}

/// Sum the `measure` column per distinct `category` value.
pub fn sum_by_category(table: &Table, category: &str, measure: &str) -> Result<Vec<AggregateEntry>> {
    let category = resolve(table, category)?;
    let measure = resolve(table, measure)?;
    Ok(sum_by_category_at(table, category, measure))
}

/// Count rows per distinct `category` value, by column position.
/// Returns the top [`FREQUENCY_TOP_N`].
pub fn frequency_at(table: &Table, category: usize) -> Vec<AggregateEntry> {
    top_n(group_by(table, category, |_| 1.0), FREQUENCY_TOP_N)
}

/// Count rows per distinct `category` value.
pub fn frequency(table: &Table, category: &str) -> Result<Vec<AggregateEntry>> {
    let category = resolve(table, category)?;
    Ok(frequency_at(table, category))
}

/// `(row index, value)` for the first [`PROJECTION_ROWS`] rows, by column position.
/// Text and empty cells become 0.
pub fn ordered_projection_at(table: &Table, measure: usize) -> Vec<ProjectionPoint> {
    table
        .rows()
        .iter()
        .take(PROJECTION_ROWS)
        .enumerate()
        .map(|(index, row)| ProjectionPoint {
            index,
            value: row.get(measure).map_or(0.0, |v| v.number_or_zero()),
        })
        .collect()
}

/// `(row index, value)` for the first [`PROJECTION_ROWS`] rows.
pub fn ordered_projection(table: &Table, measure: &str) -> Result<Vec<ProjectionPoint>> {
    let measure = resolve(table, measure)?;
    Ok(ordered_projection_at(table, measure))
}

/// A column picked for charting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnRef {
    pub index: usize,
    pub name: String,
}

impl From<&ColumnStats> for ColumnRef {
    fn from(stats: &ColumnStats) -> Self {
        Self {
            index: stats.index,
            name: stats.field.clone(),
        }
    }
}

/// Default chart columns: the first categorical column and the first numeric
/// column, each in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartColumns {
    pub categorical: Option<ColumnRef>,
    pub numeric: Option<ColumnRef>,
}

impl ChartColumns {
    pub fn select(stats: &[ColumnStats]) -> Self {
        Self {
            categorical: stats.iter().find(|s| s.is_categorical()).map(ColumnRef::from),
            numeric: stats.iter().find(|s| s.is_numeric()).map(ColumnRef::from),
        }
    }
}

/// All default charts for a table. A chart whose columns are missing is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSet {
    pub columns: ChartColumns,
    /// Measure totals per category.
    pub totals: Option<Vec<AggregateEntry>>,
    /// Measure over the first rows.
    pub trend: Option<Vec<ProjectionPoint>>,
    /// Row counts per category.
    pub composition: Option<Vec<AggregateEntry>>,
}

impl ChartSet {
    pub fn build(table: &Table, stats: &[ColumnStats]) -> Self {
        let columns = ChartColumns::select(stats);

        let totals = match (&columns.categorical, &columns.numeric) {
            (Some(cat), Some(num)) => Some(sum_by_category_at(table, cat.index, num.index)),
            _ => None,
        };
        let trend = columns
            .numeric
            .as_ref()
            .map(|num| ordered_projection_at(table, num.index));
        let composition = columns
            .categorical
            .as_ref()
            .map(|cat| frequency_at(table, cat.index));

        Self {
            columns,
            totals,
            trend,
            composition,
        }
    }

    /// Returns true when no chart could be built.
    pub fn is_empty(&self) -> bool {
        self.totals.is_none() && self.trend.is_none() && self.composition.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::profile::profile_columns;
    use crate::engine::table::build_table;

    fn labels(entries: &[AggregateEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.label.as_str()).collect()
    }

    #[test]
    fn test_sum_by_category() {
        let table = build_table("p,s\nA,10\nB,5\nA,2.5\nC,n/a\nB,\n");
        let sums = sum_by_category(&table, "p", "s").unwrap();

        assert_eq!(
            sums,
            vec![
                AggregateEntry { label: "A".into(), value: 12.5 },
                AggregateEntry { label: "B".into(), value: 5.0 },
                AggregateEntry { label: "C".into(), value: 0.0 },
            ]
        );
    }

    #[test]
    fn test_sum_keeps_top_ten() {
        let mut text = String::from("cat,v\n");
        for i in 0..15 {
            text.push_str(&format!("c{i},{i}\n"));
        }
        let table = build_table(&text);
        let sums = sum_by_category(&table, "cat", "v").unwrap();

        assert_eq!(sums.len(), SUM_TOP_N);
        assert_eq!(sums[0].label, "c14");
        assert_eq!(sums[9].label, "c5");
    }

    #[test]
    fn test_ties_keep_first_appearance_order() {
        let table = build_table("c,v\nz,1\ny,2\nx,1\nw,2\n");
        let sums = sum_by_category(&table, "c", "v").unwrap();
        assert_eq!(labels(&sums), vec!["y", "w", "z", "x"]);

        let freq = frequency(&table, "c").unwrap();
        assert_eq!(labels(&freq), vec!["z", "y", "x", "w"]);
    }

    #[test]
    fn test_frequency_top_six() {
        let table = build_table("c\na\nb\nb\nc\nd\ne\nf\ng\nb\na\n");
        let freq = frequency(&table, "c").unwrap();

        assert_eq!(freq.len(), FREQUENCY_TOP_N);
        assert_eq!(freq[0], AggregateEntry { label: "b".into(), value: 3.0 });
        assert_eq!(freq[1], AggregateEntry { label: "a".into(), value: 2.0 });
        assert_eq!(labels(&freq[2..]), vec!["c", "d", "e", "f"]);
    }

    #[test]
    fn test_numeric_labels_render_plainly() {
        let table = build_table("year,v\n2024,1\n2023,1\n2024,1\n");
        let freq = frequency(&table, "year").unwrap();
        assert_eq!(labels(&freq), vec!["2024", "2023"]);
    }

    #[test]
    fn test_ordered_projection() {
        let mut text = String::from("v\n");
        for i in 0..60 {
            text.push_str(&format!("{}\n", i * 2));
        }
        text.push_str("oops\n");
        let table = build_table(&text);
        let points = ordered_projection(&table, "v").unwrap();

        assert_eq!(points.len(), PROJECTION_ROWS);
        assert_eq!(points[0], ProjectionPoint { index: 0, value: 0.0 });
        assert_eq!(points[49], ProjectionPoint { index: 49, value: 98.0 });
    }

    #[test]
    fn test_projection_substitutes_zero() {
        let table = build_table("v\n3\nx\n\"\"\n");
        let values: Vec<f64> = ordered_projection(&table, "v")
            .unwrap()
            .iter()
            .map(|p| p.value)
            .collect();
        assert_eq!(values, vec![3.0, 0.0, 0.0]);
    }

    #[test]
    fn test_unknown_column() {
        let table = build_table("a,b\n1,2\n");
        assert!(matches!(
            sum_by_category(&table, "a", "nope"),
            Err(EngineError::UnknownColumn(name)) if name == "nope"
        ));
        assert!(frequency(&table, "nope").is_err());
        assert!(ordered_projection(&table, "nope").is_err());
    }

    #[test]
    fn test_chart_defaults() {
        let table = build_table(
            "Date,Product,Sales,Units\n2024-01-01,Laptop,1200,1\n2024-01-02,Mouse,45,3\n2024-01-03,Laptop,1100,1\n",
        );
        let stats = profile_columns(&table);
        let charts = ChartSet::build(&table, &stats);

        // Date has 3 distinct strings, so it is the first categorical column.
        assert_eq!(charts.columns.categorical.as_ref().unwrap().name, "Date");
        assert_eq!(charts.columns.numeric.as_ref().unwrap().name, "Sales");
        assert_eq!(charts.totals.as_ref().unwrap().len(), 3);
        assert_eq!(charts.trend.as_ref().unwrap().len(), 3);
        assert_eq!(charts.composition.as_ref().unwrap().len(), 3);
    }

    #[test]
    fn test_chart_set_without_qualifying_columns() {
        let mut text = String::from("id\n");
        for i in 0..25 {
            text.push_str(&format!("id-{i}\n"));
        }
        let table = build_table(&text);
        let charts = ChartSet::build(&table, &profile_columns(&table));

        assert_eq!(charts.columns, ChartColumns::default());
        assert!(charts.is_empty());
    }
}

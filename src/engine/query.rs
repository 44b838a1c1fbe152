//! Search, sort and pagination over a built table.

use super::table::{Row, Table};
use crate::error::{EngineError, Result};
use crate::options::{Query, SortDirection, SortSpec};
use serde::Serialize;
use tracing::debug;

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// Rows on this page, in result order.
    pub rows: Vec<Row>,
    /// Position of each page row in the source table.
    pub row_indices: Vec<usize>,
    /// Rows matching the search term, across all pages.
    pub total_matched: usize,
    /// `ceil(total_matched / page_size)`; 0 when nothing matched.
    pub total_pages: usize,
    /// The requested 1-based page index.
    pub page_index: usize,
    pub page_size: usize,
    /// 1-based ordinal of the first row on the page, 0 if the page is empty.
    pub first_row: usize,
    /// 1-based ordinal of the last row on the page, 0 if the page is empty.
    pub last_row: usize,
}

impl Page {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Row positions matching `term`, ordered by `sort`.
///
/// An empty or absent term keeps every row. A sort key that names no column
/// leaves the filtered order untouched. Sorting is stable in both directions.
pub fn select_rows(table: &Table, term: Option<&str>, sort: Option<&SortSpec>) -> Vec<usize> {
    let mut indices: Vec<usize> = match term.filter(|t| !t.is_empty()) {
        Some(term) => {
            let needle = term.to_lowercase();
            table
                .rows()
                .iter()
                .enumerate()
                .filter(|(_, row)| row.iter().any(|v| v.contains_lowercase(&needle)))
                .map(|(i, _)| i)
                .collect()
        }
        None => (0..table.num_rows()).collect(),
    };

    if let Some(spec) = sort {
        match table.column_index(&spec.key) {
            Some(col) => {
                let rows = table.rows();
                indices.sort_by(|&a, &b| {
                    let ord = rows[a][col].natural_cmp(&rows[b][col]);
                    match spec.direction {
                        SortDirection::Asc => ord,
                        SortDirection::Desc => ord.reverse(),
                    }
                });
            }
            None => debug!(key = %spec.key, "sort key names no column, keeping order"),
        }
    }

    indices
}

/// Run a query and return the requested page.
///
/// A page index past the last page (or 0) yields an empty page. A zero page
/// size is a caller error.
pub fn run_query(table: &Table, query: &Query) -> Result<Page> {
    let page_size = query.size();
    if page_size == 0 {
        return Err(EngineError::InvalidConfig(
            "page size must be greater than zero".to_string(),
        ));
    }

    let matched = select_rows(table, query.search_term(), query.sort_spec());
    let total_matched = matched.len();
    let total_pages = total_matched.div_ceil(page_size);

    let page_index = query.page_index();
    let start = page_index
        .checked_sub(1)
        .and_then(|p| p.checked_mul(page_size))
        .unwrap_or(usize::MAX);
    let row_indices: Vec<usize> = if start < total_matched {
        let end = start.saturating_add(page_size).min(total_matched);
        matched[start..end].to_vec()
    } else {
        Vec::new()
    };

    let rows: Vec<Row> = row_indices
        .iter()
        .map(|&i| table.rows()[i].clone())
        .collect();
    let (first_row, last_row) = if rows.is_empty() {
        (0, 0)
    } else {
        (start + 1, start + rows.len())
    };

    debug!(
        total_matched,
        total_pages,
        page_index,
        returned = rows.len(),
        "ran query"
    );

    Ok(Page {
        rows,
        row_indices,
        total_matched,
        total_pages,
        page_index,
        page_size,
        first_row,
        last_row,
    })
}

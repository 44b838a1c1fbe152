use serde::Serialize;
use std::fmt;

/// Number of rows per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Sort direction for a [`SortSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Returns the opposite direction.
    pub fn reversed(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// Sort key and direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SortSpec {
    /// Column name. Resolves to the first column with this name.
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    pub fn asc(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Asc)
    }

    pub fn desc(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Desc)
    }

    /// Sort state after a header click on `key`: the same key sorted
    /// ascending flips to descending, anything else starts ascending.
    pub fn toggle(current: Option<&SortSpec>, key: &str) -> SortSpec {
        match current {
            Some(spec) if spec.key == key => SortSpec::new(key, spec.direction.reversed()),
            _ => SortSpec::asc(key),
        }
    }
}

/// A search / sort / page request against a table.
///
/// # Example
///
/// ```
/// use lumina_csv::{Query, SortSpec};
///
/// let mut query = Query::new();
/// query.search("laptop").sort(SortSpec::desc("Sales")).page(2);
/// assert_eq!(query.page_index(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    search: Option<String>,
    sort: Option<SortSpec>,
    page: usize,
    page_size: usize,
}

impl Default for Query {
    fn default() -> Self {
        Self::new()
    }
}

impl Query {
    /// First page, no search, no sort, default page size.
    pub fn new() -> Self {
        Self {
            search: None,
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set the free-text search term. An empty term matches every row.
    pub fn search(&mut self, term: impl Into<String>) -> &mut Self {
        self.search = Some(term.into());
        self
    }

    /// Set the sort key and direction.
    pub fn sort(&mut self, sort: SortSpec) -> &mut Self {
        self.sort = Some(sort);
        self
    }

    /// Remove any sort.
    pub fn unsorted(&mut self) -> &mut Self {
        self.sort = None;
        self
    }

    /// Set the 1-based page index.
    pub fn page(&mut self, page: usize) -> &mut Self {
        self.page = page;
        self
    }

    /// Set the page size. Zero is rejected when the query runs.
    pub fn page_size(&mut self, page_size: usize) -> &mut Self {
        self.page_size = page_size;
        self
    }

    #[inline]
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref()
    }

    #[inline]
    pub fn sort_spec(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    #[inline]
    pub fn page_index(&self) -> usize {
        self.page
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builder() {
        let mut query = Query::new();
        query
            .search("abc")
            .sort(SortSpec::asc("name"))
            .page(3)
            .page_size(10);

        assert_eq!(query.search_term(), Some("abc"));
        assert_eq!(query.sort_spec(), Some(&SortSpec::asc("name")));
        assert_eq!(query.page_index(), 3);
        assert_eq!(query.size(), 10);

        query.unsorted();
        assert_eq!(query.sort_spec(), None);
    }

    #[test]
    fn test_query_defaults() {
        let query = Query::default();
        assert_eq!(query.page_index(), 1);
        assert_eq!(query.size(), DEFAULT_PAGE_SIZE);
        assert_eq!(query.search_term(), None);
    }

    #[test]
    fn test_sort_toggle() {
        let first = SortSpec::toggle(None, "Sales");
        assert_eq!(first, SortSpec::asc("Sales"));

        let second = SortSpec::toggle(Some(&first), "Sales");
        assert_eq!(second, SortSpec::desc("Sales"));

        let third = SortSpec::toggle(Some(&second), "Sales");
        assert_eq!(third, SortSpec::asc("Sales"));

        let other = SortSpec::toggle(Some(&first), "Date");
        assert_eq!(other, SortSpec::asc("Date"));

        // Switching keys from a descending sort still starts ascending.
        let switched = SortSpec::toggle(Some(&second), "Date");
        assert_eq!(switched, SortSpec::asc("Date"));
    }

    #[test]
    fn test_direction_reversed() {
        assert_eq!(SortDirection::Asc.reversed(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.reversed(), SortDirection::Asc);
    }
}

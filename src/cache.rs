//! Memoization of column statistics and query pages, kept outside [`Table`].
//!
//! Entries are keyed by [`TableId`] so a cache can serve several tables at
//! once. The cache is bounded; the least recently used entry is evicted first.

use crate::engine::profile::profile_columns;
use crate::engine::query::{Page, run_query};
use crate::engine::table::{Table, TableId};
use crate::error::Result;
use crate::metadata::ColumnStats;
use crate::options::Query;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::trace;

/// Default number of entries kept per cache kind.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Thread-safe memo of derived results for read-only tables.
#[derive(Debug)]
pub struct EngineCache {
    stats: Mutex<LruCache<TableId, Arc<Vec<ColumnStats>>>>,
    pages: Mutex<LruCache<(TableId, Query), Arc<Page>>>,
}

impl Default for EngineCache {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Create a cache holding at most `capacity` entries of each kind.
    /// A capacity of 0 is treated as 1.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            stats: Mutex::new(LruCache::new(capacity)),
            pages: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Column statistics for `table`, computed at most once while cached.
    pub fn column_stats(&self, table: &Table) -> Arc<Vec<ColumnStats>> {
        if let Some(hit) = self.stats.lock().get(&table.id()) {
            trace!(table = ?table.id(), "column stats cache hit");
            return Arc::clone(hit);
        }

        let stats = Arc::new(profile_columns(table));
        self.stats.lock().put(table.id(), Arc::clone(&stats));
        stats
    }

    /// Query result for `table`, computed at most once while cached.
    /// Errors are returned as-is and never cached.
    pub fn query(&self, table: &Table, query: &Query) -> Result<Arc<Page>> {
        let key = (table.id(), query.clone());
        if let Some(hit) = self.pages.lock().get(&key) {
            trace!(table = ?table.id(), "query cache hit");
            return Ok(Arc::clone(hit));
        }

        let page = Arc::new(run_query(table, query)?);
        self.pages.lock().put(key, Arc::clone(&page));
        Ok(page)
    }

    /// Drop every entry derived from the given table.
    pub fn invalidate(&self, id: TableId) {
        self.stats.lock().pop(&id);

        let mut pages = self.pages.lock();
        let stale: Vec<(TableId, Query)> = pages
            .iter()
            .filter(|((table, _), _)| *table == id)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &stale {
            pages.pop(key);
        }
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.stats.lock().clear();
        self.pages.lock().clear();
    }

    /// Number of cached entries, statistics and pages combined.
    pub fn len(&self) -> usize {
        self.stats.lock().len() + self.pages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

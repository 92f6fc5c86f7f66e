//! Per-granularity cache of reference calendar tables.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tracing::debug;

use crate::{Granularity, Table};

#[derive(Debug, Default)]
struct CalendarInner {
    tables: HashMap<Granularity, Arc<Table>>,
}

/// Lazily populated calendar tables, one per granularity.
///
/// Entries never expire; calendar data is static for the lifetime of a session.
#[derive(Debug, Clone, Default)]
pub struct CalendarCache {
    inner: Arc<tokio::sync::RwLock<CalendarInner>>,
}

impl CalendarCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, granularity: Granularity) -> Option<Arc<Table>> {
        let store = self.inner.read().await;
        store.tables.get(&granularity).cloned()
    }

    /// Stores `table`, replacing any previous entry for the granularity.
    pub async fn insert(&self, granularity: Granularity, table: Table) -> Arc<Table> {
        let table = Arc::new(table);
        let mut store = self.inner.write().await;
        store.tables.insert(granularity, Arc::clone(&table));
        table
    }

    /// Returns the cached table, running `load` only on a miss.
    ///
    /// A failed load leaves the cache untouched.
    pub async fn get_or_load<F, Fut, E>(
        &self,
        granularity: Granularity,
        load: F,
    ) -> Result<Arc<Table>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Table, E>>,
    {
        if let Some(table) = self.get(granularity).await {
            debug!(%granularity, rows = table.len(), "calendar cache hit");
            return Ok(table);
        }

        debug!(%granularity, "calendar cache miss");
        let table = load().await?;
        Ok(self.insert(granularity, table).await)
    }

    /// Drops one granularity so the next lookup reloads it.
    pub async fn invalidate(&self, granularity: Granularity) -> bool {
        let mut store = self.inner.write().await;
        store.tables.remove(&granularity).is_some()
    }

    pub async fn clear(&self) {
        let mut store = self.inner.write().await;
        store.tables.clear();
    }

    pub async fn contains(&self, granularity: Granularity) -> bool {
        let store = self.inner.read().await;
        store.tables.contains_key(&granularity)
    }

    pub async fn len(&self) -> usize {
        let store = self.inner.read().await;
        store.tables.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

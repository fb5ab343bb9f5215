//! Time-boxed memoization of query results.
//!
//! Entries are keyed by the parameterized query specification — template id
//! plus bound values — so semantically identical queries share an entry
//! regardless of literal SQL formatting. A cached table is served verbatim
//! for the TTL window (600 seconds by default); the only invalidation is
//! expiry.

use crate::db::{ScalarValue, Table};
use crate::query::spec::{Statement, TemplateId};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default time-to-live for cached results, matching the page's 600-second
/// snapshot window.
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// Cache key: the parameterized query specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    template: TemplateId,
    params: Vec<ScalarValue>,
}

impl From<&Statement> for CacheKey {
    fn from(stmt: &Statement) -> Self {
        Self {
            template: stmt.template,
            params: stmt.params.clone(),
        }
    }
}

struct Entry {
    table: Table,
    stored_at: Instant,
}

/// Process-wide result cache with a fixed TTL per entry.
pub struct QueryCache {
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, Entry>>,
}

impl QueryCache {
    /// Creates a cache with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached table for `key` if it is still fresh.
    ///
    /// An expired entry is dropped on access so the next `put` refreshes it.
    pub fn get(&self, key: &CacheKey) -> Option<Table> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                debug!(template = ?key.template, "cache hit");
                Some(entry.table.clone())
            }
            Some(_) => {
                debug!(template = ?key.template, "cache entry expired");
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores (or refreshes) the table for `key`.
    pub fn put(&self, key: CacheKey, table: Table) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            key,
            Entry {
                table,
                stored_at: Instant::now(),
            },
        );
    }

    /// Number of live entries (expired ones included until touched).
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    /// Drops every entry past its TTL.
    pub fn purge_expired(&self) {
        let mut entries = self.entries.lock().unwrap();
        entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

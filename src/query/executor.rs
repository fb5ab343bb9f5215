//! Query execution over the shared client and cache.
//!
//! The `Runner` owns the injected database client and the spec-keyed result
//! cache; every section goes through `run` so identical specs inside the
//! TTL window never touch the store twice.

use std::sync::Arc;
use std::time::Duration;

use crate::db::{DatabaseClient, Table};
use crate::error::Result;
use crate::query::cache::{CacheKey, QueryCache};
use crate::query::spec::QuerySpec;
use tracing::debug;

/// Executes query specs against the shared connection, memoizing results.
pub struct Runner {
    db: Arc<dyn DatabaseClient>,
    cache: QueryCache,
}

impl Runner {
    /// Creates a runner with the given cache TTL.
    pub fn new(db: Arc<dyn DatabaseClient>, ttl: Duration) -> Self {
        Self {
            db,
            cache: QueryCache::new(ttl),
        }
    }

    /// Creates a runner with the default 600-second TTL.
    pub fn with_default_ttl(db: Arc<dyn DatabaseClient>) -> Self {
        Self {
            db,
            cache: QueryCache::default(),
        }
    }

    /// Compiles and executes a spec, serving a cached table when fresh.
    ///
    /// A rejected statement propagates as a query error; the caller decides
    /// how the affected section degrades.
    pub async fn run(&self, spec: &QuerySpec) -> Result<Table> {
        let stmt = spec.compile();
        let key = CacheKey::from(&stmt);

        if let Some(table) = self.cache.get(&key) {
            return Ok(table);
        }

        debug!(template = ?stmt.template, params = stmt.params.len(), "executing query");
        let table = self.db.fetch(&stmt.sql, &stmt.params).await?;
        self.cache.put(key, table.clone());
        Ok(table)
    }

    /// Closes the underlying connection.
    pub async fn close(&self) -> Result<()> {
        self.db.close().await
    }
}

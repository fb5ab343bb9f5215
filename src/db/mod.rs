//! Database abstraction layer for grandline.
//!
//! Provides a trait-based interface for executing parameterized read-only
//! statements, with a PostgreSQL implementation and an in-memory mock for
//! tests.

mod mock;
mod postgres;
mod types;

pub use mock::{FailingDatabaseClient, MockDatabaseClient, RecordedCall};
pub use postgres::PostgresClient;
pub use types::{Row, ScalarValue, Table, Value};

use crate::config::ConnectionConfig;
use crate::error::Result;
use async_trait::async_trait;

/// Creates a database client for the given configuration.
///
/// This is the central factory function for database connections. Exactly
/// one connection attempt is made; a failure here is fatal to startup.
pub async fn connect(config: &ConnectionConfig) -> Result<Box<dyn DatabaseClient>> {
    let client = PostgresClient::connect(config).await?;
    Ok(Box::new(client))
}

/// Trait defining the interface for database clients.
///
/// All operations are async and return Results with GrandlineError. Every
/// user-controlled value reaches the store as a bound parameter, never as
/// interpolated SQL text.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Executes a parameterized statement and materializes the result set.
    async fn fetch(&self, sql: &str, params: &[ScalarValue]) -> Result<Table>;

    /// Closes the database connection.
    async fn close(&self) -> Result<()>;
}

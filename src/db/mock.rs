//! Mock database client for testing.
//!
//! Returns canned tables matched by a marker substring of the SQL text and
//! records every executed statement, so cache and section tests can assert
//! how often the store was actually hit.

use super::{DatabaseClient, ScalarValue, Table};
use crate::error::{GrandlineError, Result};
use async_trait::async_trait;
use std::sync::Mutex;

/// A statement the mock saw, as handed to the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub sql: String,
    pub params: Vec<ScalarValue>,
}

/// A mock database client that returns predefined results.
#[derive(Default)]
pub struct MockDatabaseClient {
    responses: Mutex<Vec<(String, Table)>>,
    failures: Mutex<Vec<String>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockDatabaseClient {
    /// Creates a new mock with no canned responses (everything is empty).
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the table returned for any statement whose
    /// SQL contains `marker`. Replacing simulates the store changing
    /// underneath the cache.
    pub fn respond(&self, marker: impl Into<String>, table: Table) {
        let marker = marker.into();
        let mut responses = self.responses.lock().unwrap();
        if let Some(entry) = responses.iter_mut().find(|(m, _)| *m == marker) {
            entry.1 = table;
        } else {
            responses.push((marker, table));
        }
    }

    /// Makes any statement whose SQL contains `marker` fail with a query
    /// error.
    pub fn fail_when(&self, marker: impl Into<String>) {
        self.failures.lock().unwrap().push(marker.into());
    }

    /// Number of statements executed so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Every statement executed so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn fetch(&self, sql: &str, params: &[ScalarValue]) -> Result<Table> {
        self.calls.lock().unwrap().push(RecordedCall {
            sql: sql.to_string(),
            params: params.to_vec(),
        });

        if let Some(marker) = self
            .failures
            .lock()
            .unwrap()
            .iter()
            .find(|marker| sql.contains(marker.as_str()))
        {
            return Err(GrandlineError::query(format!(
                "ERROR: statement rejected (matched '{marker}')"
            )));
        }

        let responses = self.responses.lock().unwrap();
        let table = responses
            .iter()
            .find(|(marker, _)| sql.contains(marker.as_str()))
            .map(|(_, table)| table.clone())
            .unwrap_or_default();

        Ok(table)
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// A client whose every fetch fails with a query error.
///
/// Used to test that a failing section degrades to a notice instead of
/// taking the page down.
#[derive(Default)]
pub struct FailingDatabaseClient;

impl FailingDatabaseClient {
    /// Creates a new failing client.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    async fn fetch(&self, _sql: &str, _params: &[ScalarValue]) -> Result<Table> {
        Err(GrandlineError::query(
            "ERROR: relation \"pirata\" does not exist",
        ))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Value;

    #[tokio::test]
    async fn test_mock_returns_canned_table() {
        let client = MockDatabaseClient::new();
        client.respond(
            "FROM Pirata",
            Table::with_data(["nomepersonagem"], vec![vec![Value::from("Luffy")]]),
        );

        let result = client
            .fetch("SELECT NomePersonagem FROM Pirata", &[])
            .await
            .unwrap();
        assert_eq!(result.row_count(), 1);
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_unmatched_is_empty() {
        let client = MockDatabaseClient::new();
        let result = client.fetch("SELECT 1", &[]).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_mock_records_params() {
        let client = MockDatabaseClient::new();
        client
            .fetch("SELECT 1 WHERE x >= $1", &[ScalarValue::Int(7)])
            .await
            .unwrap();

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].params, vec![ScalarValue::Int(7)]);
    }

    #[tokio::test]
    async fn test_mock_respond_replaces_existing_marker() {
        let client = MockDatabaseClient::new();
        client.respond(
            "FROM Bando",
            Table::with_data(["nomebando"], vec![vec![Value::from("Kaizoku-A")]]),
        );
        client.respond(
            "FROM Bando",
            Table::with_data(["nomebando"], vec![vec![Value::from("Kaizoku-B")]]),
        );

        let result = client.fetch("SELECT NomeBando FROM Bando", &[]).await.unwrap();
        assert_eq!(result.rows[0][0], Value::from("Kaizoku-B"));
    }

    #[tokio::test]
    async fn test_failing_client() {
        let client = FailingDatabaseClient::new();
        let result = client.fetch("SELECT 1", &[]).await;
        assert!(matches!(result, Err(GrandlineError::Query(_))));
    }
}

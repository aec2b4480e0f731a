use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use thiserror::Error;

use crate::database::models::Connection;

/// Errors from connection repositories
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatabaseError {
    #[error("Connection '{0}' not found.")]
    NotFound(String),

    #[error("Duplicate connection id: {0}")]
    DuplicateId(String),
}

/// Storage seam for connection records.
///
/// Handlers only talk to this trait, so the in-memory store can be swapped
/// for a persistent backend without touching the HTTP layer.
#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// All records in insertion order.
    async fn list(&self) -> Vec<Connection>;

    async fn find(&self, id: &str) -> Option<Connection>;

    /// Like `find`, but a missing record is an error.
    async fn get(&self, id: &str) -> Result<Connection, DatabaseError> {
        self.find(id)
            .await
            .ok_or_else(|| DatabaseError::NotFound(id.to_string()))
    }

    /// Replace `last_sync_at` and return the updated record. No other field changes.
    async fn update_last_sync_at(
        &self,
        id: &str,
        last_sync_at: DateTime<FixedOffset>,
    ) -> Result<Connection, DatabaseError>;

    async fn count(&self) -> usize {
        self.list().await.len()
    }
}

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::database::models::Connection;
use crate::database::repository::{ConnectionRepository, DatabaseError};
use crate::database::seed::seed_connections;

/// Process-wide connection store.
///
/// A `Vec` keeps insertion order for listing; lookups are linear, which is
/// fine for a seeded handful of records. All writes go through the single
/// write lock so concurrent updates to one record serialize.
#[derive(Clone, Default)]
pub struct MemoryConnectionRepository {
    records: Arc<RwLock<Vec<Connection>>>,
}

impl MemoryConnectionRepository {
    /// Build a store from initial records, rejecting duplicate ids
    pub fn new(records: Vec<Connection>) -> Result<Self, DatabaseError> {
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(DatabaseError::DuplicateId(record.id.clone()));
            }
        }

        Ok(Self {
            records: Arc::new(RwLock::new(records)),
        })
    }

    pub fn seeded() -> Result<Self, DatabaseError> {
        let repo = Self::new(seed_connections())?;
        info!("Seeded in-memory connection store");
        Ok(repo)
    }
}

#[async_trait]
impl ConnectionRepository for MemoryConnectionRepository {
    async fn list(&self) -> Vec<Connection> {
        self.records.read().await.clone()
    }

    async fn find(&self, id: &str) -> Option<Connection> {
        let records = self.records.read().await;
        records.iter().find(|c| c.id == id).cloned()
    }

    async fn update_last_sync_at(
        &self,
        id: &str,
        last_sync_at: DateTime<FixedOffset>,
    ) -> Result<Connection, DatabaseError> {
        let mut records = self.records.write().await;
        let Some(record) = records.iter_mut().find(|c| c.id == id) else {
            debug!("update_last_sync_at: no connection {}", id);
            return Err(DatabaseError::NotFound(id.to_string()));
        };

        record.last_sync_at = Some(last_sync_at);
        info!(
            connection_id = %id,
            last_sync_at = %last_sync_at.to_rfc3339(),
            "last_sync_at updated"
        );
        Ok(record.clone())
    }

    async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}

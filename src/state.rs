use std::sync::Arc;

use crate::database::{ConnectionRepository, DatabaseError, MemoryConnectionRepository};

#[derive(Clone)]
pub struct AppState {
    pub connections: Arc<dyn ConnectionRepository>,
}

impl AppState {
    pub fn new(connections: Arc<dyn ConnectionRepository>) -> Self {
        Self { connections }
    }

    /// State backed by the seeded in-memory store
    pub fn seeded() -> Result<Self, DatabaseError> {
        Ok(Self::new(Arc::new(MemoryConnectionRepository::seeded()?)))
    }
}

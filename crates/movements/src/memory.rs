//! In-memory movement source for testing.

use async_trait::async_trait;

use crate::Result;
use crate::record::MovementRecord;
use crate::source::MovementSource;

/// Movement source serving a fixed record batch from memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMovementSource {
    records: Vec<MovementRecord>,
}

impl InMemoryMovementSource {
    /// Creates a source over the given records.
    pub fn new(records: Vec<MovementRecord>) -> Self {
        Self { records }
    }

    /// Returns the number of records this source serves.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if this source serves no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl MovementSource for InMemoryMovementSource {
    async fn fetch_all(&self) -> Result<Vec<MovementRecord>> {
        Ok(self.records.clone())
    }
}

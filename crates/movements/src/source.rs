//! Source trait for movement record batches.

use async_trait::async_trait;

use crate::Result;
use crate::record::MovementRecord;

/// An ordered source of movement records, read once per pipeline run.
///
/// Sources return the whole batch as a finite sequence; there is no
/// streaming or pagination contract. A validation failure anywhere in the
/// batch fails the whole fetch.
#[async_trait]
pub trait MovementSource: Send + Sync {
    /// Fetches the full ordered batch of movement records for one run.
    async fn fetch_all(&self) -> Result<Vec<MovementRecord>>;
}

use async_trait::async_trait;

use super::{ItemKey, ItemQuery, Record, Result};

/// Key-value store holding league records in a single table.
///
/// Implementations own the physical record lifetime and the atomicity of a
/// single put. They must not retry on behalf of the caller.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Upserts a record, overwriting any record stored under the same key.
    async fn put(&self, key: &ItemKey, record: Record) -> Result<()>;

    /// Point lookup by composite key.
    async fn get(&self, key: &ItemKey) -> Result<Option<Record>>;

    /// Range query within one partition, ordered by sort key.
    async fn query(&self, query: &ItemQuery) -> Result<Vec<Record>>;
}

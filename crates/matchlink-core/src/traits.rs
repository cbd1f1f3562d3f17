use crate::types::{Neighbor, TraceRecord};

/// Maps text into a fixed-dimension vector. Implementations must be
/// deterministic for a given input.
pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn embed_text(&self, text: &str) -> anyhow::Result<Vec<f32>>;
}

/// The only coupling point to a concrete semantic-search backend.
///
/// The pipeline assumes nothing about the distance metric beyond
/// "smaller is more similar" and "non-negative".
pub trait VectorStore: Send + Sync {
    /// Drop and recreate an empty named collection. Idempotent: a missing
    /// collection is not an error.
    fn reset(&self, collection: &str) -> anyhow::Result<()>;

    /// Bulk insert of `(id, document)` pairs. Duplicate ids within one
    /// call resolve last-write-wins.
    fn upsert_all(&self, collection: &str, items: &[(String, String)]) -> anyhow::Result<()>;

    /// Up to `limit` nearest items for `text`, ascending by distance.
    fn query_by_text(
        &self,
        collection: &str,
        text: &str,
        limit: usize,
    ) -> anyhow::Result<Vec<Neighbor>>;
}

impl<T: VectorStore + ?Sized> VectorStore for std::sync::Arc<T> {
    fn reset(&self, collection: &str) -> anyhow::Result<()> {
        (**self).reset(collection)
    }

    fn upsert_all(&self, collection: &str, items: &[(String, String)]) -> anyhow::Result<()> {
        (**self).upsert_all(collection, items)
    }

    fn query_by_text(
        &self,
        collection: &str,
        text: &str,
        limit: usize,
    ) -> anyhow::Result<Vec<Neighbor>> {
        (**self).query_by_text(collection, text, limit)
    }
}

impl VectorStore for Box<dyn VectorStore> {
    fn reset(&self, collection: &str) -> anyhow::Result<()> {
        (**self).reset(collection)
    }

    fn upsert_all(&self, collection: &str, items: &[(String, String)]) -> anyhow::Result<()> {
        (**self).upsert_all(collection, items)
    }

    fn query_by_text(
        &self,
        collection: &str,
        text: &str,
        limit: usize,
    ) -> anyhow::Result<Vec<Neighbor>> {
        (**self).query_by_text(collection, text, limit)
    }
}

/// Append-only stream of scoring decisions, consumed by export/report
/// tooling. Never read back by the pipeline.
pub trait TraceSink: Send + Sync {
    fn append(&self, records: &[TraceRecord]) -> anyhow::Result<()>;
}

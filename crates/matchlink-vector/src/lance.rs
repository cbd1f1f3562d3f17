//! LanceDB-backed vector store.
//!
//! Each collection is one Lance table: `id`, `document`, and a
//! fixed-size `vector` column whose width follows the injected embedder.
//! `_distance` from `vector_search` is passed through untouched.

use anyhow::Result;
use futures::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use lancedb::{connect, Connection};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use arrow_array::{FixedSizeListArray, RecordBatch, RecordBatchIterator, StringArray};
use arrow_schema::{DataType, Field, Schema};

use matchlink_core::traits::{Embedder, VectorStore};
use matchlink_core::types::Neighbor;

pub struct LanceStore {
    db: Connection,
    embedder: Box<dyn Embedder>,
    runtime: tokio::runtime::Runtime,
}

impl LanceStore {
    /// Open (or create) a Lance database at `db_path`. Owns a runtime so
    /// the sync `VectorStore` surface can block on Lance's async API.
    pub fn open(db_path: &Path, embedder: Box<dyn Embedder>) -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        let db = runtime.block_on(connect(db_path.to_string_lossy().as_ref()).execute())?;
        Ok(Self { db, embedder, runtime })
    }

    fn schema(&self) -> Arc<Schema> {
        Arc::new(Schema::new(vec![
            Field::new("id", DataType::Utf8, false),
            Field::new("document", DataType::Utf8, false),
            Field::new(
                "vector",
                DataType::FixedSizeList(
                    Arc::new(Field::new("item", DataType::Float32, true)),
                    self.embedder.dim() as i32,
                ),
                true,
            ),
        ]))
    }

    async fn reset_async(&self, collection: &str) -> Result<()> {
        let names = self.db.table_names().execute().await?;
        if names.contains(&collection.to_string()) {
            self.db.drop_table(collection, &[]).await?;
        }
        let iter = RecordBatchIterator::new(vec![].into_iter(), self.schema());
        self.db.create_table(collection, Box::new(iter)).execute().await?;
        info!(collection, "reset lance collection");
        Ok(())
    }

    async fn upsert_async(&self, collection: &str, items: &[(String, String)]) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }

        // Last write wins within the batch.
        let mut ids: Vec<String> = Vec::new();
        let mut documents: Vec<String> = Vec::new();
        for (id, document) in items {
            match ids.iter().position(|existing| existing == id) {
                Some(i) => documents[i] = document.clone(),
                None => {
                    ids.push(id.clone());
                    documents.push(document.clone());
                }
            }
        }

        let mut vectors: Vec<Option<Vec<Option<f32>>>> = Vec::with_capacity(documents.len());
        for document in &documents {
            let embedding = self.embedder.embed_text(document)?;
            vectors.push(Some(embedding.into_iter().map(Some).collect()));
        }

        let schema = self.schema();
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(ids.clone())),
                Arc::new(StringArray::from(documents)),
                Arc::new(FixedSizeListArray::from_iter_primitive::<
                    arrow_array::types::Float32Type,
                    _,
                    _,
                >(vectors.into_iter(), self.embedder.dim() as i32)),
            ],
        )?;
        let reader = Box::new(RecordBatchIterator::new(vec![Ok(batch)].into_iter(), schema));

        let names = self.db.table_names().execute().await?;
        if !names.contains(&collection.to_string()) {
            self.db.create_table(collection, reader).execute().await?;
        } else {
            let table = self.db.open_table(collection).execute().await?;
            // Last write wins against rows already in the table.
            let mut merge = table.merge_insert(&["id"]);
            merge.when_matched_update_all(None).when_not_matched_insert_all();
            let _ = merge.execute(reader).await?;
        }
        info!(collection, count = ids.len(), "upserted documents");
        Ok(())
    }

    async fn query_async(&self, collection: &str, text: &str, limit: usize) -> Result<Vec<Neighbor>> {
        let names = self.db.table_names().execute().await?;
        if !names.contains(&collection.to_string()) {
            return Ok(Vec::new());
        }
        let query_embedding = self.embedder.embed_text(text)?;
        let table = self.db.open_table(collection).execute().await?;
        let mut stream = table.vector_search(query_embedding)?.limit(limit).execute().await?;

        let mut hits = Vec::new();
        while let Some(batch) = stream.try_next().await? {
            let ids = batch
                .column_by_name("id")
                .and_then(|c| c.as_any().downcast_ref::<StringArray>())
                .ok_or_else(|| anyhow::anyhow!("id column missing"))?;
            let distances = batch
                .column_by_name("_distance")
                .and_then(|c| c.as_any().downcast_ref::<arrow_array::Float32Array>())
                .ok_or_else(|| anyhow::anyhow!("_distance column missing"))?;
            for i in 0..batch.num_rows() {
                hits.push(Neighbor { id: ids.value(i).to_string(), distance: distances.value(i) });
            }
        }
        hits.truncate(limit);
        Ok(hits)
    }
}

impl VectorStore for LanceStore {
    fn reset(&self, collection: &str) -> Result<()> {
        self.runtime.block_on(self.reset_async(collection))
    }

    fn upsert_all(&self, collection: &str, items: &[(String, String)]) -> Result<()> {
        self.runtime.block_on(self.upsert_async(collection, items))
    }

    fn query_by_text(&self, collection: &str, text: &str, limit: usize) -> Result<Vec<Neighbor>> {
        self.runtime.block_on(self.query_async(collection, text, limit))
    }
}

//! Brute-force in-memory vector store.
//!
//! Embeds documents at upsert time and scans every row at query time with
//! a squared-L2 distance. Plenty for pools of a few thousand profiles, and
//! the zero-setup backend for tests and the CLI.

use anyhow::Result;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use matchlink_core::traits::{Embedder, VectorStore};
use matchlink_core::types::Neighbor;

type Rows = Vec<(String, Vec<f32>)>;

pub struct MemoryStore {
    embedder: Box<dyn Embedder>,
    collections: RwLock<HashMap<String, Rows>>,
}

impl MemoryStore {
    pub fn new(embedder: Box<dyn Embedder>) -> Self {
        Self { embedder, collections: RwLock::new(HashMap::new()) }
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

impl VectorStore for MemoryStore {
    fn reset(&self, collection: &str) -> Result<()> {
        let mut guard = self.collections.write().unwrap_or_else(PoisonError::into_inner);
        guard.insert(collection.to_string(), Vec::new());
        Ok(())
    }

    fn upsert_all(&self, collection: &str, items: &[(String, String)]) -> Result<()> {
        let mut embedded: Rows = Vec::with_capacity(items.len());
        for (id, document) in items {
            embedded.push((id.clone(), self.embedder.embed_text(document)?));
        }
        let mut guard = self.collections.write().unwrap_or_else(PoisonError::into_inner);
        let rows = guard.entry(collection.to_string()).or_default();
        for (id, vector) in embedded {
            match rows.iter_mut().find(|(existing, _)| *existing == id) {
                Some(row) => row.1 = vector,
                None => rows.push((id, vector)),
            }
        }
        Ok(())
    }

    fn query_by_text(&self, collection: &str, text: &str, limit: usize) -> Result<Vec<Neighbor>> {
        let query = self.embedder.embed_text(text)?;
        let guard = self.collections.read().unwrap_or_else(PoisonError::into_inner);
        let Some(rows) = guard.get(collection) else {
            return Ok(Vec::new());
        };
        let mut hits: Vec<Neighbor> = rows
            .iter()
            .map(|(id, vector)| Neighbor { id: id.clone(), distance: squared_l2(&query, vector) })
            .collect();
        hits.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(limit);
        Ok(hits)
    }
}

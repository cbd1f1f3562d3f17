//! The matchmaking ranking pipeline.
//!
//! One call: rebuild the profile collection, recall per objective,
//! normalize and combine signals, aggregate across objectives, return the
//! top-k. All derived scores live only for the duration of the call; the
//! store owns index state across calls.

use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use matchlink_core::config::RankConfig;
use matchlink_core::document::build_document;
use matchlink_core::profile::Profile;
use matchlink_core::role::role_score;
use matchlink_core::traits::{TraceSink, VectorStore};
use matchlink_core::types::{RankedMatch, TraceRecord};

pub const DEFAULT_COLLECTION: &str = "people_profiles";

/// Fixed preamble prepended to every objective before it hits the store.
const QUERY_PREAMBLE: &str = "I want someone who can help me achieve the following objective: ";

pub struct Matchmaker<S: VectorStore> {
    store: S,
    collection: String,
    config: RankConfig,
    trace_sink: Option<Arc<dyn TraceSink>>,
}

impl<S: VectorStore> Matchmaker<S> {
    pub fn new(store: S, config: RankConfig) -> Self {
        Self { store, collection: DEFAULT_COLLECTION.to_string(), config, trace_sink: None }
    }

    pub fn with_collection(mut self, name: &str) -> Self {
        self.collection = name.to_string();
        self
    }

    pub fn with_trace_sink(mut self, sink: Arc<dyn TraceSink>) -> Self {
        self.trace_sink = Some(sink);
        self
    }

    /// Rank `candidates` against every objective of `user`.
    ///
    /// The caller is responsible for excluding the user from `candidates`.
    /// Empty objectives or an empty pool yield an empty list, not an
    /// error. Store failures propagate; there is no degraded ranking.
    pub fn rank(
        &self,
        user: &Profile,
        candidates: &[Profile],
        debug: bool,
    ) -> Result<Vec<RankedMatch>> {
        if user.objectives.is_empty() {
            return Ok(Vec::new());
        }

        self.index(candidates)?;
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let candidate_map: HashMap<&str, &Profile> =
            candidates.iter().map(|c| (c.id.as_str(), c)).collect();

        let mut aggregated: HashMap<String, f32> = HashMap::new();
        // First-discovery order; the tie-break for equal aggregated scores.
        let mut discovered: Vec<String> = Vec::new();
        let mut trace_rows: Vec<TraceRecord> = Vec::new();

        for (objective_index, objective) in user.objectives.iter().enumerate() {
            let query = format!("{}{}", QUERY_PREAMBLE, objective);
            let limit = self.config.recall_k.min(candidates.len());
            let neighbors = self.store.query_by_text(&self.collection, &query, limit)?;

            let raw_scores: Vec<f32> =
                neighbors.iter().map(|n| 1.0 / (1.0 + n.distance)).collect();
            let total: f32 = raw_scores.iter().sum();
            let total = if total > 0.0 { total } else { 1.0 };

            for (rank, (neighbor, raw)) in neighbors.iter().zip(&raw_scores).enumerate() {
                // Ids the store returns but the pool does not contain are
                // stale index rows; they are skipped, never an error.
                let Some(candidate) = candidate_map.get(neighbor.id.as_str()) else {
                    continue;
                };

                let semantic_score = raw / total;
                let role = role_score(objective, candidate);
                let final_score =
                    self.config.semantic_weight * semantic_score + self.config.role_weight * role;

                let cumulative = aggregated.entry(neighbor.id.clone()).or_insert_with(|| {
                    discovered.push(neighbor.id.clone());
                    0.0
                });
                *cumulative += final_score;

                if debug {
                    trace_rows.push(TraceRecord {
                        objective_index,
                        objective: objective.clone(),
                        candidate_id: neighbor.id.clone(),
                        candidate_name: candidate.name.clone(),
                        rank: rank + 1,
                        distance: neighbor.distance,
                        semantic_score,
                        role_score: role,
                        final_score,
                        cumulative_score: *cumulative,
                    });
                }
            }
        }

        if debug {
            self.emit_trace(&trace_rows);
        }

        let mut order = discovered;
        // Stable sort: equal scores keep discovery order.
        order.sort_by(|a, b| {
            let sa = aggregated.get(a).copied().unwrap_or(0.0);
            let sb = aggregated.get(b).copied().unwrap_or(0.0);
            sb.partial_cmp(&sa).unwrap_or(std::cmp::Ordering::Equal)
        });
        order.truncate(self.config.top_k);

        Ok(order
            .into_iter()
            .map(|id| {
                let name = candidate_map.get(id.as_str()).and_then(|c| c.name.clone());
                let score = aggregated.get(&id).copied().unwrap_or(0.0);
                RankedMatch { id, name, score }
            })
            .collect())
    }

    /// Full rebuild per call: the index never contains stale or orphaned
    /// candidates from a previous, differently-scoped call.
    fn index(&self, candidates: &[Profile]) -> Result<()> {
        self.store.reset(&self.collection)?;
        let items: Vec<(String, String)> = candidates
            .iter()
            .map(|c| (c.id.clone(), build_document(c, &self.config.document)))
            .collect();
        if !items.is_empty() {
            self.store.upsert_all(&self.collection, &items)?;
            info!(count = items.len(), collection = %self.collection, "indexed candidate profiles");
        }
        Ok(())
    }

    /// A sink failure must never alter the returned ranking.
    fn emit_trace(&self, rows: &[TraceRecord]) {
        if rows.is_empty() {
            return;
        }
        if let Some(sink) = &self.trace_sink {
            if let Err(e) = sink.append(rows) {
                warn!(error = %e, "failed to append debug trace, ranking unaffected");
            }
        }
    }
}

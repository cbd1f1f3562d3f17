//! Domain types shared by the vector stores and the ranking pipeline.

use serde::{Deserialize, Serialize};

pub type ProfileId = String;

/// One nearest-neighbor result from a vector store query.
///
/// `distance` is the store's internal metric: non-negative, smaller means
/// more similar. Nothing beyond that is guaranteed about its scale, and
/// equal-distance ties carry no defined order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Neighbor {
    pub id: ProfileId,
    pub distance: f32,
}

/// One entry of the final ranked list returned by the pipeline.
///
/// `score` is the unrounded aggregated score; callers round for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedMatch {
    pub id: ProfileId,
    pub name: Option<String>,
    pub score: f32,
}

/// One scoring decision, emitted per (objective, candidate) pair when the
/// pipeline runs in debug mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceRecord {
    pub objective_index: usize,
    pub objective: String,
    pub candidate_id: ProfileId,
    pub candidate_name: Option<String>,
    /// 1-based recall rank within this objective's result list.
    pub rank: usize,
    pub distance: f32,
    pub semantic_score: f32,
    pub role_score: f32,
    pub final_score: f32,
    pub cumulative_score: f32,
}

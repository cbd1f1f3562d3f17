//! Role alignment scoring.
//!
//! A cheap lexical heuristic, deliberately decoupled from the vector
//! index so the role signal and the topical signal can be weighted
//! independently.

use std::collections::HashSet;

use crate::profile::Profile;

/// Keyword overlap between an objective and a candidate's role-bearing
/// fields, normalized by the objective's word count. Always in [0, 1];
/// exactly 0.0 when the candidate has no role text or there is no overlap.
pub fn role_score(objective: &str, candidate: &Profile) -> f32 {
    let mut parts: Vec<String> = Vec::new();

    for field in [
        candidate.role.as_deref(),
        candidate.title.as_deref(),
        candidate.designation.as_deref(),
        candidate.headline.as_deref(),
    ]
    .into_iter()
    .flatten()
    {
        if !field.trim().is_empty() {
            parts.push(field.to_lowercase());
        }
    }
    for alt in &candidate.roles {
        if !alt.trim().is_empty() {
            parts.push(alt.to_lowercase());
        }
    }

    if parts.is_empty() {
        return 0.0;
    }

    let role_text = parts.join(" ");
    let role_words: HashSet<&str> = role_text.split_whitespace().collect();
    let objective_lower = objective.to_lowercase();
    let objective_words: HashSet<&str> = objective_lower.split_whitespace().collect();

    let overlap = objective_words.intersection(&role_words).count();
    if overlap == 0 {
        return 0.0;
    }

    (overlap as f32 / objective_words.len().max(1) as f32).min(1.0)
}

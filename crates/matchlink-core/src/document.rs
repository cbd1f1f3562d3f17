//! Retrieval document construction.
//!
//! Field importance is encoded by structural repetition rather than
//! numeric weighting: skills and solutions are repeated so they dominate
//! the embedding signal, the bio is repeated less and clipped so it only
//! provides weak context. Role/title fields are excluded on purpose; role
//! alignment is scored separately, outside the vector index.

use serde::Deserialize;

use crate::profile::Profile;

/// Bio text is clipped to this many characters before it enters the
/// document. Character-based so multi-byte text never splits a code point.
pub const BIO_MAX_CHARS: usize = 200;

/// Repetition counts for each document section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    pub skills_repeat: usize,
    pub solutions_repeat: usize,
    pub bio_repeat: usize,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self { skills_repeat: 3, solutions_repeat: 4, bio_repeat: 2 }
    }
}

/// Build the indexable text blob for one candidate. Pure function of the
/// profile and the repetition counts.
pub fn build_document(profile: &Profile, cfg: &DocumentConfig) -> String {
    let skills = profile.skills.join(", ");
    let solutions = profile.solutions.join(", ");
    let bio: String = profile
        .bio
        .as_deref()
        .unwrap_or("")
        .chars()
        .take(BIO_MAX_CHARS)
        .collect();

    let mut sections = Vec::new();
    for _ in 0..cfg.skills_repeat {
        sections.push(format!("Skills: {}", skills));
    }
    for _ in 0..cfg.solutions_repeat {
        sections.push(format!("Solutions: {}", solutions));
    }
    for _ in 0..cfg.bio_repeat {
        sections.push(format!("Background: {}", bio));
    }

    sections.join("\n").trim().to_string()
}

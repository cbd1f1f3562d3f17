//! Canonical representation of a person.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Error, Result};

/// A person in the matching pool.
///
/// Every field other than `id` is optional and defaults to empty/absent;
/// an absent field simply contributes nothing to scoring. `objectives` is
/// only meaningful on the profile acting as the "user" of a ranking call.
///
/// Unknown input fields are preserved opaquely in `extra` so that upstream
/// schema additions never fail a load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub id: String,
    pub name: Option<String>,
    pub bio: Option<String>,

    pub skills: Vec<String>,
    pub solutions: Vec<String>,
    pub objectives: Vec<String>,

    // Role/title signals. Consulted by the role scorer in this order:
    // role, title, designation, headline, then each entry of `roles`.
    // `current_role` is carried for upstream compatibility but not scored.
    pub role: Option<String>,
    #[serde(alias = "currentRole")]
    pub current_role: Option<String>,
    pub title: Option<String>,
    pub designation: Option<String>,
    pub headline: Option<String>,
    pub roles: Vec<String>,

    pub experience: Vec<serde_json::Value>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Profile {
    /// Parse a loosely-structured input record. Fails only when `id` is
    /// missing or empty.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let profile: Profile =
            serde_json::from_value(value).map_err(|e| Error::InvalidProfile(e.to_string()))?;
        if profile.id.trim().is_empty() {
            return Err(Error::InvalidProfile("missing or empty `id`".to_string()));
        }
        Ok(profile)
    }
}

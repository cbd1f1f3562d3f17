//! Lightweight configuration loader.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*`
//! env vars, plus the typed tunables of the ranking pipeline.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::env;

use crate::document::DocumentConfig;
use crate::error::Error;

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_"));

        Ok(Self { figment })
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::Error::new(Error::InvalidConfig(format!("'{}': {}", key, e))))
    }
}

/// Tunables of one ranking call. Every field has a default so a partial
/// `[match]` section (or none at all) works.
///
/// Recognized keys: `recall_k`, `top_k`, `semantic_weight`, `role_weight`
/// and the nested `document` section (`skills_repeat`, `solutions_repeat`,
/// `bio_repeat`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Recall breadth per objective; candidates outside the nearest
    /// `recall_k` contribute zero for that objective.
    pub recall_k: usize,
    /// Size of the returned ranked list.
    pub top_k: usize,
    pub semantic_weight: f32,
    /// Soft tie-breaker, not a primary signal.
    pub role_weight: f32,
    pub document: DocumentConfig,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            recall_k: 7,
            top_k: 5,
            semantic_weight: 0.9,
            role_weight: 0.0,
            document: DocumentConfig::default(),
        }
    }
}

use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use tracing::warn;

use matchlink_core::config::{Config, RankConfig};
use matchlink_core::profile::Profile;
use matchlink_core::traits::VectorStore;
use matchlink_embed::HashEmbedder;
use matchlink_rank::{JsonlTraceSink, Matchmaker};
use matchlink_vector::{LanceStore, MemoryStore};

#[derive(Debug, Deserialize)]
struct ObjectiveEntry {
    user_id: String,
    objectives: Vec<String>,
}

fn load_profiles(path: &PathBuf) -> anyhow::Result<Vec<Profile>> {
    let raw = std::fs::read_to_string(path)?;
    let values: Vec<serde_json::Value> = serde_json::from_str(&raw)?;
    let mut profiles = Vec::with_capacity(values.len());
    for value in values {
        // A bad record aborts that profile only, never the whole load.
        match Profile::from_value(value) {
            Ok(p) => profiles.push(p),
            Err(e) => warn!(error = %e, "skipping profile"),
        }
    }
    Ok(profiles)
}

fn load_objectives(path: &PathBuf, user_id: &str) -> anyhow::Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)?;
    let entries: Vec<ObjectiveEntry> = serde_json::from_str(&raw)?;
    Ok(entries
        .into_iter()
        .find(|e| e.user_id == user_id)
        .map(|e| e.objectives)
        .unwrap_or_default())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut user_id = None;
    let mut debug = false;
    let mut use_lance = false;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--debug" | "-d" => debug = true,
            "--lance" => use_lance = true,
            _ if !args[i].starts_with('-') => user_id = Some(args[i].clone()),
            other => {
                eprintln!("Unknown flag: {}", other);
                std::process::exit(1);
            }
        }
        i += 1;
    }
    let Some(user_id) = user_id else {
        eprintln!("Usage: matchlink [--debug] [--lance] <user_id>");
        std::process::exit(1);
    };

    let people_file: String = config
        .get("data.people_file")
        .unwrap_or_else(|_| "people_profiles.json".to_string());
    let objectives_file: String = config
        .get("data.objectives_file")
        .unwrap_or_else(|_| "networking_objectives.json".to_string());
    let rank_config: RankConfig = config.get("match").unwrap_or_default();

    let profiles = load_profiles(&PathBuf::from(&people_file))?;
    let objectives = load_objectives(&PathBuf::from(&objectives_file), &user_id)?;

    let mut user = profiles
        .iter()
        .find(|p| p.id == user_id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("user '{}' not found in {}", user_id, people_file))?;
    user.objectives = objectives;
    let candidates: Vec<Profile> = profiles.into_iter().filter(|p| p.id != user_id).collect();

    println!("Matchlink");
    println!("=========");
    println!("User: {} ({} objectives)", user_id, user.objectives.len());
    println!("Candidate pool: {}", candidates.len());

    let store: Box<dyn VectorStore> = if use_lance {
        let lance_dir: String = config
            .get("data.lancedb_dir")
            .unwrap_or_else(|_| "./data/lancedb".to_string());
        Box::new(LanceStore::open(
            &PathBuf::from(lance_dir),
            Box::new(HashEmbedder::default()),
        )?)
    } else {
        Box::new(MemoryStore::new(Box::new(HashEmbedder::default())))
    };

    let mut matcher = Matchmaker::new(store, rank_config);
    if debug {
        let trace_file: String = config
            .get("data.trace_file")
            .unwrap_or_else(|_| "matchmaking_trace.jsonl".to_string());
        println!("Debug trace: {}", trace_file);
        matcher = matcher.with_trace_sink(Arc::new(JsonlTraceSink::new(trace_file)));
    }

    let ranked = matcher.rank(&user, &candidates, debug)?;
    if ranked.is_empty() {
        println!("No matches (empty objectives or candidate pool).");
        return Ok(());
    }

    println!("\nTop matches:");
    for (i, m) in ranked.iter().enumerate() {
        let name = m.name.as_deref().unwrap_or(&m.id);
        // Display rounding only; ordering is decided on unrounded scores.
        println!("{:>2}. {:<30} {:.6}  ({})", i + 1, name, m.score, m.id);
    }
    Ok(())
}

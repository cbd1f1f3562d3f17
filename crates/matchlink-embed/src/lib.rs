//! Deterministic local embedding backend.
//!
//! Token feature-hashing into a fixed-dimension L2-normalized vector.
//! Not a semantic model: two documents sharing tokens land near each
//! other, which is enough for the local vector stores and for tests.
//! Model-backed embedding lives behind whatever remote store is plugged
//! in instead.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

use anyhow::Result;
use std::hash::{Hash, Hasher};
use twox_hash::XxHash64;

use matchlink_core::traits::Embedder;

pub const DEFAULT_DIM: usize = 256;

pub struct HashEmbedder {
    dim: usize,
}

impl HashEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIM)
    }
}

impl Embedder for HashEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        let mut v = vec![0f32; self.dim];
        for token in text.to_lowercase().split_whitespace() {
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
            v[idx] += 0.5 + val;
        }
        let norm = (v.iter().map(|x| x * x).sum::<f32>()).sqrt().max(1e-6);
        for x in &mut v {
            *x /= norm;
        }
        Ok(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeddings_are_deterministic_and_normalized() {
        let embedder = HashEmbedder::default();
        let a = embedder.embed_text("fundraising vc intros").expect("embed");
        let b = embedder.embed_text("fundraising vc intros").expect("embed");
        assert_eq!(a, b);
        let norm: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4);
    }

    #[test]
    fn shared_tokens_move_vectors_closer() {
        let embedder = HashEmbedder::default();
        let q = embedder.embed_text("fundraising help").expect("embed");
        let near = embedder.embed_text("fundraising vc").expect("embed");
        let far = embedder.embed_text("backend engineering").expect("embed");
        let dot = |a: &[f32], b: &[f32]| a.iter().zip(b).map(|(x, y)| x * y).sum::<f32>();
        assert!(dot(&q, &near) > dot(&q, &far));
    }
}

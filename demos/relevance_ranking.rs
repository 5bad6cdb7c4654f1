//! Top-K relevance ranking.
//!
//! Rank a candidate pool against a query embedding, then tighten the
//! result with a score cutoff.
//!
//! Run: `cargo run --example relevance_ranking`

use rank_select::topk::{top_k_with_ids, TopKConfig};

fn main() {
    let query = vec![1.0, 0.2, 0.0];

    let labels = [
        "intro-to-rust",
        "rust-ownership",
        "python-basics",
        "gc-languages",
        "borrow-checker",
    ];
    let embeddings: Vec<Vec<f32>> = vec![
        vec![0.9, 0.3, 0.1], // intro-to-rust
        vec![1.0, 0.1, 0.0], // rust-ownership
        vec![0.1, 0.2, 1.0], // python-basics
        vec![0.0, 0.9, 0.4], // gc-languages
        vec![0.8, 0.2, 0.1], // borrow-checker
    ];

    let ranked = top_k_with_ids(&query, &embeddings, &labels, TopKConfig::new(3));
    println!("top 3:");
    for (id, score) in ranked.iter() {
        println!("  {score:.4}  {id}");
    }

    let config = TopKConfig::new(3).with_cutoff(0.99);
    let strict = top_k_with_ids(&query, &embeddings, &labels, config);
    println!("top 3 above 0.99:");
    for (id, score) in strict.iter() {
        println!("  {score:.4}  {id}");
    }
}

//! MMR diversity selection.
//!
//! Pick from a pool where plain relevance would return near-duplicates.
//!
//! ```text
//! λ=1.0 → pure relevance
//! λ=0.5 → balanced (default)
//! λ=0.0 → pure diversity
//! ```
//!
//! Run: `cargo run --example diverse_selection`

use rank_select::diversity::{mmr_with_ids, MmrConfig, Overlap};

fn main() {
    let query = vec![0.9, 0.2, 0.1];

    let labels = [
        "async-guide",
        "async-guide-v2",
        "async-tutorial",
        "channels-post",
        "wasm-notes",
    ];
    let embeddings: Vec<Vec<f32>> = vec![
        vec![1.0, 0.0, 0.0],  // async-guide
        vec![0.98, 0.1, 0.0], // async-guide-v2: near-duplicate
        vec![0.95, 0.2, 0.0], // async-tutorial: same topic again
        vec![0.1, 1.0, 0.0],  // channels-post: different topic
        vec![0.0, 0.1, 1.0],  // wasm-notes: different again
    ];

    for lambda in [1.0, 0.5, 0.0] {
        let config = MmrConfig::new(lambda).with_k(3);
        let picked = mmr_with_ids(&query, &embeddings, &labels, config);
        println!("λ={lambda:.1} last-overlap: {:?}", picked.ids);
    }

    let classic = MmrConfig::new(0.5).with_k(3).with_overlap(Overlap::MaxSelected);
    let picked = mmr_with_ids(&query, &embeddings, &labels, classic);
    println!("λ=0.5 max-overlap:  {:?}", picked.ids);
}

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rank_select::{try_mmr, try_top_k, MmrConfig, Overlap, TopKConfig};

#[derive(Arbitrary, Debug)]
struct SelectInput {
    query: Vec<f32>,
    candidates: Vec<Vec<f32>>,
    k: usize,
    lambda: f32,
    cutoff: Option<f32>,
    max_overlap: bool,
}

fuzz_target!(|input: SelectInput| {
    let well_formed = input
        .candidates
        .iter()
        .all(|c| c.len() == input.query.len());

    // Top-K must never panic; size is bounded by min(k, pool).
    let mut config = TopKConfig::new(input.k);
    if let Some(cutoff) = input.cutoff {
        config = config.with_cutoff(cutoff);
    }
    match try_top_k(&input.query, &input.candidates, config) {
        Ok(picked) => {
            assert!(well_formed);
            assert!(picked.len() <= input.k.min(input.candidates.len()));
            assert_eq!(picked.scores.len(), picked.ids.len());
        }
        Err(_) => assert!(!well_formed),
    }

    // MMR must never panic; size is exactly min(k, pool) and ids never
    // repeat, whatever floats come in.
    let overlap = if input.max_overlap {
        Overlap::MaxSelected
    } else {
        Overlap::LastSelected
    };
    let config = MmrConfig::new(input.lambda).with_k(input.k).with_overlap(overlap);
    match try_mmr(&input.query, &input.candidates, config) {
        Ok(picked) => {
            assert!(well_formed);
            assert_eq!(picked.len(), input.k.min(input.candidates.len()));
            assert_eq!(picked.scores.len(), picked.ids.len());
            let mut ids = picked.ids.clone();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), picked.ids.len());
        }
        Err(_) => assert!(!well_formed),
    }
});

//! Diversity-aware selection via Maximal Marginal Relevance (MMR).
//!
//! Plain top-K happily returns five near-duplicates of the same chunk.
//! MMR picks greedily instead, charging each candidate for how much it
//! overlaps what is already selected:
//!
//! ```text
//! mmr(c) = λ · relevance(c) − (1 − λ) · overlap(c, selected)
//! ```
//!
//! `relevance` is cosine similarity to the query, `overlap` is cosine
//! similarity to the selection (see [`Overlap`]), and λ slides between
//! the two concerns:
//!
//! | λ | Behavior |
//! |------|----------|
//! | 1.0 | Pure relevance, same order as [`crate::topk`] |
//! | 0.7 | Mostly relevance, light redundancy penalty |
//! | 0.5 | Balanced (default) |
//! | 0.3 | Diversity-heavy |
//! | 0.0 | Pure diversity, relevance ignored |
//!
//! The first pick has nothing to overlap with, so it lands on the
//! highest λ-scaled relevance. At λ = 0 every first-pick score ties at
//! zero and the earliest pool candidate opens the selection; ties are
//! always broken toward the earliest candidate.
//!
//! Recorded scores are the marginal values at pick time. They decrease
//! non-monotonically, can go negative, and rank items within one
//! selection only.
//!
//! # Overlap modes
//!
//! [`Overlap::LastSelected`] (default) charges only for similarity to
//! the *most recent* pick: O(k·n·d), suited to streaming-style "don't
//! repeat yourself" selection, but an early pick can be echoed later
//! without penalty. [`Overlap::MaxSelected`] charges for the worst
//! overlap with *any* pick, the classic MMR formulation, at O(k²·n·d).
//!
//! # Example
//!
//! ```rust
//! use rank_select::diversity::{mmr, MmrConfig};
//!
//! let query = vec![1.0, 0.0];
//! let candidates = vec![
//!     vec![0.9, 0.1],   // most relevant
//!     vec![0.85, 0.15], // nearly a duplicate of it
//!     vec![0.0, 1.0],   // orthogonal
//! ];
//!
//! // Diversity-heavy: the near-duplicate loses its slot.
//! let picked = mmr(&query, &candidates, MmrConfig::new(0.3).with_k(2));
//! assert_eq!(picked.ids, vec![0, 2]);
//! ```

use crate::{similarity, simd, Result, SelectError, Selection};

/// How a candidate's overlap with the current selection is reduced to
/// one number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Overlap {
    /// Similarity to the most recently selected item only.
    #[default]
    LastSelected,
    /// Maximum similarity over every selected item (classic MMR).
    MaxSelected,
}

/// Configuration for MMR selection.
///
/// Defaults: rerank the whole pool (`k = None`), balanced `lambda =
/// 0.5`, [`Overlap::LastSelected`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MmrConfig {
    /// Number of items to select. `None` reranks the entire pool;
    /// values beyond the pool size clamp to it.
    pub k: Option<usize>,
    /// Relevance/diversity trade-off in `[0, 1]`. Values outside the
    /// range are not rejected; they extrapolate the same formula.
    pub lambda: f32,
    /// Overlap reduction mode.
    pub overlap: Overlap,
}

impl Default for MmrConfig {
    fn default() -> Self {
        Self { k: None, lambda: 0.5, overlap: Overlap::LastSelected }
    }
}

impl MmrConfig {
    /// Rerank the whole pool at the given λ.
    #[must_use]
    pub const fn new(lambda: f32) -> Self {
        Self { k: None, lambda, overlap: Overlap::LastSelected }
    }

    /// Set the number of items to select.
    #[must_use]
    pub const fn with_k(mut self, k: usize) -> Self {
        self.k = Some(k);
        self
    }

    /// Set the relevance/diversity trade-off.
    #[must_use]
    pub const fn with_lambda(mut self, lambda: f32) -> Self {
        self.lambda = lambda;
        self
    }

    /// Set the overlap reduction mode.
    #[must_use]
    pub const fn with_overlap(mut self, overlap: Overlap) -> Self {
        self.overlap = overlap;
        self
    }
}

/// Greedily select up to K candidates balancing relevance against
/// redundancy.
///
/// Identifiers are positions in `candidates` (`0..n`). Scores are the
/// marginal MMR values at pick time, best-first but not monotone.
///
/// # Errors
///
/// [`SelectError::DimensionMismatch`] if any candidate's length differs
/// from the query's.
pub fn try_mmr<V: AsRef<[f32]>>(
    query: &[f32],
    candidates: &[V],
    config: MmrConfig,
) -> Result<Selection<usize>> {
    let ids: Vec<usize> = (0..candidates.len()).collect();
    select(query, candidates, &ids, config)
}

/// Greedily select up to K candidates balancing relevance against
/// redundancy.
///
/// # Panics
///
/// Panics if any candidate's length differs from the query's. Use
/// [`try_mmr`] to handle malformed pools without panicking.
#[must_use]
pub fn mmr<V: AsRef<[f32]>>(
    query: &[f32],
    candidates: &[V],
    config: MmrConfig,
) -> Selection<usize> {
    try_mmr(query, candidates, config).expect("query and candidate dimensions must match")
}

/// [`try_mmr`] with caller-supplied identifiers instead of positions.
///
/// `ids[i]` labels `candidates[i]`.
///
/// # Errors
///
/// [`SelectError::LengthMismatch`] if `ids` and `candidates` differ in
/// length, [`SelectError::DimensionMismatch`] if any candidate's length
/// differs from the query's.
pub fn try_mmr_with_ids<I: Clone, V: AsRef<[f32]>>(
    query: &[f32],
    candidates: &[V],
    ids: &[I],
    config: MmrConfig,
) -> Result<Selection<I>> {
    if ids.len() != candidates.len() {
        return Err(SelectError::LengthMismatch {
            vectors: candidates.len(),
            ids: ids.len(),
        });
    }
    select(query, candidates, ids, config)
}

/// [`mmr`] with caller-supplied identifiers instead of positions.
///
/// # Panics
///
/// Panics if `ids` and `candidates` differ in length or any candidate's
/// dimension differs from the query's. Use [`try_mmr_with_ids`] to
/// handle malformed pools without panicking.
#[must_use]
pub fn mmr_with_ids<I: Clone, V: AsRef<[f32]>>(
    query: &[f32],
    candidates: &[V],
    ids: &[I],
    config: MmrConfig,
) -> Selection<I> {
    try_mmr_with_ids(query, candidates, ids, config)
        .expect("identifiers and candidate dimensions must match")
}

/// Candidate-to-candidate cosine. Relevance scoring has already checked
/// every candidate against the query, so no length check here.
fn pairwise(a: &[f32], b: &[f32]) -> f32 {
    simd::dot(a, b) / (simd::norm(a) * simd::norm(b))
}

fn select<I: Clone, V: AsRef<[f32]>>(
    query: &[f32],
    candidates: &[V],
    ids: &[I],
    config: MmrConfig,
) -> Result<Selection<I>> {
    let pool = candidates.len();
    let take = config.k.unwrap_or(pool).min(pool);

    let mut relevance = Vec::with_capacity(pool);
    for candidate in candidates {
        relevance.push(similarity::try_cosine(query, candidate.as_ref())?);
    }

    let mut selection = Selection::with_capacity(take);
    if take == 0 {
        return Ok(selection);
    }

    let lambda = config.lambda;

    // Unselected pool positions, kept in input order so that the strict
    // `>` comparisons below resolve score ties toward the earliest
    // candidate. `Vec::remove` keeps the order; don't swap-remove here.
    let mut remaining: Vec<usize> = (0..pool).collect();
    let mut chosen: Vec<usize> = Vec::with_capacity(take);

    while chosen.len() < take {
        let mut best_at = 0;
        let mut best_score = f32::NEG_INFINITY;
        for (at, &cand) in remaining.iter().enumerate() {
            let score = if chosen.is_empty() {
                // First pick: nothing to overlap with yet.
                lambda * relevance[cand]
            } else {
                let candidate = candidates[cand].as_ref();
                let overlap = match config.overlap {
                    Overlap::LastSelected => {
                        pairwise(candidate, candidates[chosen[chosen.len() - 1]].as_ref())
                    }
                    Overlap::MaxSelected => chosen
                        .iter()
                        .map(|&held| pairwise(candidate, candidates[held].as_ref()))
                        .fold(f32::NEG_INFINITY, f32::max),
                };
                lambda * relevance[cand] - (1.0 - lambda) * overlap
            };
            if score > best_score {
                best_score = score;
                best_at = at;
            }
        }
        let pick = remaining.remove(best_at);
        chosen.push(pick);
        selection.push(best_score, ids[pick].clone());
    }

    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> Vec<Vec<f32>> {
        vec![vec![1.0, 0.0], vec![0.9, 0.1], vec![-1.0, 0.0]]
    }

    #[test]
    fn first_pick_is_scaled_max_relevance() {
        let picked = mmr(&[1.0, 0.0], &pool(), MmrConfig::new(0.7));
        assert_eq!(picked.ids[0], 0);
        assert!((picked.scores[0] - 0.7).abs() < 1e-6);
    }

    #[test]
    fn balanced_lambda_breaks_marginal_tie_toward_input_order() {
        // After picking candidate 0, both survivors land on a marginal
        // score of exactly 0: candidate 1's relevance equals its overlap
        // with candidate 0, and candidate 2's λ-relevance cancels its
        // overlap penalty. Earliest input position wins.
        let picked = mmr(&[1.0, 0.0], &pool(), MmrConfig::new(0.5).with_k(2));
        assert_eq!(picked.ids, vec![0, 1]);
        assert!((picked.scores[0] - 0.5).abs() < 1e-6);
        assert!(picked.scores[1].abs() < 1e-6);
    }

    #[test]
    fn low_lambda_penalizes_near_duplicates() {
        let candidates = vec![vec![0.9, 0.1], vec![0.9, 0.1], vec![0.0, 1.0]];
        let picked = mmr(&[1.0, 0.0], &candidates, MmrConfig::new(0.3).with_k(2));
        assert_eq!(picked.ids, vec![0, 2], "exact duplicate must lose its slot");
    }

    #[test]
    fn lambda_one_matches_relevance_order() {
        let picked = mmr(&[1.0, 0.0], &pool(), MmrConfig::new(1.0));
        let ranked = crate::topk::top_k(&[1.0, 0.0], &pool(), crate::topk::TopKConfig::new(3));
        assert_eq!(picked.ids, ranked.ids);
        for (a, b) in picked.scores.iter().zip(&ranked.scores) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn lambda_zero_ignores_relevance() {
        // Everything ties at zero first, so input order opens; after
        // that only dissimilarity to the last pick counts.
        let candidates = vec![vec![1.0, 0.0], vec![0.95, 0.05], vec![0.0, 1.0]];
        let picked = mmr(&[1.0, 0.0], &candidates, MmrConfig::new(0.0));
        assert_eq!(picked.ids, vec![0, 2, 1]);
    }

    #[test]
    fn default_reranks_whole_pool() {
        let picked = mmr(&[1.0, 0.0], &pool(), MmrConfig::default());
        assert_eq!(picked.len(), 3);
    }

    #[test]
    fn k_clamps_to_pool_size() {
        let picked = mmr(&[1.0, 0.0], &pool(), MmrConfig::default().with_k(10));
        assert_eq!(picked.len(), 3);
    }

    #[test]
    fn k_zero_selects_nothing() {
        let picked = mmr(&[1.0, 0.0], &pool(), MmrConfig::default().with_k(0));
        assert!(picked.is_empty());
    }

    #[test]
    fn empty_pool_selects_nothing() {
        let none: Vec<Vec<f32>> = Vec::new();
        let picked = mmr(&[1.0, 0.0], &none, MmrConfig::default());
        assert!(picked.is_empty());
    }

    #[test]
    fn overlap_modes_diverge_beyond_two_picks() {
        // The third pick is where the modes part ways: `x` echoes the
        // first pick `a` (cosine ≈ 0.9) but is orthogonal to the second
        // pick `b`, while `y` overlaps both moderately (≈ 0.4).
        let query = vec![0.8, 0.5, 0.0, 0.3317];
        let candidates = vec![
            vec![1.0, 0.0, 0.0, 0.0],    // a: picked first
            vec![0.0, 1.0, 0.0, 0.0],    // b: picked second
            vec![0.9, 0.0, 0.436, 0.0],  // x: echo of a
            vec![0.4, 0.4, 0.0, 0.8246], // y: moderate overlap with both
        ];

        let last = mmr(&query, &candidates, MmrConfig::new(0.5).with_k(3));
        assert_eq!(last.ids, vec![0, 1, 2], "last-only overlap forgets the echo of a");

        let config = MmrConfig::new(0.5).with_k(3).with_overlap(Overlap::MaxSelected);
        let max = mmr(&query, &candidates, config);
        assert_eq!(max.ids, vec![0, 1, 3], "max overlap remembers the echo of a");
    }

    #[test]
    fn modes_agree_up_to_two_picks() {
        // With at most one prior pick, last and max reduce identically.
        let query = [1.0, 0.0];
        let last = mmr(&query, &pool(), MmrConfig::new(0.4).with_k(2));
        let config = MmrConfig::new(0.4).with_k(2).with_overlap(Overlap::MaxSelected);
        let max = mmr(&query, &pool(), config);
        assert_eq!(last, max);
    }

    #[test]
    fn with_ids_carries_labels() {
        let ids = ["anchor", "near", "opposite"];
        let picked = mmr_with_ids(&[1.0, 0.0], &pool(), &ids, MmrConfig::default().with_k(2));
        assert_eq!(picked.ids[0], "anchor");
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn with_ids_rejects_misaligned_labels() {
        let ids = ["a", "b"];
        let err =
            try_mmr_with_ids(&[1.0, 0.0], &pool(), &ids, MmrConfig::default()).unwrap_err();
        assert_eq!(err, SelectError::LengthMismatch { vectors: 3, ids: 2 });
    }

    #[test]
    fn mismatched_candidate_dimension_is_reported() {
        let candidates = vec![vec![1.0, 0.0], vec![1.0]];
        let err = try_mmr(&[1.0, 0.0], &candidates, MmrConfig::default()).unwrap_err();
        assert_eq!(err, SelectError::DimensionMismatch { expected: 2, got: 1 });
    }

    #[test]
    #[should_panic(expected = "query and candidate dimensions must match")]
    fn panicking_wrapper_names_the_contract() {
        let candidates = vec![vec![1.0, 0.0, 0.0]];
        let _ = mmr(&[1.0, 0.0], &candidates, MmrConfig::default());
    }
}

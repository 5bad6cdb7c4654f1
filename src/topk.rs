//! Pure relevance selection.
//!
//! Scores every candidate against the query with cosine similarity,
//! optionally drops candidates at or below a cutoff, and keeps the best
//! K in descending order. Ties keep their input order (stable sort), so
//! earlier candidates win equal scores.
//!
//! # Example
//!
//! ```rust
//! use rank_select::topk::{top_k, TopKConfig};
//!
//! let query = vec![1.0, 0.0];
//! let candidates = vec![
//!     vec![1.0, 0.0],
//!     vec![0.9, 0.1],
//!     vec![-1.0, 0.0],
//! ];
//!
//! // Keep the 2 best above 0.5.
//! let picked = top_k(&query, &candidates, TopKConfig::new(2).with_cutoff(0.5));
//! assert_eq!(picked.ids, vec![0, 1]);
//! assert!(picked.scores[0] > picked.scores[1]);
//! ```

use crate::{similarity, Result, SelectError, Selection};

/// Configuration for top-K selection.
///
/// Defaults: `k = 2`, no cutoff.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopKConfig {
    /// Number of results to keep. May exceed the pool size, in which
    /// case every surviving candidate is returned.
    pub k: usize,
    /// Keep only candidates scoring *strictly above* this value. A
    /// candidate scoring exactly the cutoff is dropped, and `NaN`
    /// scores never survive.
    pub cutoff: Option<f32>,
}

impl Default for TopKConfig {
    fn default() -> Self {
        Self { k: 2, cutoff: None }
    }
}

impl TopKConfig {
    /// Keep the best `k`, with no cutoff.
    #[must_use]
    pub const fn new(k: usize) -> Self {
        Self { k, cutoff: None }
    }

    /// Set the number of results to keep.
    #[must_use]
    pub const fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set the strict minimum-score cutoff.
    #[must_use]
    pub const fn with_cutoff(mut self, cutoff: f32) -> Self {
        self.cutoff = Some(cutoff);
        self
    }
}

/// Select the K candidates most similar to `query`.
///
/// Identifiers are positions in `candidates` (`0..n`).
///
/// # Errors
///
/// [`SelectError::DimensionMismatch`] if any candidate's length differs
/// from the query's.
pub fn try_top_k<V: AsRef<[f32]>>(
    query: &[f32],
    candidates: &[V],
    config: TopKConfig,
) -> Result<Selection<usize>> {
    let ids: Vec<usize> = (0..candidates.len()).collect();
    select(query, candidates, &ids, config)
}

/// Select the K candidates most similar to `query`.
///
/// # Panics
///
/// Panics if any candidate's length differs from the query's. Use
/// [`try_top_k`] to handle malformed pools without panicking.
#[must_use]
pub fn top_k<V: AsRef<[f32]>>(
    query: &[f32],
    candidates: &[V],
    config: TopKConfig,
) -> Selection<usize> {
    try_top_k(query, candidates, config).expect("query and candidate dimensions must match")
}

/// [`try_top_k`] with caller-supplied identifiers instead of positions.
///
/// `ids[i]` labels `candidates[i]`.
///
/// # Errors
///
/// [`SelectError::LengthMismatch`] if `ids` and `candidates` differ in
/// length, [`SelectError::DimensionMismatch`] if any candidate's length
/// differs from the query's.
pub fn try_top_k_with_ids<I: Clone, V: AsRef<[f32]>>(
    query: &[f32],
    candidates: &[V],
    ids: &[I],
    config: TopKConfig,
) -> Result<Selection<I>> {
    if ids.len() != candidates.len() {
        return Err(SelectError::LengthMismatch {
            vectors: candidates.len(),
            ids: ids.len(),
        });
    }
    select(query, candidates, ids, config)
}

/// [`top_k`] with caller-supplied identifiers instead of positions.
///
/// # Panics
///
/// Panics if `ids` and `candidates` differ in length or any candidate's
/// dimension differs from the query's. Use [`try_top_k_with_ids`] to
/// handle malformed pools without panicking.
#[must_use]
pub fn top_k_with_ids<I: Clone, V: AsRef<[f32]>>(
    query: &[f32],
    candidates: &[V],
    ids: &[I],
    config: TopKConfig,
) -> Selection<I> {
    try_top_k_with_ids(query, candidates, ids, config)
        .expect("identifiers and candidate dimensions must match")
}

fn select<I: Clone, V: AsRef<[f32]>>(
    query: &[f32],
    candidates: &[V],
    ids: &[I],
    config: TopKConfig,
) -> Result<Selection<I>> {
    let mut scored: Vec<(I, f32)> = Vec::with_capacity(candidates.len());
    for (id, candidate) in ids.iter().zip(candidates) {
        let score = similarity::try_cosine(query, candidate.as_ref())?;
        if config.cutoff.map_or(true, |cutoff| score > cutoff) {
            scored.push((id.clone(), score));
        }
    }
    crate::sort_scored_desc(&mut scored);
    scored.truncate(config.k);
    Ok(Selection::from_pairs(scored))
}

//! # rank-select
//!
//! Candidate selection for retrieval pipelines.
//!
//! Given a query embedding and a pool of candidate embeddings, pick the
//! best K: either by pure relevance ([`topk`]) or by Maximal Marginal
//! Relevance ([`diversity`]), which trades relevance against redundancy
//! with the items already picked.
//!
//! ## Modules
//!
//! | Module | Purpose | Notes |
//! |--------|---------|-------|
//! | [`similarity`] | Validated cosine metric | Dimension-checked |
//! | [`topk`] | Pure relevance selection | Optional score cutoff |
//! | [`diversity`] | MMR relevance/diversity trade-off | λ ∈ \[0, 1\] |
//! | [`simd`] | Vector ops (AVX2/NEON) | Auto-dispatch |
//!
//! ## Pipeline
//!
//! ```text
//! Retrieve → Fuse (rank-fusion) → Refine (rerank) → Select (this crate)
//! ```
//!
//! ## Quick Example
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
//! let picked = top_k(&query, &candidates, TopKConfig::default());
//! assert_eq!(picked.ids, vec![0, 1]);
//! ```
//!
//! ## Results
//!
//! Every selector returns a [`Selection`]: a pair of parallel sequences,
//! `scores` and `ids`, ordered best first. Positional entry points use
//! `usize` indices into the candidate pool as identifiers; the `_with_ids`
//! variants carry caller-supplied identifiers of any cloneable type.
//!
//! ## Errors
//!
//! Each selector comes in a fallible `try_` form returning
//! [`SelectError`] and a panicking form for pools known to be well
//! formed. Zero-magnitude vectors are *not* an error: cosine divides
//! through and the IEEE result (`NaN` or ±∞) flows into the ranking.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Selection`] and the config
//!   types.

pub mod diversity;
pub mod similarity;
pub mod simd;
pub mod topk;

pub use diversity::{mmr, mmr_with_ids, try_mmr, try_mmr_with_ids, MmrConfig, Overlap};
pub use similarity::{cosine, try_cosine};
pub use topk::{top_k, top_k_with_ids, try_top_k, try_top_k_with_ids, TopKConfig};

/// Errors surfaced by the fallible (`try_`) selection APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    /// A candidate vector's dimensionality differs from the query's.
    #[error("dimension mismatch: expected {expected} dims, got {got}")]
    DimensionMismatch {
        /// Dimensionality of the query vector.
        expected: usize,
        /// Dimensionality of the offending candidate.
        got: usize,
    },

    /// The identifier slice does not line up with the candidate pool.
    #[error("length mismatch: {vectors} candidate vectors but {ids} identifiers")]
    LengthMismatch {
        /// Number of candidate vectors supplied.
        vectors: usize,
        /// Number of identifiers supplied.
        ids: usize,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SelectError>;

/// A ranked selection: parallel `scores` and `ids`, best first.
///
/// Entry `i` of [`scores`](Self::scores) is the selection score of entry
/// `i` of [`ids`](Self::ids). The constructors keep the two sequences the
/// same length. Top-K scores are cosine similarities; MMR scores are the
/// λ-blended marginal-relevance values at the moment each item was picked,
/// so they are comparable within one selection but not across λ values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection<I> {
    /// Selection scores, best first.
    pub scores: Vec<f32>,
    /// Identifiers aligned with `scores`.
    pub ids: Vec<I>,
}

impl<I> Selection<I> {
    /// An empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self { scores: Vec::new(), ids: Vec::new() }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            scores: Vec::with_capacity(capacity),
            ids: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, score: f32, id: I) {
        self.scores.push(score);
        self.ids.push(id);
    }

    /// Number of selected items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate over `(id, score)` pairs in selection order.
    pub fn iter(&self) -> impl Iterator<Item = (&I, f32)> {
        self.ids.iter().zip(self.scores.iter().copied())
    }

    /// Consume into `(id, score)` pairs in selection order.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(I, f32)> {
        self.ids.into_iter().zip(self.scores).collect()
    }

    /// Build from `(id, score)` pairs, preserving their order.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(I, f32)>) -> Self {
        let mut selection = Self::with_capacity(pairs.len());
        for (id, score) in pairs {
            selection.push(score, id);
        }
        selection
    }
}

impl<I> Default for Selection<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// Stable descending sort of `(id, score)` pairs by score.
///
/// Uses `total_cmp`, so every float has a defined slot and equal scores
/// keep their input order.
pub(crate) fn sort_scored_desc<I>(scored: &mut [(I, f32)]) {
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
}

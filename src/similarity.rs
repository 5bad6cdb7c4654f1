//! Cosine similarity with dimension checking.
//!
//! The metric behind both selectors: `dot(a, b) / (‖a‖ · ‖b‖)`, computed
//! over the SIMD kernels in [`crate::simd`]. Unlike the raw kernels,
//! these entry points refuse vectors of different lengths.
//!
//! # Zero-magnitude vectors
//!
//! A zero (or underflowing) norm is not an error and is not guarded:
//! the division happens and the IEEE result comes back, `NaN` for
//! `0/0` and ±∞ when only the denominator collapses. Callers that
//! cannot tolerate non-finite scores should screen their embeddings or
//! apply a score cutoff downstream.

use crate::{simd, Result, SelectError};

/// Cosine similarity between two equal-length vectors.
///
/// Returns a value in `[-1, 1]` for well-formed input: 1 for parallel,
/// 0 for orthogonal, -1 for opposite vectors. The score depends only on
/// direction, not magnitude.
///
/// # Errors
///
/// [`SelectError::DimensionMismatch`] when `a.len() != b.len()`.
///
/// # Example
///
/// ```rust
/// use rank_select::similarity::try_cosine;
///
/// let sim = try_cosine(&[1.0, 0.0], &[0.0, 1.0])?;
/// assert!(sim.abs() < 1e-6);
/// # Ok::<(), rank_select::SelectError>(())
/// ```
pub fn try_cosine(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(SelectError::DimensionMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }
    Ok(simd::dot(a, b) / (simd::norm(a) * simd::norm(b)))
}

/// Cosine similarity between two equal-length vectors.
///
/// # Panics
///
/// Panics on a dimension mismatch. Use [`try_cosine`] to handle that
/// case without panicking.
#[inline]
#[must_use]
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    try_cosine(a, b).expect("vectors must have equal dimensions")
}

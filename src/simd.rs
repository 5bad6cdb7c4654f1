//! Vector operations with SIMD acceleration.
//!
//! Provides `dot` and `norm` with automatic SIMD dispatch:
//! - AVX2+FMA on `x86_64` (runtime detection)
//! - NEON on `aarch64`
//! - Portable fallback otherwise
//!
//! The kernels do no validation. Callers that care about dimensionality
//! check it before calling; mismatched lengths fold over the shorter
//! prefix. The SIMD paths are tested against the portable fallback.

/// Dot product of two vectors.
///
/// Folds over `min(a.len(), b.len())` elements; empty input gives 0.0.
#[inline]
#[must_use]
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma") {
            // SAFETY: AVX2 and FMA presence verified by runtime detection.
            return unsafe { dot_avx2(a, b) };
        }
    }
    #[cfg(target_arch = "aarch64")]
    {
        // SAFETY: NEON is baseline on aarch64.
        return unsafe { dot_neon(a, b) };
    }
    #[allow(unreachable_code)]
    dot_portable(a, b)
}

/// L2 norm of a vector.
#[inline]
#[must_use]
pub fn norm(v: &[f32]) -> f32 {
    dot(v, v).sqrt()
}

// ─────────────────────────────────────────────────────────────────────────────
// Portable fallback
// ─────────────────────────────────────────────────────────────────────────────

/// Portable dot product (reference for the SIMD kernels).
#[inline]
#[must_use]
pub(crate) fn dot_portable(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

// ─────────────────────────────────────────────────────────────────────────────
// AVX2 + FMA (x86_64)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2", enable = "fma")]
unsafe fn dot_avx2(a: &[f32], b: &[f32]) -> f32 {
    use std::arch::x86_64::{
        _mm256_add_ps, _mm256_castps256_ps128, _mm256_extractf128_ps, _mm256_fmadd_ps,
        _mm256_loadu_ps, _mm256_setzero_ps, _mm_add_ps, _mm_add_ss, _mm_cvtss_f32, _mm_movehl_ps,
        _mm_shuffle_ps,
    };

    let n = a.len().min(b.len());
    let blocks = n / 16;

    // Two accumulators hide FMA latency across the 16-lane blocks.
    let mut acc0 = _mm256_setzero_ps();
    let mut acc1 = _mm256_setzero_ps();

    // SAFETY: every load starts at base < blocks*16 <= n and reads 8 lanes
    // ending at or before n, in bounds for both slices.
    for i in 0..blocks {
        let base = i * 16;
        let a0 = _mm256_loadu_ps(a.as_ptr().add(base));
        let b0 = _mm256_loadu_ps(b.as_ptr().add(base));
        acc0 = _mm256_fmadd_ps(a0, b0, acc0);
        let a1 = _mm256_loadu_ps(a.as_ptr().add(base + 8));
        let b1 = _mm256_loadu_ps(b.as_ptr().add(base + 8));
        acc1 = _mm256_fmadd_ps(a1, b1, acc1);
    }

    // Reduce 8 lanes to 1.
    let lanes = _mm256_add_ps(acc0, acc1);
    let halves = _mm_add_ps(_mm256_castps256_ps128(lanes), _mm256_extractf128_ps(lanes, 1));
    let pairs = _mm_add_ps(halves, _mm_movehl_ps(halves, halves));
    let single = _mm_add_ss(pairs, _mm_shuffle_ps(pairs, pairs, 1));

    _mm_cvtss_f32(single) + dot_portable(&a[blocks * 16..n], &b[blocks * 16..n])
}

// ─────────────────────────────────────────────────────────────────────────────
// NEON (aarch64)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
unsafe fn dot_neon(a: &[f32], b: &[f32]) -> f32 {
    use std::arch::aarch64::{vaddq_f32, vaddvq_f32, vdupq_n_f32, vfmaq_f32, vld1q_f32};

    let n = a.len().min(b.len());
    let blocks = n / 8;

    let mut acc0 = vdupq_n_f32(0.0);
    let mut acc1 = vdupq_n_f32(0.0);

    // SAFETY: every load starts at base < blocks*8 <= n and reads 4 lanes
    // ending at or before n, in bounds for both slices.
    for i in 0..blocks {
        let base = i * 8;
        acc0 = vfmaq_f32(acc0, vld1q_f32(a.as_ptr().add(base)), vld1q_f32(b.as_ptr().add(base)));
        acc1 = vfmaq_f32(
            acc1,
            vld1q_f32(a.as_ptr().add(base + 4)),
            vld1q_f32(b.as_ptr().add(base + 4)),
        );
    }

    vaddvq_f32(vaddq_f32(acc0, acc1)) + dot_portable(&a[blocks * 8..n], &b[blocks * 8..n])
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────


// ─────────────────────────────────────────────────────────────────────────────
// Property Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_vec(len: usize) -> impl Strategy<Value = Vec<f32>> {
        proptest::collection::vec(-10.0f32..10.0, len)
    }

    proptest! {
        /// SIMD dot matches the portable fallback at an awkward length.
        #[test]
        fn dot_simd_matches_portable(a in arb_vec(131), b in arb_vec(131)) {
            let dispatched = dot(&a, &b);
            let reference = dot_portable(&a, &b);
            prop_assert!(
                (dispatched - reference).abs() < 1e-3,
                "SIMD {} != portable {}",
                dispatched,
                reference
            );
        }

        /// dot(a, b) == dot(b, a)
        #[test]
        fn dot_commutative(a in arb_vec(64), b in arb_vec(64)) {
            let ab = dot(&a, &b);
            let ba = dot(&b, &a);
            prop_assert!((ab - ba).abs() < 1e-5);
        }

        /// dot(v, v) equals the squared L2 norm.
        #[test]
        fn dot_self_is_squared_norm(v in arb_vec(32)) {
            let dot_self = dot(&v, &v);
            let n = norm(&v);
            let tolerance = ((n * n).abs() * 1e-4).max(1e-4);
            prop_assert!(
                (dot_self - n * n).abs() < tolerance,
                "dot(v,v) = {} but norm² = {}",
                dot_self,
                n * n
            );
        }

        /// ||αv|| == |α|·||v||
        #[test]
        fn norm_scaling(v in arb_vec(16), alpha in -10.0f32..10.0) {
            let scaled: Vec<f32> = v.iter().map(|x| x * alpha).collect();
            let expected = alpha.abs() * norm(&v);
            prop_assert!(
                (norm(&scaled) - expected).abs() < 1e-4,
                "||αv|| = {} but |α|·||v|| = {}",
                norm(&scaled),
                expected
            );
        }

        /// Cauchy-Schwarz: |dot(a, b)| <= ||a||·||b||
        #[test]
        fn cauchy_schwarz(a in arb_vec(32), b in arb_vec(32)) {
            let d = dot(&a, &b).abs();
            let bound = norm(&a) * norm(&b);
            prop_assert!(
                d <= bound + 1e-4,
                "|dot(a,b)| = {} exceeds ||a||·||b|| = {}",
                d,
                bound
            );
        }
    }
}

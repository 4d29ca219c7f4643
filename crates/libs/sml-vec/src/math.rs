//! Approximate reciprocal square root.
//!
//! The length of a vector (and therefore normalization) is computed as
//! `x * rsqrt(x)` where `rsqrt` is a fast estimate of `1 / sqrt(x)`: an
//! initial guess (hardware estimate or the integer bit trick) refined with
//! Newton-Raphson steps
//!
//! ```text
//! y' = y * (1.5 - 0.5 * x * y * y)
//! ```
//!
//! Every step roughly squares the relative error. The result is not the
//! correctly rounded square root; its relative error stays below
//! [`RSQRT_REL_ERROR_BOUND`]. Enable the `exact-sqrt` feature to use the exact
//! library square root instead.

use cfg_if::cfg_if;
use num_traits::Float;

/// Upper bound of the relative error of [`FastRsqrt::rsqrt_approx`] for
/// positive normal inputs, for both `f32` and `f64`.
pub const RSQRT_REL_ERROR_BOUND: f64 = 1.0e-5;

/// Initial guess constant for single precision (Lomont).
const RSQRT_MAGIC_F32: u32 = 0x5f37_5a86;

/// Initial guess constant for double precision.
const RSQRT_MAGIC_F64: u64 = 0x5fe6_eb50_c7b5_37a9;

/// One Newton-Raphson step towards `1 / sqrt(x)` starting from `y`.
#[inline(always)]
fn newton_step<F: Float>(x: F, y: F) -> F {
    let half = F::one() / (F::one() + F::one());
    let three_halves = F::one() + half;
    three_halves * y + (-half * x * y) * (y * y)
}

/// Reciprocal square root estimate using only integer bit manipulation and
/// two Newton-Raphson refinements.
///
/// `x` must be positive and normal, otherwise the result is meaningless.
#[inline(always)]
pub fn rsqrt_bits_f32(x: f32) -> f32 {
    let y = f32::from_bits(RSQRT_MAGIC_F32.wrapping_sub(x.to_bits() >> 1));
    newton_step(x, newton_step(x, y))
}

/// Double precision counterpart of [`rsqrt_bits_f32`], refined three times.
#[inline(always)]
pub fn rsqrt_bits_f64(x: f64) -> f64 {
    let y = f64::from_bits(RSQRT_MAGIC_F64.wrapping_sub(x.to_bits() >> 1));
    newton_step(x, newton_step(x, newton_step(x, y)))
}

/// Returns the approximate reciprocal square root of a single precision
/// value.
///
/// On x86_64 the initial estimate comes from `rsqrtss` (relative error less
/// than 1.5 * 2^-12) followed by one refinement; elsewhere it falls back to
/// [`rsqrt_bits_f32`].
#[inline(always)]
pub fn rsqrt_f32(x: f32) -> f32 {
    cfg_if! {
        if #[cfg(all(target_arch = "x86_64", target_feature = "sse"))] {
            use std::arch::x86_64::{_mm_cvtss_f32, _mm_rsqrt_ss, _mm_set_ss};
            #[allow(unused_unsafe)]
            let y = unsafe { _mm_cvtss_f32(_mm_rsqrt_ss(_mm_set_ss(x))) };
            newton_step(x, y)
        } else {
            rsqrt_bits_f32(x)
        }
    }
}

/// Floating point types with a fast approximate reciprocal square root.
pub trait FastRsqrt: Float {
    /// Approximates `1 / sqrt(self)`.
    ///
    /// Only positive normal values give a meaningful result.
    fn rsqrt_approx(self) -> Self;

    /// Approximates `sqrt(self)` as `self * rsqrt(self)`.
    ///
    /// Zero, subnormal, infinite, negative and NaN inputs, where the estimate
    /// breaks down, are delegated to the exact square root.
    #[inline]
    fn sqrt_approx(self) -> Self {
        if !(self >= Self::min_positive_value()) || self.is_infinite() {
            return self.sqrt();
        }
        self * self.rsqrt_approx()
    }
}

impl FastRsqrt for f32 {
    #[inline(always)]
    fn rsqrt_approx(self) -> Self { rsqrt_f32(self) }
}

impl FastRsqrt for f64 {
    #[inline(always)]
    fn rsqrt_approx(self) -> Self { rsqrt_bits_f64(self) }
}

/// Square root used by vector lengths.
///
/// Approximate unless the `exact-sqrt` feature is enabled.
#[inline]
pub fn length_sqrt<F: FastRsqrt>(x: F) -> F {
    cfg_if! {
        if #[cfg(feature = "exact-sqrt")] {
            x.sqrt()
        } else {
            x.sqrt_approx()
        }
    }
}

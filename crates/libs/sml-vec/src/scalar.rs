//! Scalar element types.

use crate::math::FastRsqrt;
use num_traits::{Float, NumAssign};
use std::fmt::{Debug, Display};

/// Numeric element type of a [`FixedVector`](crate::FixedVector).
///
/// Anything with the usual arithmetic operators (including the compound
/// assignment ones), an additive and a multiplicative identity and cheap
/// copies qualifies.
pub trait Scalar: Copy + PartialEq + Debug + Display + NumAssign + 'static {}

impl<T> Scalar for T where T: Copy + PartialEq + Debug + Display + NumAssign + 'static {}

/// Floating point scalars.
///
/// Only these have a meaningful Euclidean length, hence normalization.
pub trait Real: Scalar + Float + FastRsqrt {}

impl<T> Real for T where T: Scalar + Float + FastRsqrt {}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_scalar<T: Scalar>() -> bool { true }

    fn is_real<T: Real>() -> bool { true }

    #[test]
    fn primitive_scalars() {
        assert!(is_scalar::<f32>());
        assert!(is_scalar::<u8>());
        assert!(is_scalar::<i64>());
        assert!(is_real::<f32>());
        assert!(is_real::<f64>());
    }
}

//! Compile-time evaluation strategies.
//!
//! A [`FixedVector`](crate::FixedVector) carries two zero-sized tags besides
//! its scalar type and dimension: a *variant* tag describing what the vector
//! represents ([`Free`], [`Point`], [`Color`]) and an *evaluation* tag
//! selecting the backend that computes its hot operations ([`Naive`],
//! [`Packed`]). The backend is picked by trait resolution on
//! `(T, N, Variant, Eval)`, so there is no runtime branching on the path.
//!
//! Every backend must leave a vector component-wise equal to what the naive
//! per-component loop produces.

use crate::scalar::Scalar;
use std::{fmt::Debug, sync::OnceLock};

mod sealed {
    pub trait Sealed {}
}
use sealed::Sealed;

/// Semantic flavor of a vector.
pub trait Variant: Sealed + Copy + Default + Debug + Send + Sync + 'static {
    /// Human readable name of the variant.
    const NAME: &'static str;
}

/// Evaluation family used to compute the hot operations of a vector.
pub trait Evaluation: Sealed + Copy + Default + Debug + Send + Sync + 'static {
    /// Human readable name of the evaluation family.
    const NAME: &'static str;
}

/// A plain vector: displacement, direction or any other tuple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Free;

/// A position in space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point;

/// A color; usually accessed through `r`, `g`, `b`, `a`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color;

/// Per-component scalar loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Naive;

/// Lane-batched evaluation, using SIMD registers where the scalar type has a
/// dedicated implementation of [`PackedLanes`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Packed;

macro_rules! impl_tags {
    ($tr:ident: $($t:ident => $name:literal),*) => {
        $(
            impl Sealed for $t {}

            impl $tr for $t {
                const NAME: &'static str = $name;
            }
        )*
    };
}

impl_tags!(Variant: Free => "free", Point => "point", Color => "color");
impl_tags!(Evaluation: Naive => "naive", Packed => "packed");

/// Backend implementing the operations a [`FixedVector`](crate::FixedVector)
/// forwards to its evaluation tag.
///
/// Implemented by the evaluation tag types. The variant `V` is part of the
/// dispatch key so that a flavor may get its own implementation.
pub trait EvalStrategy<T: Scalar, const N: usize, V: Variant> {
    /// Adds `rhs` to every component of `data` in place.
    fn add_scalar(data: &mut [T; N], rhs: T);
}

impl<T: Scalar, const N: usize, V: Variant> EvalStrategy<T, N, V> for Naive {
    #[inline]
    fn add_scalar(data: &mut [T; N], rhs: T) { naive_add_scalar(data, rhs) }
}

impl<T: PackedLanes, const N: usize, V: Variant> EvalStrategy<T, N, V> for Packed {
    #[inline]
    fn add_scalar(data: &mut [T; N], rhs: T) { T::add_splat(data, rhs) }
}

/// Reference implementation every backend is compared against.
#[inline]
pub fn naive_add_scalar<T: Scalar>(data: &mut [T], rhs: T) {
    for c in data.iter_mut() {
        *c += rhs;
    }
}

/// Number of lanes the portable batched loop processes at once.
pub const PORTABLE_LANES: usize = 4;

/// Scalars that can be evaluated in batches of lanes.
///
/// The provided method is the portable batched loop; scalar types with
/// hardware support override it.
pub trait PackedLanes: Scalar {
    /// Adds `rhs` to every element of `data`.
    #[inline]
    fn add_splat(data: &mut [Self], rhs: Self) { portable_add_splat(data, rhs) }
}

/// Processes `data` in chunks of [`PORTABLE_LANES`] with a splatted operand;
/// the remainder is handled one element at a time.
#[inline]
pub fn portable_add_splat<T: Scalar>(data: &mut [T], rhs: T) {
    let splat = [rhs; PORTABLE_LANES];
    let mut chunks = data.chunks_exact_mut(PORTABLE_LANES);
    for chunk in &mut chunks {
        for (c, s) in chunk.iter_mut().zip(splat.iter()) {
            *c += *s;
        }
    }
    naive_add_scalar(chunks.into_remainder(), rhs);
}

macro_rules! impl_portable_lanes {
    ($($t:ty),*) => {
        $(
            impl PackedLanes for $t {}
        )*
    };
}

impl_portable_lanes!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

cfg_if::cfg_if! {
    if #[cfg(all(target_arch = "x86_64", target_feature = "sse2"))] {
        impl PackedLanes for f32 {
            #[inline]
            fn add_splat(data: &mut [f32], rhs: f32) {
                use std::arch::x86_64::{_mm_add_ps, _mm_loadu_ps, _mm_set1_ps, _mm_storeu_ps};
                let mut chunks = data.chunks_exact_mut(4);
                // SAFETY: sse is part of the x86_64 baseline and every chunk
                // holds exactly four elements; unaligned loads and stores.
                unsafe {
                    let s = _mm_set1_ps(rhs);
                    for chunk in &mut chunks {
                        let ptr = chunk.as_mut_ptr();
                        _mm_storeu_ps(ptr, _mm_add_ps(_mm_loadu_ps(ptr), s));
                    }
                }
                naive_add_scalar(chunks.into_remainder(), rhs);
            }
        }

        impl PackedLanes for f64 {
            #[inline]
            fn add_splat(data: &mut [f64], rhs: f64) {
                use std::arch::x86_64::{_mm_add_pd, _mm_loadu_pd, _mm_set1_pd, _mm_storeu_pd};
                let mut chunks = data.chunks_exact_mut(2);
                // SAFETY: sse2 is part of the x86_64 baseline and every chunk
                // holds exactly two elements; unaligned loads and stores.
                unsafe {
                    let s = _mm_set1_pd(rhs);
                    for chunk in &mut chunks {
                        let ptr = chunk.as_mut_ptr();
                        _mm_storeu_pd(ptr, _mm_add_pd(_mm_loadu_pd(ptr), s));
                    }
                }
                naive_add_scalar(chunks.into_remainder(), rhs);
            }
        }

        const BACKEND: &str = "sse2";
    } else {
        impl_portable_lanes!(f32, f64);

        const BACKEND: &str = "portable";
    }
}

/// Returns the name of the backend used by [`Packed`] floating point vectors
/// in this build: `"sse2"` or `"portable"`.
///
/// The first call reports the choice through the `log` facade.
pub fn backend() -> &'static str {
    static REPORTED: OnceLock<()> = OnceLock::new();
    REPORTED.get_or_init(|| {
        log::debug!(
            "packed evaluation backend: {} ({} portable lanes for integer scalars)",
            BACKEND,
            PORTABLE_LANES
        );
    });
    BACKEND
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn via_strategy<E, T, const N: usize>(mut data: [T; N], rhs: T) -> [T; N]
    where
        T: Scalar,
        E: EvalStrategy<T, N, Free>,
    {
        E::add_scalar(&mut data, rhs);
        data
    }

    #[test]
    fn tag_names() {
        assert_eq!(Free::NAME, "free");
        assert_eq!(Point::NAME, "point");
        assert_eq!(Color::NAME, "color");
        assert_eq!(Naive::NAME, "naive");
        assert_eq!(Packed::NAME, "packed");
    }

    #[test]
    fn naive_adds_to_every_component() {
        assert_eq!(via_strategy::<Naive, _, 3>([1, 2, 3], 10), [11, 12, 13]);
        assert_eq!(via_strategy::<Naive, _, 1>([0.5f32], 0.25), [0.75]);
    }

    #[test]
    fn packed_handles_remainders() {
        assert_eq!(via_strategy::<Packed, _, 1>([1u8], 1), [2]);
        assert_eq!(via_strategy::<Packed, _, 5>([1i32, 2, 3, 4, 5], -1), [0, 1, 2, 3, 4]);
        assert_eq!(via_strategy::<Packed, _, 7>([0.0f32; 7], 1.5), [1.5; 7]);
        assert_eq!(via_strategy::<Packed, _, 3>([1.0f64, 2.0, 3.0], 0.5), [1.5, 2.5, 3.5]);
    }

    #[test]
    fn backend_is_known() {
        assert!(matches!(backend(), "sse2" | "portable"));
    }

    proptest! {
        #[test]
        fn packed_matches_naive_f32(
            data in prop::array::uniform9(-1.0e6f32..1.0e6),
            rhs in -1.0e6f32..1.0e6,
        ) {
            let naive = via_strategy::<Naive, _, 9>(data, rhs);
            let packed = via_strategy::<Packed, _, 9>(data, rhs);
            prop_assert_eq!(naive.map(f32::to_bits), packed.map(f32::to_bits));
        }

        #[test]
        fn packed_matches_naive_f64(
            data in prop::array::uniform5(-1.0e12f64..1.0e12),
            rhs in -1.0e12f64..1.0e12,
        ) {
            let naive = via_strategy::<Naive, _, 5>(data, rhs);
            let packed = via_strategy::<Packed, _, 5>(data, rhs);
            prop_assert_eq!(naive.map(f64::to_bits), packed.map(f64::to_bits));
        }

        #[test]
        fn packed_matches_naive_i64(
            data in prop::array::uniform6(-1_000_000i64..1_000_000),
            rhs in -1_000_000i64..1_000_000,
        ) {
            prop_assert_eq!(
                via_strategy::<Naive, _, 6>(data, rhs),
                via_strategy::<Packed, _, 6>(data, rhs)
            );
        }
    }
}

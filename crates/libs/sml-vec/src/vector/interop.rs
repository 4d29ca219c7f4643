//! Trait implementations for third-party crates: `approx` comparisons,
//! optional `serde` and `bytemuck` support.

use super::FixedVector;
use approx::{AbsDiffEq, RelativeEq, UlpsEq};

impl<T, const N: usize, V, E> AbsDiffEq for FixedVector<T, N, V, E>
where
    T: AbsDiffEq,
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> Self::Epsilon { T::default_epsilon() }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T, const N: usize, V, E> RelativeEq for FixedVector<T, N, V, E>
where
    T: RelativeEq,
    T::Epsilon: Copy,
{
    fn default_max_relative() -> Self::Epsilon { T::default_max_relative() }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

impl<T, const N: usize, V, E> UlpsEq for FixedVector<T, N, V, E>
where
    T: UlpsEq,
    T::Epsilon: Copy,
{
    fn default_max_ulps() -> u32 { T::default_max_ulps() }

    fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| a.ulps_eq(b, epsilon, max_ulps))
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::FixedVector;
    use crate::scalar::Scalar;
    use serde::{
        de::{self, SeqAccess, Visitor},
        ser::SerializeTuple,
        Deserialize, Deserializer, Serialize, Serializer,
    };
    use std::{fmt::Formatter, marker::PhantomData};

    /// Serialized as a tuple of `N` components.
    impl<T: Serialize, const N: usize, V, E> Serialize for FixedVector<T, N, V, E> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut tuple = serializer.serialize_tuple(N)?;
            for c in &self.data {
                tuple.serialize_element(c)?;
            }
            tuple.end()
        }
    }

    struct TupleVisitor<T, const N: usize, V, E>(PhantomData<FixedVector<T, N, V, E>>);

    impl<'de, T, const N: usize, V, E> Visitor<'de> for TupleVisitor<T, N, V, E>
    where
        T: Scalar + Deserialize<'de>,
    {
        type Value = FixedVector<T, N, V, E>;

        fn expecting(&self, f: &mut Formatter) -> std::fmt::Result {
            write!(f, "a tuple of {} components", N)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut data = [T::zero(); N];
            for (i, c) in data.iter_mut().enumerate() {
                *c = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(i, &self))?;
            }
            Ok(FixedVector::new(data))
        }
    }

    impl<'de, T, const N: usize, V, E> Deserialize<'de> for FixedVector<T, N, V, E>
    where
        T: Scalar + Deserialize<'de>,
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_tuple(N, TupleVisitor(PhantomData))
        }
    }
}

#[cfg(feature = "bytemuck")]
mod bytemuck_impl {
    use super::FixedVector;
    use crate::eval::{Evaluation, Variant};
    use bytemuck::{Pod, Zeroable};

    // SAFETY: `FixedVector` is `repr(transparent)` over `[T; N]`; the tags are
    // zero-sized markers.
    unsafe impl<T: Zeroable, const N: usize, V: Variant, E: Evaluation> Zeroable
        for FixedVector<T, N, V, E>
    {
    }

    // SAFETY: see above; `[T; N]` is `Pod` whenever `T` is.
    unsafe impl<T: Pod, const N: usize, V: Variant, E: Evaluation> Pod
        for FixedVector<T, N, V, E>
    {
    }
}

#[cfg(test)]
mod tests {
    use crate::{Vec3, Vec4};
    use approx::{assert_abs_diff_eq, assert_relative_eq, assert_ulps_eq, relative_ne};

    #[test]
    fn approx_comparisons() {
        let a = Vec3::new([1.0f32, 2.0, 3.0]);
        let b = Vec3::new([1.0f32 + 1e-7, 2.0, 3.0 - 1e-7]);
        assert_abs_diff_eq!(a, b, epsilon = 1e-6);
        assert_relative_eq!(a, b, max_relative = 1e-6);
        assert_ulps_eq!(a, b);
        assert!(relative_ne!(a, Vec3::new([1.0, 2.0, 3.1])));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let v = Vec4::new([1.0f64, -2.5, 0.0, 4.0]);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[1.0,-2.5,0.0,4.0]");
        let back: Vec4<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
        assert!(serde_json::from_str::<Vec4<f64>>("[1.0,2.0]").is_err());
    }

    #[cfg(feature = "bytemuck")]
    #[test]
    fn pod_casts() {
        let v = Vec4::new([1.0f32, 2.0, 3.0, 4.0]);
        assert_eq!(bytemuck::bytes_of(&v).len(), 16);
        let arr: [f32; 4] = bytemuck::cast(v);
        assert_eq!(arr, [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn layout_matches_array() {
        assert_eq!(std::mem::size_of::<Vec4<f32>>(), 16);
        assert_eq!(std::mem::align_of::<Vec3<f64>>(), std::mem::align_of::<f64>());
    }
}

//! The fixed-dimension vector type.

mod interop;
mod ops;

pub use ops::{cross, dot, normalize};

use crate::{
    error::DimensionError,
    eval::{EvalStrategy, Evaluation, Free, Naive, Variant},
    math,
    scalar::{Real, Scalar},
};
use std::{
    fmt::{Debug, Display, Formatter, Write},
    hash::{Hash, Hasher},
    marker::PhantomData,
};

/// A vector of exactly `N` components of the scalar type `T`.
///
/// `V` is the variant tag (what the vector represents) and `E` the evaluation
/// tag (which backend computes the operations forwarded to
/// [`EvalStrategy`]). Both are zero-sized; the vector has the same layout as
/// `[T; N]`.
///
/// Dimension requirements that are known statically are checked at compile
/// time: a vector needs at least one component, `y()` needs two, `cross` needs
/// three and so on. Violations fail the build when the offending function is
/// instantiated.
#[repr(transparent)]
pub struct FixedVector<T, const N: usize, V = Free, E = Naive> {
    data: [T; N],
    marker: PhantomData<(V, E)>,
}

/// Builds a free vector evaluated with the naive loop.
///
/// Shorthand used by [`fvec!`](crate::fvec).
#[inline]
pub const fn vector<T, const N: usize>(data: [T; N]) -> FixedVector<T, N> {
    FixedVector::new(data)
}

impl<T, const N: usize, V, E> FixedVector<T, N, V, E> {
    /// Number of components.
    pub const DIM: usize = N;

    /// Creates a vector from its components, in order.
    #[inline]
    pub const fn new(data: [T; N]) -> Self {
        const { assert!(N >= 1, "a vector needs at least one component") };
        Self {
            data,
            marker: PhantomData,
        }
    }

    /// Number of components; always `N`.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> usize { N }

    /// Returns the components as an array.
    #[inline]
    pub const fn as_array(&self) -> &[T; N] { &self.data }

    /// Returns the components as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] { &self.data }

    /// Returns the components as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] { &mut self.data }

    /// Consumes the vector and returns its components.
    #[inline]
    pub fn into_array(self) -> [T; N] { self.data }

    /// Returns an iterator over the components.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> { self.data.iter() }

    /// Returns a reference to the component at `index`, or `None` if the
    /// index is out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> { self.data.get(index) }

    /// Reinterprets the same components under other tags.
    #[inline]
    pub fn retag<V2, E2>(self) -> FixedVector<T, N, V2, E2> { FixedVector::new(self.data) }
}

macro_rules! impl_named_accessors {
    ($($get:ident, $get_mut:ident => $idx:literal);* $(;)?) => {
        $(
            #[doc = concat!("Returns component ", stringify!($idx), ".")]
            ///
            /// Compile-time error if the vector is too short.
            #[inline]
            pub fn $get(&self) -> T {
                const {
                    assert!(N > $idx, concat!("cannot access ", stringify!($get), "()"))
                };
                self.data[$idx]
            }

            #[doc = concat!("Returns a mutable reference to component ", stringify!($idx), ".")]
            ///
            /// Compile-time error if the vector is too short.
            #[inline]
            pub fn $get_mut(&mut self) -> &mut T {
                const {
                    assert!(N > $idx, concat!("cannot access ", stringify!($get), "()"))
                };
                &mut self.data[$idx]
            }
        )*
    };
}

impl<T: Copy, const N: usize, V, E> FixedVector<T, N, V, E> {
    impl_named_accessors!(
        x, x_mut => 0;
        y, y_mut => 1;
        z, z_mut => 2;
        r, r_mut => 0;
        g, g_mut => 1;
        b, b_mut => 2;
        a, a_mut => 3;
    );

    /// Creates a vector with every component set to `value`.
    #[inline]
    pub fn splat(value: T) -> Self { Self::new([value; N]) }

    /// Creates a vector from the first `N` elements of `buf`.
    ///
    /// # Panics
    ///
    /// Panics if `buf` holds fewer than `N` elements. Use `TryFrom<&[T]>` for
    /// a recoverable conversion.
    #[inline]
    #[track_caller]
    pub fn from_slice(buf: &[T]) -> Self {
        assert!(
            buf.len() >= N,
            "buffer of {} elements is too short for a {}-vector",
            buf.len(),
            N
        );
        Self::new(std::array::from_fn(|i| buf[i]))
    }
}

impl<T: Scalar, const N: usize, V, E> FixedVector<T, N, V, E> {
    /// Creates a vector with every component set to zero.
    #[inline]
    pub fn zeros() -> Self { Self::splat(T::zero()) }

    /// Creates an `N`-vector from an `S`-vector of the same kind.
    ///
    /// The first `min(N, S)` components are copied; trailing components are
    /// zero when `N > S` and extra source components are dropped when `S > N`.
    #[inline]
    pub fn from_resized<const S: usize>(other: FixedVector<T, S, V, E>) -> Self {
        let mut out = Self::zeros();
        let n = N.min(S);
        out.data[..n].copy_from_slice(&other.data[..n]);
        out
    }

    /// Converts the vector into an `M`-vector, see [`Self::from_resized`].
    #[inline]
    pub fn resize<const M: usize>(self) -> FixedVector<T, M, V, E> {
        FixedVector::from_resized(self)
    }

    /// Creates an `N`-vector from an `(N - 1)`-vector followed by `last`.
    ///
    /// Compile-time error if `M + 1 != N`.
    #[inline]
    pub fn extend_from<const M: usize>(head: FixedVector<T, M, V, E>, last: T) -> Self {
        const { assert!(M + 1 == N, "extend needs a vector with exactly one component less") };
        let mut out = Self::from_resized(head);
        out.data[N - 1] = last;
        out
    }

    /// Dot product: sum of component-wise products, starting from zero.
    #[inline]
    pub fn dot(&self, rhs: &Self) -> T {
        self.data
            .iter()
            .zip(rhs.data.iter())
            .fold(T::zero(), |acc, (&l, &r)| acc + l * r)
    }

    /// Squared Euclidean length; exact for every scalar type.
    #[inline]
    pub fn length_squared(&self) -> T { self.dot(self) }

    /// Subtracts `rhs` from every component.
    #[inline]
    pub fn sub_scalar(&mut self, rhs: T) -> &mut Self {
        for c in self.data.iter_mut() {
            *c -= rhs;
        }
        self
    }

    /// Adds the first `min(N, S)` components of `rhs`; the others are left
    /// unchanged.
    #[inline]
    pub fn add_vector<const S: usize>(&mut self, rhs: &FixedVector<T, S, V, E>) -> &mut Self {
        for (l, &r) in self.data.iter_mut().zip(rhs.data.iter()) {
            *l += r;
        }
        self
    }

    /// Subtracts the first `min(N, S)` components of `rhs`; the others are
    /// left unchanged.
    #[inline]
    pub fn sub_vector<const S: usize>(&mut self, rhs: &FixedVector<T, S, V, E>) -> &mut Self {
        for (l, &r) in self.data.iter_mut().zip(rhs.data.iter()) {
            *l -= r;
        }
        self
    }

    /// Multiplies every component by `rhs`.
    #[inline]
    pub fn scale(&mut self, rhs: T) -> &mut Self {
        for c in self.data.iter_mut() {
            *c *= rhs;
        }
        self
    }

    /// Divides every component by `rhs`.
    ///
    /// Dividing by exactly zero leaves the vector unchanged.
    #[inline]
    pub fn div_scalar(&mut self, rhs: T) -> &mut Self {
        if rhs != T::zero() {
            for c in self.data.iter_mut() {
                *c /= rhs;
            }
        }
        self
    }

    /// Replaces the first three components with the cross product of the
    /// first three components of `self` and `rhs`. Components past the third
    /// are untouched.
    ///
    /// Compile-time error if `N < 3`.
    #[inline]
    pub fn cross_assign(&mut self, rhs: &Self) -> &mut Self {
        const {
            assert!(N > 2, "cannot take cross product of vector with less than 3 dimensions")
        };
        let [x, y, z] = [self.data[0], self.data[1], self.data[2]];
        let [rx, ry, rz] = [rhs.data[0], rhs.data[1], rhs.data[2]];
        self.data[0] = y * rz - z * ry;
        self.data[1] = z * rx - x * rz;
        self.data[2] = x * ry - y * rx;
        self
    }
}

impl<T: Scalar, const N: usize, V: Variant, E: Evaluation> FixedVector<T, N, V, E> {
    /// Adds `rhs` to every component through the evaluation strategy
    /// selected by the tags.
    #[inline]
    pub fn add_scalar(&mut self, rhs: T) -> &mut Self
    where
        E: EvalStrategy<T, N, V>,
    {
        E::add_scalar(&mut self.data, rhs);
        self
    }
}

impl<T: Real, const N: usize, V, E> FixedVector<T, N, V, E> {
    /// Euclidean length.
    ///
    /// Uses the approximate square root from [`crate::math`]; the relative
    /// error is bounded by [`math::RSQRT_REL_ERROR_BOUND`].
    #[inline]
    pub fn length(&self) -> T { math::length_sqrt(self.length_squared()) }

    /// Scales the vector to unit length. A zero vector is left unchanged.
    ///
    /// Components are first divided by the largest magnitude so that the
    /// squared length neither overflows nor underflows.
    #[inline]
    pub fn normalize_mut(&mut self) -> &mut Self {
        let max = self.data.iter().fold(T::zero(), |m, c| m.max(c.abs()));
        if max == T::zero() {
            return self;
        }
        self.div_scalar(max);
        let len = self.length();
        self.div_scalar(len)
    }
}

impl<T: Clone, const N: usize, V, E> Clone for FixedVector<T, N, V, E> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            marker: PhantomData,
        }
    }
}

impl<T: Copy, const N: usize, V, E> Copy for FixedVector<T, N, V, E> {}

impl<T: PartialEq, const N: usize, V, E> PartialEq for FixedVector<T, N, V, E> {
    fn eq(&self, other: &Self) -> bool { self.data == other.data }
}

impl<T: Eq, const N: usize, V, E> Eq for FixedVector<T, N, V, E> {}

impl<T: Hash, const N: usize, V, E> Hash for FixedVector<T, N, V, E> {
    fn hash<H: Hasher>(&self, state: &mut H) { self.data.hash(state) }
}

impl<T: Scalar, const N: usize, V, E> Default for FixedVector<T, N, V, E> {
    fn default() -> Self { Self::zeros() }
}

impl<T: Debug, const N: usize, V, E> Debug for FixedVector<T, N, V, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("FixedVector({:?})", &self.data))
    }
}

impl<T: Display, const N: usize, V, E> Display for FixedVector<T, N, V, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_char('[')?;
        for (i, x) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x)?;
        }
        f.write_char(']')
    }
}

impl<T, const N: usize, V, E> From<[T; N]> for FixedVector<T, N, V, E> {
    fn from(data: [T; N]) -> Self { Self::new(data) }
}

impl<T, const N: usize, V, E> From<FixedVector<T, N, V, E>> for [T; N] {
    fn from(v: FixedVector<T, N, V, E>) -> Self { v.data }
}

impl<T: Copy, const N: usize, V, E> TryFrom<&[T]> for FixedVector<T, N, V, E> {
    type Error = DimensionError;

    fn try_from(buf: &[T]) -> Result<Self, Self::Error> {
        if buf.len() < N {
            return Err(DimensionError::BufferTooShort {
                expected: N,
                actual: buf.len(),
            });
        }
        Ok(Self::from_slice(buf))
    }
}

impl<T, const N: usize, V, E> AsRef<[T]> for FixedVector<T, N, V, E> {
    fn as_ref(&self) -> &[T] { &self.data }
}

impl<T, const N: usize, V, E> AsMut<[T]> for FixedVector<T, N, V, E> {
    fn as_mut(&mut self) -> &mut [T] { &mut self.data }
}

impl<'a, T, const N: usize, V, E> IntoIterator for &'a FixedVector<T, N, V, E> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter { self.data.iter() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        eval::{Color, Packed, Point},
        math::RSQRT_REL_ERROR_BOUND,
        Clr4, PackedVec4, Pnt3, Vec2, Vec3, Vec4,
    };
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn construction_from_values() {
        let v = Vec3::new([1, 2, 3]);
        assert_eq!(v[0], 1);
        assert_eq!(v[1], 2);
        assert_eq!(v[2], 3);
        assert_eq!(Vec3::<i32>::DIM, 3);
        assert_eq!(v.len(), 3);

        let v: Vec4<f32> = [1.0, 2.0, 3.0, 4.0].into();
        assert_eq!(v.into_array(), [1.0, 2.0, 3.0, 4.0]);

        let v = crate::fvec![1u8, 2];
        assert_eq!(v.as_slice(), &[1, 2]);
    }

    #[test]
    fn construction_from_buffers() {
        let buf = [1.0f64, 2.0, 3.0, 4.0, 5.0];
        let v = Vec3::from_slice(&buf);
        assert_eq!(v.as_array(), &[1.0, 2.0, 3.0]);

        let v = Vec3::<f64>::try_from(&buf[..2]);
        assert_eq!(
            v,
            Err(DimensionError::BufferTooShort {
                expected: 3,
                actual: 2
            })
        );
        assert!(Vec2::<f64>::try_from(&buf[..]).is_ok());
    }

    #[test]
    #[should_panic]
    fn from_slice_too_short() { let _ = Vec4::from_slice(&[1, 2, 3]); }

    #[test]
    fn fill_construction() {
        assert_eq!(Vec3::splat(7).as_array(), &[7, 7, 7]);
        assert_eq!(Vec4::<f32>::zeros().as_array(), &[0.0; 4]);
        assert_eq!(Vec4::<u16>::default(), Vec4::zeros());
    }

    #[test]
    fn resized_construction() {
        let v3 = Vec3::new([1, 2, 3]);
        let v2: Vec2<i32> = Vec2::from_resized(v3);
        assert_eq!(v2.as_array(), &[1, 2]);

        let v4: Vec4<i32> = v3.resize();
        assert_eq!(v4.as_array(), &[1, 2, 3, 0]);

        let v6 = v3.resize::<6>();
        assert_eq!(v6.as_array(), &[1, 2, 3, 0, 0, 0]);

        let same: Vec3<i32> = Vec3::from_resized(v3);
        assert_eq!(same, v3);
    }

    #[test]
    fn extend_construction() {
        let rgb = FixedVector::<f32, 3, Color>::new([0.1, 0.2, 0.3]);
        let rgba = Clr4::extend_from(rgb, 1.0);
        assert_eq!(rgba.as_array(), &[0.1, 0.2, 0.3, 1.0]);
        assert_eq!(rgba.a(), 1.0);

        let v1 = FixedVector::<i32, 1>::new([5]);
        let v2 = Vec2::extend_from(v1, 6);
        assert_eq!(v2.as_array(), &[5, 6]);
    }

    #[test]
    fn named_access() {
        let mut v = Vec4::new([1, 2, 3, 4]);
        assert_eq!((v.x(), v.y(), v.z()), (1, 2, 3));
        assert_eq!((v.r(), v.g(), v.b(), v.a()), (1, 2, 3, 4));
        *v.y_mut() = 20;
        *v.a_mut() = 40;
        assert_eq!(v.as_array(), &[1, 20, 3, 40]);
        *v.r_mut() = 10;
        assert_eq!(v.x(), 10);
        assert_eq!(v.get(3), Some(&40));
        assert_eq!(v.get(4), None);
    }

    #[test]
    fn retagging_keeps_components() {
        let p = Pnt3::new([1.0f32, 2.0, 3.0]);
        let q: FixedVector<f32, 3, Point, Packed> = p.retag();
        assert_eq!(p.as_array(), q.as_array());
    }

    #[test]
    fn chained_in_place_ops() {
        let mut v = Vec3::new([1.0f32, 2.0, 3.0]);
        v.add_scalar(1.0).scale(2.0).sub_scalar(1.0);
        assert_eq!(v.as_array(), &[3.0, 5.0, 7.0]);
        v.div_scalar(0.0);
        assert_eq!(v.as_array(), &[3.0, 5.0, 7.0]);
        v.div_scalar(2.0);
        assert_eq!(v.as_array(), &[1.5, 2.5, 3.5]);
    }

    #[test]
    fn mismatched_vector_ops() {
        let mut v = Vec3::new([1, 2, 3]);
        v.add_vector(&Vec2::new([10, 20]));
        assert_eq!(v.as_array(), &[11, 22, 3]);
        v.sub_vector(&Vec4::new([1, 1, 1, 100]));
        assert_eq!(v.as_array(), &[10, 21, 2]);
    }

    #[test]
    fn integer_division_by_zero_is_noop() {
        let mut v = Vec3::new([4, 8, 12]);
        v.div_scalar(0);
        assert_eq!(v.as_array(), &[4, 8, 12]);
        v.div_scalar(4);
        assert_eq!(v.as_array(), &[1, 2, 3]);
    }

    #[test]
    fn cross_keeps_trailing_components() {
        let mut v = Vec4::new([1.0, 0.0, 0.0, 9.0]);
        v.cross_assign(&Vec4::new([0.0, 1.0, 0.0, -5.0]));
        assert_eq!(v.as_array(), &[0.0, 0.0, 1.0, 9.0]);
    }

    #[test]
    fn length_and_normalize() {
        let v = Vec3::new([3.0f32, 4.0, 0.0]);
        assert_eq!(v.length_squared(), 25.0);
        assert_relative_eq!(v.length(), 5.0, max_relative = RSQRT_REL_ERROR_BOUND as f32);

        let mut zero = Vec3::<f64>::zeros();
        zero.normalize_mut();
        assert_eq!(zero, Vec3::zeros());

        let mut v = Vec4::new([1.0f64, -2.0, 2.0, 4.0]);
        v.normalize_mut();
        assert_relative_eq!(v.length(), 1.0, max_relative = 3.0 * RSQRT_REL_ERROR_BOUND);
    }

    #[test]
    fn normalize_extreme_magnitudes() {
        for scale in [1.0e-40f32, 1.0e-30, 1.0e-20, 1.0e20, 1.0e30, f32::MAX] {
            let mut v = Vec3::new([scale, 0.0, 0.0]);
            v.normalize_mut();
            assert_relative_eq!(v.x(), 1.0, max_relative = 3.0 * RSQRT_REL_ERROR_BOUND as f32);

            let mut v = Vec3::new([scale, -scale, scale * 0.5]);
            v.normalize_mut();
            assert_relative_eq!(v.length(), 1.0, max_relative = 3.0 * RSQRT_REL_ERROR_BOUND as f32);
        }
        for scale in [1.0e-310f64, 1.0e-300, 1.0e300, f64::MAX] {
            let mut v = Vec4::new([scale, 2.0 * scale.min(f64::MAX / 2.0), 0.0, -scale]);
            v.normalize_mut();
            assert_relative_eq!(v.length(), 1.0, max_relative = 3.0 * RSQRT_REL_ERROR_BOUND);
        }
    }

    #[test]
    fn packed_vectors_behave_like_naive_ones() {
        let mut p = PackedVec4::new([1.0f32, 2.0, 3.0, 4.0]);
        let mut n = Vec4::new([1.0f32, 2.0, 3.0, 4.0]);
        p.add_scalar(0.5);
        n.add_scalar(0.5);
        assert_eq!(p.as_array(), n.as_array());
    }

    #[test]
    fn formatting() {
        let v = Vec3::new([1, 2, 3]);
        assert_eq!(format!("{:?}", v), "FixedVector([1, 2, 3])");
        assert_eq!(format!("{}", v), "[1, 2, 3]");
    }

    proptest! {
        #[test]
        fn value_list_reads_back(data in prop::array::uniform5(any::<i32>())) {
            let v = FixedVector::<i32, 5>::new(data);
            for (i, x) in data.iter().enumerate() {
                prop_assert_eq!(v[i], *x);
            }
        }

        #[test]
        fn resize_copies_leading_components(data in prop::array::uniform3(any::<i16>())) {
            let v = Vec3::new(data);
            let longer: FixedVector<i16, 5> = v.resize();
            prop_assert_eq!(&longer.as_array()[..3], &data[..]);
            prop_assert_eq!(&longer.as_array()[3..], &[0, 0][..]);
            let shorter: Vec2<i16> = v.resize();
            prop_assert_eq!(shorter.as_array(), &[data[0], data[1]]);
        }

        #[test]
        fn extend_appends_last(data in prop::array::uniform3(any::<i64>()), last in any::<i64>()) {
            let v = Vec4::extend_from(Vec3::new(data), last);
            prop_assert_eq!(&v.as_array()[..3], &data[..]);
            prop_assert_eq!(v[3], last);
        }

        #[test]
        fn division_by_zero_is_noop(data in prop::array::uniform4(-1.0e6f32..1.0e6)) {
            let mut v = Vec4::new(data);
            v.div_scalar(0.0);
            prop_assert_eq!(v.into_array(), data);
        }

        #[test]
        fn normalized_length_is_one(
            mantissa in prop::array::uniform3(-1.0f32..1.0),
            exp in -35i32..35,
        ) {
            let mut v = Vec3::new(mantissa.map(|m| m * 10.0f32.powi(exp)));
            prop_assume!(v != Vec3::zeros());
            v.normalize_mut();
            let len = v.length() as f64;
            prop_assert!((len - 1.0).abs() <= 3.0 * RSQRT_REL_ERROR_BOUND, "length {}", len);
        }

        #[test]
        fn scalar_add_strategy_matches_loop(
            data in prop::array::uniform8(-1.0e6f64..1.0e6),
            rhs in -1.0e6f64..1.0e6,
        ) {
            let mut packed = FixedVector::<f64, 8, Free, Packed>::new(data);
            packed.add_scalar(rhs);
            let expected = data.map(|c| c + rhs);
            prop_assert_eq!(packed.into_array(), expected);
        }
    }
}

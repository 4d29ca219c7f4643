//! Operator overloads and free functions.
//!
//! Value-returning operators copy the left operand and apply the matching
//! in-place operation. Operators with a scalar on either side are
//! implemented per primitive scalar type, since a blanket
//! `impl<T> Mul<FixedVector<T, N>> for T` is not allowed.

use super::FixedVector;
use crate::{
    eval::{EvalStrategy, Evaluation, Variant},
    scalar::{Real, Scalar},
};
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

impl<T, const N: usize, V, E> Index<usize> for FixedVector<T, N, V, E> {
    type Output = T;

    #[inline]
    #[track_caller]
    fn index(&self, index: usize) -> &T {
        debug_assert!(index < N, "index {} out of range for a {}-vector", index, N);
        &self.data[index]
    }
}

impl<T, const N: usize, V, E> IndexMut<usize> for FixedVector<T, N, V, E> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < N, "index {} out of range for a {}-vector", index, N);
        &mut self.data[index]
    }
}

macro_rules! impl_vector_ops {
    ($($trait:ident, $op:ident, $assign_trait:ident, $assign_op:ident, $method:ident);*) => {
        $(
            impl<T: Scalar, const N: usize, const S: usize, V, E>
                $assign_trait<FixedVector<T, S, V, E>> for FixedVector<T, N, V, E>
            {
                #[inline]
                fn $assign_op(&mut self, rhs: FixedVector<T, S, V, E>) { self.$method(&rhs); }
            }

            impl<T: Scalar, const N: usize, const S: usize, V, E>
                $assign_trait<&FixedVector<T, S, V, E>> for FixedVector<T, N, V, E>
            {
                #[inline]
                fn $assign_op(&mut self, rhs: &FixedVector<T, S, V, E>) { self.$method(rhs); }
            }

            impl<T: Scalar, const N: usize, const S: usize, V, E>
                $trait<FixedVector<T, S, V, E>> for FixedVector<T, N, V, E>
            {
                type Output = FixedVector<T, N, V, E>;

                #[inline]
                fn $op(mut self, rhs: FixedVector<T, S, V, E>) -> Self::Output {
                    self.$method(&rhs);
                    self
                }
            }

            impl<T: Scalar, const N: usize, const S: usize, V, E>
                $trait<&FixedVector<T, S, V, E>> for FixedVector<T, N, V, E>
            {
                type Output = FixedVector<T, N, V, E>;

                #[inline]
                fn $op(mut self, rhs: &FixedVector<T, S, V, E>) -> Self::Output {
                    self.$method(rhs);
                    self
                }
            }

            impl<T: Scalar, const N: usize, const S: usize, V, E>
                $trait<FixedVector<T, S, V, E>> for &FixedVector<T, N, V, E>
            {
                type Output = FixedVector<T, N, V, E>;

                #[inline]
                fn $op(self, rhs: FixedVector<T, S, V, E>) -> Self::Output {
                    let mut out = *self;
                    out.$method(&rhs);
                    out
                }
            }

            impl<T: Scalar, const N: usize, const S: usize, V, E>
                $trait<&FixedVector<T, S, V, E>> for &FixedVector<T, N, V, E>
            {
                type Output = FixedVector<T, N, V, E>;

                #[inline]
                fn $op(self, rhs: &FixedVector<T, S, V, E>) -> Self::Output {
                    let mut out = *self;
                    out.$method(rhs);
                    out
                }
            }
        )*
    };
}

impl_vector_ops! {
    Add, add, AddAssign, add_assign, add_vector;
    Sub, sub, SubAssign, sub_assign, sub_vector
}

macro_rules! impl_dot_ops {
    ($(($lhs:ty, $rhs:ty)),*) => {
        $(
            impl<T: Scalar, const N: usize, V, E> Mul<$rhs> for $lhs {
                type Output = T;

                /// Dot product.
                #[inline]
                fn mul(self, rhs: $rhs) -> T { self.dot(&rhs) }
            }
        )*
    };
}

impl_dot_ops!(
    (FixedVector<T, N, V, E>, FixedVector<T, N, V, E>),
    (FixedVector<T, N, V, E>, &FixedVector<T, N, V, E>),
    (&FixedVector<T, N, V, E>, FixedVector<T, N, V, E>),
    (&FixedVector<T, N, V, E>, &FixedVector<T, N, V, E>)
);

impl<T, const N: usize, V, E> Neg for FixedVector<T, N, V, E>
where
    T: Scalar + Neg<Output = T>,
{
    type Output = Self;

    #[inline]
    fn neg(mut self) -> Self {
        for c in self.data.iter_mut() {
            *c = -*c;
        }
        self
    }
}

impl<T, const N: usize, V, E> Neg for &FixedVector<T, N, V, E>
where
    T: Scalar + Neg<Output = T>,
{
    type Output = FixedVector<T, N, V, E>;

    #[inline]
    fn neg(self) -> Self::Output { -*self }
}

macro_rules! impl_scalar_ops {
    (@binary $t:ty, $trait:ident, $op:ident, $method:ident) => {
        impl<const N: usize, V, E> $trait<$t> for FixedVector<$t, N, V, E> {
            type Output = Self;

            #[inline]
            fn $op(mut self, rhs: $t) -> Self {
                self.$method(rhs);
                self
            }
        }

        impl<const N: usize, V, E> $trait<$t> for &FixedVector<$t, N, V, E> {
            type Output = FixedVector<$t, N, V, E>;

            #[inline]
            fn $op(self, rhs: $t) -> Self::Output {
                let mut out = *self;
                out.$method(rhs);
                out
            }
        }
    };
    ($($t:ty),*) => {
        $(
            impl<const N: usize, V: Variant, E: Evaluation> AddAssign<$t>
                for FixedVector<$t, N, V, E>
            where
                E: EvalStrategy<$t, N, V>,
            {
                #[inline]
                fn add_assign(&mut self, rhs: $t) { self.add_scalar(rhs); }
            }

            impl<const N: usize, V, E> SubAssign<$t> for FixedVector<$t, N, V, E> {
                #[inline]
                fn sub_assign(&mut self, rhs: $t) { self.sub_scalar(rhs); }
            }

            impl<const N: usize, V, E> MulAssign<$t> for FixedVector<$t, N, V, E> {
                #[inline]
                fn mul_assign(&mut self, rhs: $t) { self.scale(rhs); }
            }

            impl<const N: usize, V, E> DivAssign<$t> for FixedVector<$t, N, V, E> {
                #[inline]
                fn div_assign(&mut self, rhs: $t) { self.div_scalar(rhs); }
            }

            impl<const N: usize, V: Variant, E: Evaluation> Add<$t> for FixedVector<$t, N, V, E>
            where
                E: EvalStrategy<$t, N, V>,
            {
                type Output = Self;

                #[inline]
                fn add(mut self, rhs: $t) -> Self {
                    self.add_scalar(rhs);
                    self
                }
            }

            impl<const N: usize, V: Variant, E: Evaluation> Add<$t> for &FixedVector<$t, N, V, E>
            where
                E: EvalStrategy<$t, N, V>,
            {
                type Output = FixedVector<$t, N, V, E>;

                #[inline]
                fn add(self, rhs: $t) -> Self::Output { *self + rhs }
            }

            impl<const N: usize, V: Variant, E: Evaluation> Add<FixedVector<$t, N, V, E>> for $t
            where
                E: EvalStrategy<$t, N, V>,
            {
                type Output = FixedVector<$t, N, V, E>;

                #[inline]
                fn add(self, rhs: FixedVector<$t, N, V, E>) -> Self::Output { rhs + self }
            }

            impl<const N: usize, V: Variant, E: Evaluation> Add<&FixedVector<$t, N, V, E>> for $t
            where
                E: EvalStrategy<$t, N, V>,
            {
                type Output = FixedVector<$t, N, V, E>;

                #[inline]
                fn add(self, rhs: &FixedVector<$t, N, V, E>) -> Self::Output { *rhs + self }
            }

            impl_scalar_ops!(@binary $t, Sub, sub, sub_scalar);
            impl_scalar_ops!(@binary $t, Mul, mul, scale);
            impl_scalar_ops!(@binary $t, Div, div, div_scalar);

            impl<const N: usize, V, E> Mul<FixedVector<$t, N, V, E>> for $t {
                type Output = FixedVector<$t, N, V, E>;

                #[inline]
                fn mul(self, rhs: FixedVector<$t, N, V, E>) -> Self::Output { rhs * self }
            }

            impl<const N: usize, V, E> Mul<&FixedVector<$t, N, V, E>> for $t {
                type Output = FixedVector<$t, N, V, E>;

                #[inline]
                fn mul(self, rhs: &FixedVector<$t, N, V, E>) -> Self::Output { *rhs * self }
            }
        )*
    };
}

impl_scalar_ops!(f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Dot product of two vectors of the same dimension.
#[inline]
pub fn dot<T: Scalar, const N: usize, V, E>(
    lhs: &FixedVector<T, N, V, E>,
    rhs: &FixedVector<T, N, V, E>,
) -> T {
    lhs.dot(rhs)
}

/// Returns the cross product of `lhs` and `rhs`, see
/// [`FixedVector::cross_assign`].
#[inline]
pub fn cross<T: Scalar, const N: usize, V, E>(
    lhs: &FixedVector<T, N, V, E>,
    rhs: &FixedVector<T, N, V, E>,
) -> FixedVector<T, N, V, E> {
    let mut out = *lhs;
    out.cross_assign(rhs);
    out
}

/// Returns `v` scaled to unit length, or `v` itself if it has zero length.
#[inline]
pub fn normalize<T: Real, const N: usize, V, E>(
    v: &FixedVector<T, N, V, E>,
) -> FixedVector<T, N, V, E> {
    let mut out = *v;
    out.normalize_mut();
    out
}

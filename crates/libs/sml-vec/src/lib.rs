//! # sml-vec
//! Small, fixed-dimension numeric vectors for real-time graphics and physics
//! code.
//!
//! [`FixedVector<T, N, V, E>`](FixedVector) is an `N`-tuple of scalars `T`
//! tagged with a variant `V` (free vector, point, color) and an evaluation
//! family `E` (naive loop or packed lanes). Hot operations are forwarded to
//! the [`EvalStrategy`] selected by the tags at compile time.
//!
//! ```
//! use sml_vec::{cross, fvec, normalize, Vec3};
//!
//! let x = fvec![1.0f32, 0.0, 0.0];
//! let y: Vec3<f32> = Vec3::new([0.0, 1.0, 0.0]);
//! assert_eq!(cross(&x, &y), fvec![0.0, 0.0, 1.0]);
//! assert_eq!(x * y, 0.0);
//! assert_eq!((x + y) / 0.0, x + y);
//! let n = normalize(&(x + y));
//! assert!((n.length() - 1.0).abs() < 1e-4);
//! ```
//!
//! Dimension mismatches that are known statically do not compile:
//!
//! ```compile_fail
//! let v = sml_vec::Vec2::new([1.0f32, 2.0]);
//! let _ = v.z();
//! ```
//!
//! ```compile_fail
//! let mut v = sml_vec::Vec2::new([1.0f32, 2.0]);
//! let w = v;
//! v.cross_assign(&w);
//! ```
//!
//! ```compile_fail
//! let v: sml_vec::Vec3<i32> = sml_vec::Vec3::new([1, 2]);
//! ```
//!
//! ```compile_fail
//! let v2 = sml_vec::Vec2::new([1, 2]);
//! let v4 = sml_vec::Vec4::extend_from(v2, 3);
//! ```
//!
//! ```compile_fail
//! let v = sml_vec::FixedVector::<f32, 0>::new([]);
//! ```

pub mod error;
pub mod eval;
pub mod math;
pub mod scalar;
mod vector;

pub use eval::{
    backend, Color, EvalStrategy, Evaluation, Free, Naive, Packed, PackedLanes, Point, Variant,
};
pub use scalar::{Real, Scalar};
pub use vector::{cross, dot, normalize, vector, FixedVector};

/// Two-component free vector.
pub type Vec2<T> = FixedVector<T, 2>;
/// Three-component free vector.
pub type Vec3<T> = FixedVector<T, 3>;
/// Four-component free vector.
pub type Vec4<T> = FixedVector<T, 4>;

/// Two-dimensional point.
pub type Pnt2<T> = FixedVector<T, 2, Point>;
/// Three-dimensional point.
pub type Pnt3<T> = FixedVector<T, 3, Point>;

/// RGB color.
pub type Clr3<T> = FixedVector<T, 3, Color>;
/// RGBA color.
pub type Clr4<T> = FixedVector<T, 4, Color>;

/// Three-component free vector evaluated with packed lanes.
pub type PackedVec3<T> = FixedVector<T, 3, Free, Packed>;
/// Four-component free vector evaluated with packed lanes.
pub type PackedVec4<T> = FixedVector<T, 4, Free, Packed>;

/// Creates a free, naively evaluated vector from a list of components.
///
/// ```
/// let v = sml_vec::fvec![1, 2, 3];
/// assert_eq!(v.as_array(), &[1, 2, 3]);
/// ```
#[macro_export]
macro_rules! fvec {
    ($($x:expr),+ $(,)?) => {
        $crate::vector([$($x),+])
    };
}

static_assertions::assert_eq_size!(Vec4<f32>, [f32; 4]);
static_assertions::assert_eq_size!(Clr3<u8>, [u8; 3]);
static_assertions::assert_eq_size!(PackedVec3<f64>, [f64; 3]);
static_assertions::assert_impl_all!(Vec3<f32>: Copy, Send, Sync, Default, PartialEq);
static_assertions::assert_impl_all!(Pnt3<i32>: Eq, std::hash::Hash);

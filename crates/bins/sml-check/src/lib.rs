//! Randomized consistency checks for the `sml-vec` evaluation backends.
//!
//! Every packed backend must produce exactly what the naive per-component loop
//! produces, and the approximate vector length must stay within
//! [`RSQRT_REL_ERROR_BOUND`] of the exact one.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sml_vec::{math::RSQRT_REL_ERROR_BOUND, FixedVector, Free, Naive, Packed, PackedLanes, Real};
use std::fmt::{Display, Formatter};

pub mod cli;

/// Seed used when none is given on the command line.
pub const DEFAULT_SEED: u64 = 0x5eed_cafe;

/// Arguments for the `sml-check` command.
#[derive(clap::Parser, Debug, Clone)]
#[clap(about = "Checks the packed vector backends against the naive loop.")]
pub struct CheckArgs {
    /// Number of random samples per scalar type and dimension.
    #[clap(
        short,
        long,
        default_value_t = 10_000,
        help = "Number of random samples per scalar type and dimension."
    )]
    pub samples: usize,

    /// Seed of the random generator.
    #[clap(long, default_value_t = DEFAULT_SEED, help = "Seed of the random generator.")]
    pub seed: u64,

    /// Numeric log level, see [`cli::log_filter_from_level`].
    #[clap(
        short,
        long,
        default_value_t = 2,
        help = "The log level: 0 error, 1 warn, 2 info, 3 debug, 4 trace."
    )]
    pub log_level: u8,
}

/// Failures reported by the checks.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// The packed scalar add disagrees with the naive loop.
    #[error(
        "{scalar}x{dim}: packed scalar add diverged from the naive loop at sample {sample}: \
         {packed} != {naive}"
    )]
    Mismatch {
        /// Scalar type name.
        scalar: &'static str,
        /// Vector dimension.
        dim: usize,
        /// Index of the failing sample.
        sample: usize,
        /// Result of the naive loop.
        naive: String,
        /// Result of the packed backend.
        packed: String,
    },
    /// The approximate length exceeds the relative error bound.
    #[error("{scalar}x{dim}: length of {vector} has relative error {error:e} (bound {bound:e})")]
    LengthOutOfBound {
        /// Scalar type name.
        scalar: &'static str,
        /// Vector dimension.
        dim: usize,
        /// The offending vector.
        vector: String,
        /// Observed relative error.
        error: f64,
        /// Bound it was checked against.
        bound: f64,
    },
}

/// Which property a [`Report`] is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    /// Naive and packed scalar add agree.
    AddScalar,
    /// Approximate length stays within the error bound.
    Length,
}

/// Outcome of one passed check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Report {
    /// Property that was checked.
    pub kind: CheckKind,
    /// Scalar type name.
    pub scalar: &'static str,
    /// Vector dimension.
    pub dim: usize,
    /// Number of samples drawn.
    pub samples: usize,
    /// Largest relative error observed; only measured by length checks.
    pub max_rel_error: Option<f64>,
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            CheckKind::AddScalar => "add_scalar",
            CheckKind::Length => "length",
        };
        write!(f, "{:<10} {:>3}x{} ok", kind, self.scalar, self.dim)?;
        if let Some(err) = self.max_rel_error {
            write!(f, " (max relative error {:.3e})", err)?;
        }
        Ok(())
    }
}

/// Scalars the checks know how to draw at random.
pub trait Sample: PackedLanes {
    /// Type name shown in reports.
    const NAME: &'static str;

    /// Draws a value small enough that sums of a few of them cannot overflow.
    fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self;

    /// Lossy conversion used for error reporting.
    fn as_f64(self) -> f64;
}

macro_rules! impl_sample {
    ($($t:ty => $name:literal, $range:expr);* $(;)?) => {
        $(
            impl Sample for $t {
                const NAME: &'static str = $name;

                fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self { rng.gen_range($range) }

                fn as_f64(self) -> f64 { self as f64 }
            }
        )*
    };
}

impl_sample!(
    f32 => "f32", -1.0e3..1.0e3;
    f64 => "f64", -1.0e3..1.0e3;
    i32 => "i32", -1_000_000..1_000_000;
);

fn sample_array<T: Sample, const N: usize>(rng: &mut ChaCha8Rng) -> [T; N] {
    std::array::from_fn(|_| T::sample(rng))
}

/// Adds random scalars to random vectors through both evaluation families and
/// compares the results component-wise.
pub fn check_add_scalar<T: Sample, const N: usize>(
    rng: &mut ChaCha8Rng,
    samples: usize,
) -> Result<Report, CheckError> {
    for sample in 0..samples {
        let mut naive = FixedVector::<T, N, Free, Naive>::new(sample_array(rng));
        let mut packed = naive.retag::<Free, Packed>();
        let rhs = T::sample(rng);
        naive.add_scalar(rhs);
        packed.add_scalar(rhs);
        if naive.as_array() != packed.as_array() {
            return Err(CheckError::Mismatch {
                scalar: T::NAME,
                dim: N,
                sample,
                naive: naive.to_string(),
                packed: packed.to_string(),
            });
        }
    }
    Ok(Report {
        kind: CheckKind::AddScalar,
        scalar: T::NAME,
        dim: N,
        samples,
        max_rel_error: None,
    })
}

/// Compares the length of random vectors with the exact square root of their
/// squared length.
pub fn check_length<T: Sample + Real, const N: usize>(
    rng: &mut ChaCha8Rng,
    samples: usize,
) -> Result<Report, CheckError> {
    let mut max_rel_error = 0.0f64;
    for _ in 0..samples {
        let v = FixedVector::<T, N>::new(sample_array(rng));
        let exact = v.length_squared().sqrt();
        if exact == T::zero() {
            continue;
        }
        let error = ((v.length() - exact) / exact).abs().as_f64();
        if error >= RSQRT_REL_ERROR_BOUND {
            return Err(CheckError::LengthOutOfBound {
                scalar: T::NAME,
                dim: N,
                vector: v.to_string(),
                error,
                bound: RSQRT_REL_ERROR_BOUND,
            });
        }
        max_rel_error = max_rel_error.max(error);
    }
    Ok(Report {
        kind: CheckKind::Length,
        scalar: T::NAME,
        dim: N,
        samples,
        max_rel_error: Some(max_rel_error),
    })
}

macro_rules! for_each_dim {
    (@dims $check:ident, $t:ty, $rng:expr, $samples:expr, $reports:expr; $($n:literal),+) => {
        $(
            let report = $check::<$t, $n>($rng, $samples)?;
            log::debug!("{}", report);
            $reports.push(report);
        )+
    };
    ($check:ident::<$t:ty>($rng:expr, $samples:expr) => $reports:expr) => {
        for_each_dim!(@dims $check, $t, $rng, $samples, $reports; 1, 2, 3, 4, 5, 6, 7, 8);
    };
}

/// Runs every check with the given arguments, stopping at the first failure.
pub fn run(args: &CheckArgs) -> Result<Vec<Report>, CheckError> {
    log::info!(
        "Checking {} samples per configuration with seed {:#x} on the {} backend",
        args.samples,
        args.seed,
        sml_vec::backend()
    );
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut reports = Vec::new();

    for_each_dim!(check_add_scalar::<f32>(&mut rng, args.samples) => reports);
    for_each_dim!(check_add_scalar::<f64>(&mut rng, args.samples) => reports);
    for_each_dim!(check_add_scalar::<i32>(&mut rng, args.samples) => reports);
    for_each_dim!(check_length::<f32>(&mut rng, args.samples) => reports);
    for_each_dim!(check_length::<f64>(&mut rng, args.samples) => reports);

    log::info!("{} configurations passed", reports.len());
    Ok(reports)
}

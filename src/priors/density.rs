//! Prior density contract — the closed functional interface for block priors.
//!
//! Purpose
//! -------
//! Define the calling contract every prior density must satisfy so the
//! parameter space and the prior engine can treat priors as opaque
//! callables: a per-component log-density, an optional analytic gradient,
//! and an optional box support consumed by bound queries.
//!
//! Key behaviors
//! -------------
//! - [`PriorDensity`]: trait implemented by built-in and user priors.
//! - [`BoundArg`]: scalar-or-vector density argument with broadcasting,
//!   used for supports, reflection bounds, locations, and scales.
//!
//! Invariants & assumptions
//! ------------------------
//! - `ln_pdf` returns one log-density **per component** of the input
//!   sub-vector; out-of-support components are `-inf` values, not errors.
//! - The joint prior is assumed to factorize across blocks and across
//!   components within a block. This is a design assumption of the
//!   engine, not a computed property: implementers must not encode
//!   cross-component coupling in `ln_pdf`.
//! - `ln_pdf_grad` has the identical signature and returns the
//!   elementwise derivative of `ln_pdf`. Densities without an analytic
//!   gradient keep the default, which returns
//!   [`PriorError::GradientNotImplemented`]; the engine converts that
//!   sentinel into an exactly-zero gradient contribution.
//!
//! Conventions
//! -----------
//! - Vector-valued arguments must match the block length; scalar
//!   arguments broadcast across all components.
//! - No I/O, no logging, no global state; failures are reported via
//!   [`PriorResult`] only.
use crate::priors::errors::{PriorError, PriorResult};
use ndarray::{Array1, ArrayView1};

/// Scalar-or-vector prior argument.
///
/// A `Scalar` broadcasts across every component of a block; a `Vector`
/// supplies one value per component and must match the block length.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundArg {
    Scalar(f64),
    Vector(Array1<f64>),
}

impl BoundArg {
    /// Number of explicit values carried (1 for scalars).
    pub fn len(&self) -> usize {
        match self {
            BoundArg::Scalar(_) => 1,
            BoundArg::Vector(v) => v.len(),
        }
    }

    /// True when no explicit values are carried (empty vector).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value for component `k`, broadcasting scalars.
    ///
    /// Callers must have validated vector lengths against the block
    /// length first (see [`BoundArg::matches`]); indexing past the end of
    /// a `Vector` is a programming error and panics.
    pub fn broadcast(&self, k: usize) -> f64 {
        match self {
            BoundArg::Scalar(v) => *v,
            BoundArg::Vector(v) => v[k],
        }
    }

    /// Whether this argument is compatible with a block of length `n`.
    pub fn matches(&self, n: usize) -> bool {
        match self {
            BoundArg::Scalar(_) => true,
            BoundArg::Vector(v) => v.len() == n,
        }
    }

    /// Validate compatibility with a sub-vector of length `n`.
    pub fn validate_against(&self, n: usize, field: &'static str) -> PriorResult<()> {
        if self.matches(n) {
            Ok(())
        } else {
            Err(PriorError::ArgLengthMismatch { field, expected: n, actual: self.len() })
        }
    }
}

/// Opaque prior density over one parameter block.
///
/// Implement this trait to supply custom priors; the built-ins live in
/// [`crate::priors::builtin`]. The contract:
///
/// - `ln_pdf(x)` returns a length-`x.len()` array of per-component log
///   densities. Out-of-support components are `-inf`, not errors.
/// - `ln_pdf_grad(x)` returns the elementwise derivative of `ln_pdf`.
///   The default returns [`PriorError::GradientNotImplemented`], which
///   the engine maps to a zero contribution.
/// - `support()` exposes box bounds (`mini`, `maxi`) for densities with
///   bounded support; it feeds
///   [`crate::parameters::ParameterSpace::bounds`] and is independent of
///   any reflection bounds configured on the owning block.
pub trait PriorDensity: std::fmt::Debug {
    fn ln_pdf(&self, x: ArrayView1<'_, f64>) -> PriorResult<Array1<f64>>;

    fn ln_pdf_grad(&self, _x: ArrayView1<'_, f64>) -> PriorResult<Array1<f64>> {
        Err(PriorError::GradientNotImplemented)
    }

    fn support(&self) -> Option<(&BoundArg, &BoundArg)> {
        None
    }
}

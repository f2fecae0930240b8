//! rust_sedfit — parameter-space plumbing for Bayesian SED fitting.
//!
//! Purpose
//! -------
//! Serve as the crate root for the sampling-side machinery of spectral
//! energy distribution fitting: mapping flat sampler vectors onto named
//! parameter blocks, evaluating factorized priors and their gradients,
//! reflecting trajectories off box constraints, and assembling the
//! log-posterior (and its restricted analytic gradient) from
//! observational data and an external model-generation engine.
//!
//! Key behaviors
//! -------------
//! - Re-export the core modules (`parameters`, `priors`, `sampling`,
//!   `posterior`) as the public crate surface.
//! - Keep the expensive spectral synthesis behind the
//!   [`posterior::SpectralBasis`] trait so the crate stays agnostic of
//!   any particular stellar-population engine.
//!
//! Invariants & assumptions
//! ------------------------
//! - A flat theta vector is the lingua franca: every public entry point
//!   takes one and validates its length against the parameter space
//!   before touching data.
//! - Rejected proposals (out-of-support theta) are values (`-inf`), not
//!   errors; errors are reserved for structural misuse that retrying
//!   cannot fix.
//!
//! Conventions
//! -----------
//! - Each module owns its error enum (`ParamError`, `PriorError`,
//!   `ReflectError`, `PosteriorError`) with `From` conversions flowing
//!   toward the posterior layer.
//! - Vectors and matrices are `ndarray` types throughout; parameter
//!   maps are `HashMap<String, Array1<f64>>`.
//!
//! Downstream usage
//! ----------------
//! - A sampler driver builds a [`parameters::ParameterSpace`], wraps it
//!   with observations and a basis in a [`posterior::SedModel`], and
//!   evaluates `ln_posterior` / `ln_posterior_grad` per proposal, using
//!   [`sampling::reflect_into_bounds`] between leapfrog steps.
//!
//! Testing notes
//! -------------
//! - Numerical behavior is covered by unit tests in each module; the
//!   integration suite exercises the full expand → prior → posterior →
//!   gradient pipeline against finite differences.

pub mod parameters;
pub mod posterior;
pub mod priors;
pub mod sampling;

//! priors — density contract, built-in registry, and aggregation engine.
//!
//! Purpose
//! -------
//! Treat prior probability as a set of opaque per-block callables with a
//! fixed calling contract, and compose them into the aggregate log-prior
//! scalar and gradient the posterior evaluators consume.
//!
//! Key behaviors
//! -------------
//! - [`PriorDensity`]: the closed functional interface (per-component
//!   log-density, optional analytic gradient, optional box support).
//! - [`builtin::TopHat`] and [`builtin::Normal`]: the fixed built-in
//!   registry; custom priors implement the trait directly.
//! - [`ln_prior`] / [`ln_prior_grad`]: aggregation over a
//!   [`crate::parameters::ParameterSpace`], with additive zero-fill for
//!   gradient-free blocks.
//! - [`max_gradient_deviation`]: finite-difference verification for
//!   custom analytic gradients.
//!
//! Conventions
//! -----------
//! - `-inf` log-densities mark rejected regions and are normal values,
//!   never errors; the engine performs no clipping.

pub mod builtin;
pub mod check;
pub mod density;
pub mod engine;
pub mod errors;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::check::max_gradient_deviation;
pub use self::density::{BoundArg, PriorDensity};
pub use self::engine::{ln_prior, ln_prior_grad};
pub use self::errors::{PriorError, PriorResult};

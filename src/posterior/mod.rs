//! posterior — observation ingestion and posterior/gradient evaluation.
//!
//! Purpose
//! -------
//! Turn a flat theta vector into a log-posterior value or, for the
//! restricted mass-only configuration, its analytic gradient. The
//! expensive spectral synthesis lives behind the [`SpectralBasis`]
//! trait; this module owns everything around it: observation
//! validation, prior short-circuiting, Gaussian likelihood terms, and
//! the error taxonomy separating fatal configuration problems from
//! rejected proposals.
//!
//! Downstream usage
//! ----------------
//! A sampler holds a [`SedModel`] and calls
//! [`SedModel::ln_posterior`] per proposal; gradient-based drivers add
//! [`SedModel::ln_posterior_grad`] and the boundary handling in
//! [`crate::sampling`].

pub mod basis;
pub mod errors;
pub mod model;
pub mod observation;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::basis::{BasisExtras, BasisOutput, ComponentOutput, SpectralBasis};
pub use self::errors::{PosteriorError, PosteriorResult};
pub use self::model::{SedModel, MASS_BLOCK};
pub use self::observation::{Observation, PhotObservation, SpecObservation};

//! Model-generation collaborator contract.
//!
//! The stellar-population / radiative-transfer engine that turns an
//! expanded parameter map into model spectra and photometry lives
//! outside this crate. The evaluators only depend on this narrow trait:
//! a summed prediction for likelihoods and a component-resolved variant
//! for analytic mass gradients.
use crate::parameters::ParamMap;
use crate::posterior::errors::PosteriorResult;
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Derived quantities reported alongside predictions (e.g. stellar
/// mass formed). Purely informational to this crate.
pub type BasisExtras = HashMap<String, f64>;

/// Summed model prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct BasisOutput {
    /// Model spectrum on the observed wavelength grid (empty when no
    /// wavelengths were requested).
    pub spectrum: Array1<f64>,
    /// Model photometry, one flux per requested filter.
    pub photometry: Array1<f64>,
    pub extras: BasisExtras,
}

/// Component-resolved model prediction, one row per mass component.
///
/// Rows follow the ordering of the `mass` parameter vector so the
/// gradient evaluator can weight them directly.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentOutput {
    /// Per-component spectra, shape `(n_components, n_wavelengths)`.
    pub spectra: Array2<f64>,
    /// Per-component photometry, shape `(n_components, n_filters)`.
    pub photometry: Array2<f64>,
    pub extras: BasisExtras,
}

/// External model-generation engine.
///
/// Implementations must return empty arrays (zero wavelengths/filters)
/// for empty requests rather than erroring, since either observational
/// channel may be absent. Failures are reported through
/// [`crate::posterior::errors::PosteriorError::Basis`].
pub trait SpectralBasis {
    /// Summed spectrum and photometry for the expanded parameters.
    fn spectrum(
        &self, params: &ParamMap, wavelength: &Array1<f64>, filters: &[String],
    ) -> PosteriorResult<BasisOutput>;

    /// Per-component spectra and photometry, not yet mass-weighted.
    fn components(
        &self, params: &ParamMap, wavelength: &Array1<f64>, filters: &[String],
    ) -> PosteriorResult<ComponentOutput>;
}

//! SED model — posterior probability and restricted analytic gradient.
//!
//! Purpose
//! -------
//! Tie a [`ParameterSpace`], an [`Observation`] bundle, and an external
//! [`SpectralBasis`] together into the two entry points a sampler needs:
//! the log-posterior of a flat theta vector and, for the restricted
//! mass-only configuration, its analytic gradient.
//!
//! Key behaviors
//! -------------
//! - [`SedModel::ln_posterior`]: log-prior plus Gaussian spectroscopic
//!   and photometric likelihood terms. A non-finite log-prior
//!   short-circuits to `-inf` **without** invoking the basis; model
//!   generation dominates the cost of a posterior call and clearly
//!   rejected proposals must not pay it.
//! - [`SedModel::ln_posterior_grad`]: analytic gradient defined only
//!   when the space spans exactly the [`MASS_BLOCK`] block; anything
//!   else is a fatal [`PosteriorError::UnsupportedGradientRequest`].
//!   A non-zero spectroscopic jitter is
//!   [`PosteriorError::JitterGradientUnimplemented`] — the normalization
//!   term's gradient is not defined in this design and a silent zero
//!   would be wrong.
//! - [`SedModel::mean_model`]: basis prediction with the
//!   `normalization_guess` scalar applied and a positive flux floor.
//! - Polynomial spectral calibration, active only when `pivot_wave` and
//!   `poly_coeffs` parameters are present; sky and nebular hooks return
//!   zero.
//!
//! Invariants & assumptions
//! ------------------------
//! - Likelihood terms are Gaussian. `jitter` inflates the spectroscopic
//!   variance multiplicatively (`unc^2 + (jitter*spectrum)^2`) and adds
//!   the matching `-0.5 ln(2 pi var)` normalization; `phot_jitter` plays
//!   the same role in maggie space. Missing channels contribute zero.
//! - Evaluation is single-threaded and synchronous; every call expands
//!   theta into a fresh parameter map, so one model may serve multiple
//!   sequential evaluations without shared mutable state.
use crate::parameters::{ParamMap, ParameterSpace};
use crate::posterior::{
    basis::{BasisOutput, SpectralBasis},
    errors::{PosteriorError, PosteriorResult},
    observation::Observation,
};
use crate::priors::engine::{ln_prior, ln_prior_grad};
use ndarray::{s, Array1, Zip};

/// Name of the block carrying stellar-mass amplitudes; the only block
/// for which analytic posterior gradients are defined.
pub const MASS_BLOCK: &str = "mass";

/// Magnitude-to-flux uncertainty conversion factor, `2.5 / ln(10)`.
const MAG_TO_FLUX_UNC: f64 = 1.086;

/// First scalar of a named parameter, or a default when absent.
fn scalar_param(params: &ParamMap, name: &str, default: f64) -> f64 {
    params.get(name).and_then(|v| v.iter().next().copied()).unwrap_or(default)
}

/// Bayesian SED model over one observation bundle.
#[derive(Debug)]
pub struct SedModel<B: SpectralBasis> {
    space: ParameterSpace,
    obs: Observation,
    basis: B,
}

impl<B: SpectralBasis> SedModel<B> {
    pub fn new(space: ParameterSpace, obs: Observation, basis: B) -> Self {
        SedModel { space, obs, basis }
    }

    pub fn space(&self) -> &ParameterSpace {
        &self.space
    }

    pub fn space_mut(&mut self) -> &mut ParameterSpace {
        &mut self.space
    }

    pub fn obs(&self) -> &Observation {
        &self.obs
    }

    pub fn basis(&self) -> &B {
        &self.basis
    }

    fn wavelength(&self) -> Array1<f64> {
        match &self.obs.spec {
            Some(so) => so.wavelength().clone(),
            None => Array1::zeros(0),
        }
    }

    fn filters(&self) -> Vec<String> {
        match &self.obs.phot {
            Some(po) => po.filters().to_vec(),
            None => Vec::new(),
        }
    }

    /// Model spectrum, photometry, and extras for a theta vector.
    ///
    /// Applies the `normalization_guess` scalar parameter (default 1.0)
    /// and clamps the spectrum at a small positive floor so downstream
    /// logarithms and divisions stay finite.
    pub fn mean_model(&self, theta: &Array1<f64>) -> PosteriorResult<BasisOutput> {
        let params = self.space.expand(theta)?;
        self.mean_model_with(&params)
    }

    fn mean_model_with(&self, params: &ParamMap) -> PosteriorResult<BasisOutput> {
        let wavelength = self.wavelength();
        let filters = self.filters();
        let mut out = self.basis.spectrum(params, &wavelength, &filters)?;
        let norm = scalar_param(params, "normalization_guess", 1.0);
        out.spectrum.mapv_inplace(|v| v * norm);
        if let Some(min_positive) =
            out.spectrum.iter().copied().filter(|&v| v > 0.0).reduce(f64::min)
        {
            let tiny = min_positive / out.spectrum.len() as f64;
            out.spectrum.mapv_inplace(|v| if v < tiny { tiny } else { v });
        }
        Ok(out)
    }

    /// Polynomial spectral calibration.
    ///
    /// Active only when `pivot_wave` and `poly_coeffs` are resolved
    /// parameters: `(1 + sum_m c_m x^m) * spec_norm` with
    /// `x = wavelength / pivot_wave - 1`. Unity otherwise.
    pub fn calibration(&self, params: &ParamMap, wavelength: &Array1<f64>) -> Array1<f64> {
        match (params.get("pivot_wave"), params.get("poly_coeffs")) {
            (Some(pivot), Some(coeffs)) if !pivot.is_empty() => {
                let spec_norm = scalar_param(params, "spec_norm", 1.0);
                let x = wavelength.mapv(|w| w / pivot[0] - 1.0);
                let mut poly = Array1::<f64>::zeros(wavelength.len());
                for (m, &c) in coeffs.iter().enumerate() {
                    poly = poly + x.mapv(|xi| c * xi.powi(m as i32 + 1));
                }
                poly.mapv(|p| (1.0 + p) * spec_norm)
            }
            _ => Array1::ones(wavelength.len()),
        }
    }

    /// Sky emission/absorption hook; zero in this design.
    pub fn sky(&self, wavelength: &Array1<f64>) -> Array1<f64> {
        Array1::zeros(wavelength.len())
    }

    /// Nebular emission hook; zero in this design.
    pub fn nebular(&self, wavelength: &Array1<f64>) -> Array1<f64> {
        Array1::zeros(wavelength.len())
    }

    /// Log-posterior probability of a flat theta vector.
    ///
    /// Evaluates the log-prior first; a non-finite prior returns `-inf`
    /// immediately and the basis is never invoked. Otherwise adds the
    /// spectroscopic and photometric Gaussian terms for whichever
    /// channels the observation carries.
    pub fn ln_posterior(&self, theta: &Array1<f64>) -> PosteriorResult<f64> {
        let lnp_prior = ln_prior(&self.space, theta)?;
        if !lnp_prior.is_finite() {
            return Ok(f64::NEG_INFINITY);
        }
        let params = self.space.expand(theta)?;
        let model = self.mean_model_with(&params)?;

        let mut lnp = lnp_prior;
        if let Some(so) = &self.obs.spec {
            if model.spectrum.len() != so.spectrum().len() {
                return Err(PosteriorError::ChannelLengthMismatch {
                    field: "model_spectrum",
                    expected: so.spectrum().len(),
                    actual: model.spectrum.len(),
                });
            }
            let jitter = scalar_param(&params, "jitter", 0.0);
            let var = Zip::from(so.unc())
                .and(so.spectrum())
                .map_collect(|&u, &s| u * u + (jitter * s).powi(2));
            let mut chi2 = 0.0;
            Zip::from(so.spectrum()).and(&model.spectrum).and(&var).and(so.mask()).for_each(
                |&o, &m, &v, &masked| {
                    if masked {
                        chi2 += (o - m).powi(2) / v;
                    }
                },
            );
            lnp += -0.5 * chi2;
            if jitter != 0.0 {
                let mut log_norm = 0.0;
                Zip::from(&var).and(so.mask()).for_each(|&v, &masked| {
                    if masked {
                        log_norm += (2.0 * std::f64::consts::PI * v).ln();
                    }
                });
                lnp += -0.5 * log_norm;
            }
        }

        if let Some(po) = &self.obs.phot {
            if model.photometry.len() != po.maggies().len() {
                return Err(PosteriorError::ChannelLengthMismatch {
                    field: "model_photometry",
                    expected: po.maggies().len(),
                    actual: model.photometry.len(),
                });
            }
            let jitter = scalar_param(&params, "phot_jitter", 0.0);
            let var = Zip::from(po.maggies())
                .and(po.mags_unc())
                .map_collect(|&mg, &mu| mg * mg * ((mu / MAG_TO_FLUX_UNC).powi(2) + jitter * jitter));
            let mut chi2 = 0.0;
            Zip::from(po.maggies()).and(&model.photometry).and(&var).for_each(|&o, &m, &v| {
                chi2 += (m - o).powi(2) / v;
            });
            lnp += -0.5 * chi2;
            if jitter != 0.0 {
                let log_norm =
                    var.fold(0.0, |acc, &v| acc + (2.0 * std::f64::consts::PI * v).ln());
                lnp += -0.5 * log_norm;
            }
        }
        Ok(lnp)
    }

    /// Analytic log-posterior gradient for the mass-only configuration.
    ///
    /// The flat vector must span exactly the [`MASS_BLOCK`] block;
    /// calibration, dust, and jitter parameters have no analytic
    /// gradients in this design and requesting them is fatal rather
    /// than silently wrong.
    pub fn ln_posterior_grad(&self, theta: &Array1<f64>) -> PosteriorResult<Array1<f64>> {
        let blocks = self.space.blocks();
        let mass_only = blocks.len() == 1 && blocks[0].name() == MASS_BLOCK;
        if !mass_only {
            let names: Vec<&str> = blocks.iter().map(|b| b.name()).collect();
            return Err(PosteriorError::UnsupportedGradientRequest {
                blocks: names.join(", "),
            });
        }

        let params = self.space.expand(theta)?;
        let jitter = scalar_param(&params, "jitter", 0.0);
        if jitter != 0.0 {
            return Err(PosteriorError::JitterGradientUnimplemented { value: jitter });
        }
        let mass = params
            .get(MASS_BLOCK)
            .ok_or_else(|| PosteriorError::MissingParameter { name: MASS_BLOCK.to_string() })?;

        let wavelength = self.wavelength();
        let filters = self.filters();
        let comp = self.basis.components(&params, &wavelength, &filters)?;
        validate_component_shape("spectra rows", mass.len(), comp.spectra.nrows())?;
        validate_component_shape("spectra columns", wavelength.len(), comp.spectra.ncols())?;
        validate_component_shape("photometry rows", mass.len(), comp.photometry.nrows())?;
        validate_component_shape("photometry columns", filters.len(), comp.photometry.ncols())?;

        let cal = self.calibration(&params, &wavelength);
        let neb = self.nebular(&wavelength);
        let sky = self.sky(&wavelength);
        let model_spec = (mass.dot(&comp.spectra) + &neb + &sky) * &cal;
        let model_phot = mass.dot(&comp.photometry);

        let mut grad = ln_prior_grad(&self.space, theta)?;
        let mut mass_grad = Array1::zeros(mass.len());

        if let Some(so) = &self.obs.spec {
            // Gated above: jitter is zero, so the variance is purely
            // observational.
            let var = so.unc().mapv(|u| u * u);
            let weight = Zip::from(so.spectrum())
                .and(&model_spec)
                .and(&var)
                .and(&cal)
                .map_collect(|&o, &m, &v, &c| (o - m) / v * c);
            for (k, row) in comp.spectra.rows().into_iter().enumerate() {
                let mut acc = 0.0;
                Zip::from(&row).and(&weight).and(so.mask()).for_each(|&r, &w, &masked| {
                    if masked {
                        acc += w * r;
                    }
                });
                mass_grad[k] += acc;
            }
        }

        if let Some(po) = &self.obs.phot {
            let pjitter = scalar_param(&params, "phot_jitter", 0.0);
            let var = Zip::from(po.maggies())
                .and(po.mags_unc())
                .map_collect(|&mg, &mu| {
                    mg * mg * ((mu / MAG_TO_FLUX_UNC).powi(2) + pjitter * pjitter)
                });
            let delta = Zip::from(po.maggies())
                .and(&model_phot)
                .and(&var)
                .map_collect(|&o, &m, &v| (o - m) / v);
            for (k, row) in comp.photometry.rows().into_iter().enumerate() {
                mass_grad[k] += row.dot(&delta);
            }
        }

        let range = blocks[0].range();
        let mut slice = grad.slice_mut(s![range]);
        slice += &mass_grad;
        Ok(grad)
    }
}

fn validate_component_shape(
    axis: &'static str, expected: usize, actual: usize,
) -> PosteriorResult<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(PosteriorError::ComponentShapeMismatch { axis, expected, actual })
    }
}

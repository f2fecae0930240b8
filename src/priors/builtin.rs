//! Built-in prior registry — tophat (uniform) and normal (Gaussian).
//!
//! Purpose
//! -------
//! Provide the fixed set of built-in densities used by typical SED fits.
//! Anything beyond these two is supplied by implementing
//! [`PriorDensity`] directly; the trait is the extension point.
//!
//! Key behaviors
//! -------------
//! - [`TopHat`]: uniform log-density `-ln(width)` inside a validated box
//!   support, `-inf` outside. Exposes `support()` so the owning
//!   parameter space can answer bound queries. Defines no gradient: the
//!   density is flat inside its support and the engine zero-fills.
//! - [`Normal`]: Gaussian log-density via `statrs`, with the analytic
//!   gradient `-(x - mu) / sigma^2`. Unbounded, so `support()` is `None`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Constructors validate arguments once so evaluation never fails on
//!   argument values, only on sub-vector length mismatches.
//! - Scalar arguments broadcast across the block; vector arguments must
//!   match the block length at evaluation time.
use crate::priors::{
    density::{BoundArg, PriorDensity},
    errors::{PriorError, PriorResult},
};
use ndarray::{Array1, ArrayView1};
use statrs::distribution::{Continuous, Normal as GaussianDist};

fn validate_finite(arg: &BoundArg, what: fn(usize, f64) -> PriorError) -> PriorResult<()> {
    for k in 0..arg.len() {
        let v = arg.broadcast(k);
        if !v.is_finite() {
            return Err(what(k, v));
        }
    }
    Ok(())
}

/// Uniform prior over a box support `[mini, maxi]`.
///
/// Inside the support every component contributes `-ln(maxi - mini)`;
/// outside, `-inf`. The support doubles as the block's box bound for
/// [`crate::parameters::ParameterSpace::bounds`].
#[derive(Debug, Clone, PartialEq)]
pub struct TopHat {
    mini: BoundArg,
    maxi: BoundArg,
}

impl TopHat {
    /// Construct a tophat prior, validating the support.
    ///
    /// # Errors
    /// - [`PriorError::ArgLengthMismatch`] if `mini` and `maxi` are both
    ///   vectors of different lengths.
    /// - [`PriorError::InvalidLocation`] if any bound is non-finite.
    /// - [`PriorError::EmptySupport`] if any width `maxi - mini` is not
    ///   strictly positive.
    pub fn new(mini: BoundArg, maxi: BoundArg) -> PriorResult<Self> {
        if let (BoundArg::Vector(lo), BoundArg::Vector(hi)) = (&mini, &maxi) {
            if lo.len() != hi.len() {
                return Err(PriorError::ArgLengthMismatch {
                    field: "maxi",
                    expected: lo.len(),
                    actual: hi.len(),
                });
            }
        }
        validate_finite(&mini, |index, value| PriorError::InvalidLocation { index, value })?;
        validate_finite(&maxi, |index, value| PriorError::InvalidLocation { index, value })?;
        let n = mini.len().max(maxi.len());
        for k in 0..n {
            let lo = mini.broadcast(k);
            let hi = maxi.broadcast(k);
            if hi - lo <= 0.0 {
                return Err(PriorError::EmptySupport { index: k, mini: lo, maxi: hi });
            }
        }
        Ok(TopHat { mini, maxi })
    }

    /// Scalar-bound convenience constructor.
    pub fn scalar(mini: f64, maxi: f64) -> PriorResult<Self> {
        TopHat::new(BoundArg::Scalar(mini), BoundArg::Scalar(maxi))
    }

    /// Vector-bound convenience constructor.
    pub fn vector(mini: Array1<f64>, maxi: Array1<f64>) -> PriorResult<Self> {
        TopHat::new(BoundArg::Vector(mini), BoundArg::Vector(maxi))
    }
}

impl PriorDensity for TopHat {
    fn ln_pdf(&self, x: ArrayView1<'_, f64>) -> PriorResult<Array1<f64>> {
        self.mini.validate_against(x.len(), "mini")?;
        self.maxi.validate_against(x.len(), "maxi")?;
        let mut out = Array1::zeros(x.len());
        for (k, &xk) in x.iter().enumerate() {
            let lo = self.mini.broadcast(k);
            let hi = self.maxi.broadcast(k);
            out[k] = if (lo..=hi).contains(&xk) { -(hi - lo).ln() } else { f64::NEG_INFINITY };
        }
        Ok(out)
    }

    fn support(&self) -> Option<(&BoundArg, &BoundArg)> {
        Some((&self.mini, &self.maxi))
    }
}

/// Gaussian prior with per-component location and scale.
///
/// Carries the analytic gradient `-(x - mu) / sigma^2`; the density
/// itself is evaluated through `statrs`.
#[derive(Debug, Clone)]
pub struct Normal {
    mean: BoundArg,
    sigma: BoundArg,
    dists: Vec<GaussianDist>,
}

impl Normal {
    /// Construct a Gaussian prior, validating location and scale.
    ///
    /// # Errors
    /// - [`PriorError::ArgLengthMismatch`] if `mean` and `sigma` are both
    ///   vectors of different lengths.
    /// - [`PriorError::InvalidLocation`] for non-finite means.
    /// - [`PriorError::InvalidScale`] for non-finite or non-positive sigmas.
    pub fn new(mean: BoundArg, sigma: BoundArg) -> PriorResult<Self> {
        if let (BoundArg::Vector(mu), BoundArg::Vector(sg)) = (&mean, &sigma) {
            if mu.len() != sg.len() {
                return Err(PriorError::ArgLengthMismatch {
                    field: "sigma",
                    expected: mu.len(),
                    actual: sg.len(),
                });
            }
        }
        validate_finite(&mean, |index, value| PriorError::InvalidLocation { index, value })?;
        let n = mean.len().max(sigma.len());
        let mut dists = Vec::with_capacity(n);
        for k in 0..n {
            let mu = mean.broadcast(k);
            let sg = sigma.broadcast(k);
            if !sg.is_finite() || sg <= 0.0 {
                return Err(PriorError::InvalidScale { index: k, value: sg });
            }
            let dist = GaussianDist::new(mu, sg)
                .map_err(|_| PriorError::InvalidScale { index: k, value: sg })?;
            dists.push(dist);
        }
        Ok(Normal { mean, sigma, dists })
    }

    /// Scalar-argument convenience constructor.
    pub fn scalar(mean: f64, sigma: f64) -> PriorResult<Self> {
        Normal::new(BoundArg::Scalar(mean), BoundArg::Scalar(sigma))
    }

    fn dist(&self, k: usize) -> &GaussianDist {
        if self.dists.len() == 1 {
            &self.dists[0]
        } else {
            &self.dists[k]
        }
    }
}

impl PriorDensity for Normal {
    fn ln_pdf(&self, x: ArrayView1<'_, f64>) -> PriorResult<Array1<f64>> {
        self.mean.validate_against(x.len(), "mean")?;
        self.sigma.validate_against(x.len(), "sigma")?;
        let mut out = Array1::zeros(x.len());
        for (k, &xk) in x.iter().enumerate() {
            out[k] = self.dist(k).ln_pdf(xk);
        }
        Ok(out)
    }

    fn ln_pdf_grad(&self, x: ArrayView1<'_, f64>) -> PriorResult<Array1<f64>> {
        self.mean.validate_against(x.len(), "mean")?;
        self.sigma.validate_against(x.len(), "sigma")?;
        let mut out = Array1::zeros(x.len());
        for (k, &xk) in x.iter().enumerate() {
            let mu = self.mean.broadcast(k);
            let sg = self.sigma.broadcast(k);
            out[k] = -(xk - mu) / (sg * sg);
        }
        Ok(out)
    }
}

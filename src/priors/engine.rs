//! Prior engine — aggregate log-prior density and gradient over theta.
//!
//! Purpose
//! -------
//! Compose the per-block densities owned by a
//! [`ParameterSpace`] into a single scalar log-prior and a single
//! flat-vector gradient, with the block offsets doing the indexing.
//!
//! Key behaviors
//! -------------
//! - [`ln_prior`]: sum of every block's per-component log-densities.
//!   The prior factorizes across blocks and across components within a
//!   block by design assumption (see [`crate::priors::density`]); the
//!   engine performs no clipping, so `-inf` flows from the densities
//!   themselves and is a normal rejected-region outcome, not an error.
//! - [`ln_prior_grad`]: zero-initialized output with each
//!   gradient-bearing block's contribution written into its slice.
//!   Densities reporting [`PriorError::GradientNotImplemented`]
//!   contribute exactly zero; the posterior gradient assembly relies on
//!   this additive zero-fill for calibration/jitter-style blocks.
use crate::parameters::{validation::validate_theta_len, ParameterSpace};
use crate::priors::errors::{PriorError, PriorResult};
use ndarray::{s, Array1};

/// Aggregate log-prior density of a flat vector.
///
/// # Errors
/// - [`PriorError::ThetaLengthMismatch`] unless
///   `theta.len() == space.dimension()`.
/// - Any density-argument error surfaced by a block's `ln_pdf`.
pub fn ln_prior(space: &ParameterSpace, theta: &Array1<f64>) -> PriorResult<f64> {
    validate_theta_len(space.dimension(), theta.len())?;
    let mut total = 0.0;
    for block in space.blocks() {
        let sub = theta.slice(s![block.range()]);
        total += block.prior().ln_pdf(sub)?.sum();
    }
    Ok(total)
}

/// Aggregate log-prior gradient of a flat vector.
///
/// Blocks without an analytic gradient contribute exactly zero. A block
/// returning a gradient of the wrong length is a programming error in
/// the density and surfaces as [`PriorError::ArgLengthMismatch`].
pub fn ln_prior_grad(space: &ParameterSpace, theta: &Array1<f64>) -> PriorResult<Array1<f64>> {
    validate_theta_len(space.dimension(), theta.len())?;
    let mut grad = Array1::zeros(theta.len());
    for block in space.blocks() {
        let sub = theta.slice(s![block.range()]);
        match block.prior().ln_pdf_grad(sub) {
            Ok(block_grad) => {
                if block_grad.len() != block.length() {
                    return Err(PriorError::ArgLengthMismatch {
                        field: "gradient",
                        expected: block.length(),
                        actual: block_grad.len(),
                    });
                }
                grad.slice_mut(s![block.range()]).assign(&block_grad);
            }
            Err(PriorError::GradientNotImplemented) => {}
            Err(err) => return Err(err),
        }
    }
    Ok(grad)
}

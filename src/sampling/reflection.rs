//! Reflective boundary handling for gradient-based trajectories.
//!
//! Purpose
//! -------
//! Between leapfrog steps an HMC-style sampler may step outside a
//! block's box constraints. This module mirrors the out-of-bounds
//! position back into the valid region, flipping the corresponding
//! momentum signs, and repeats until every component satisfies its
//! bounds. The sampler invokes this between trajectory steps; the
//! posterior evaluators never do.
//!
//! Key behaviors
//! -------------
//! - Per component: `x > upper` maps to `2*upper - x` with a sign flip,
//!   symmetrically for `lower`. A large step in a narrow interval may
//!   reflect one component several times across successive sweeps; the
//!   loop runs until one full sweep produces no violation.
//! - Components exactly at a bound are untouched (strict inequalities),
//!   so reflection is idempotent at the boundary.
//!
//! Invariants & assumptions
//! ------------------------
//! - Reflection bounds come from each block's `lower`/`upper` metadata
//!   and are independent from the prior's own support.
//! - Non-finite theta components are rejected up front
//!   ([`ReflectError::NonFiniteComponent`]); they compare false against
//!   every bound and no reflection can recover them.
//! - Degenerate intervals (width <= 0 wherever both bounds are defined)
//!   are detected up front and surfaced as
//!   [`ReflectError::DegenerateBound`]; the sweep count is capped at
//!   [`MAX_REFLECTION_SWEEPS`] so pathological inputs surface as
//!   [`ReflectError::NonConvergence`] instead of looping forever.
use crate::parameters::ParameterSpace;
use crate::sampling::errors::{ReflectError, ReflectResult};
use ndarray::Array1;

/// Upper bound on full reflection sweeps before giving up.
///
/// Generous for any finite step size relative to the interval width: a
/// step that needs this many reflections indicates a broken trajectory
/// or bound configuration, not a recoverable state.
pub const MAX_REFLECTION_SWEEPS: usize = 1024;

/// Outcome of one reflection pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Reflection {
    /// Corrected position, inside all bounds.
    pub theta: Array1<f64>,
    /// Accumulated momentum signs, one per component, each `(-1)^r` for
    /// `r` reflections applied to that component.
    pub sign: Array1<f64>,
    /// Whether any reflection occurred during the whole call; callers
    /// use this to decide whether momentum bookkeeping is needed.
    pub reflected: bool,
}

/// Reflect a proposed position into its blocks' bounds.
///
/// # Errors
/// - [`ReflectError::ThetaLengthMismatch`] unless
///   `theta.len() == space.dimension()`.
/// - [`ReflectError::NonFiniteComponent`] for NaN or infinite
///   components, which no reflection can bring in bounds.
/// - [`ReflectError::DegenerateBound`] for any component whose defined
///   `lower`/`upper` pair has non-positive width.
/// - [`ReflectError::NonConvergence`] if the sweep cap is exhausted.
pub fn reflect_into_bounds(
    space: &ParameterSpace, theta: &Array1<f64>,
) -> ReflectResult<Reflection> {
    if theta.len() != space.dimension() {
        return Err(ReflectError::ThetaLengthMismatch {
            expected: space.dimension(),
            actual: theta.len(),
        });
    }
    // NaN and infinite components compare false against every bound and
    // would pass through the sweep loop untouched.
    for (index, &value) in theta.iter().enumerate() {
        if !value.is_finite() {
            return Err(ReflectError::NonFiniteComponent { index, value });
        }
    }
    for block in space.blocks() {
        if let (Some(lower), Some(upper)) = (block.lower(), block.upper()) {
            for k in 0..block.length() {
                let lo = lower.broadcast(k);
                let hi = upper.broadcast(k);
                if hi - lo <= 0.0 {
                    return Err(ReflectError::DegenerateBound {
                        block: block.name().to_string(),
                        index: k,
                        lower: lo,
                        upper: hi,
                    });
                }
            }
        }
    }

    let mut theta = theta.clone();
    let mut sign = Array1::<f64>::ones(theta.len());
    let mut reflected = false;
    for _sweep in 0..MAX_REFLECTION_SWEEPS {
        let mut out_of_bounds = false;
        for block in space.blocks() {
            for k in 0..block.length() {
                let i = block.offset() + k;
                if let Some(upper) = block.upper() {
                    let hi = upper.broadcast(k);
                    if theta[i] > hi {
                        theta[i] = 2.0 * hi - theta[i];
                        sign[i] = -sign[i];
                        out_of_bounds = true;
                        reflected = true;
                    }
                }
                if let Some(lower) = block.lower() {
                    let lo = lower.broadcast(k);
                    if theta[i] < lo {
                        theta[i] = 2.0 * lo - theta[i];
                        sign[i] = -sign[i];
                        out_of_bounds = true;
                        reflected = true;
                    }
                }
            }
        }
        if !out_of_bounds {
            return Ok(Reflection { theta, sign, reflected });
        }
    }
    Err(ReflectError::NonConvergence { sweeps: MAX_REFLECTION_SWEEPS })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::PriorSpec;
    use crate::priors::builtin::TopHat;
    use crate::priors::density::BoundArg;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Idempotence for in-bounds and exactly-at-bound positions.
    // - Single and repeated reflection with sign bookkeeping.
    // - One-sided bounds, degenerate-bound detection, and theta length
    //   rejection.
    // - Non-finite component rejection and sweep-cap exhaustion.
    //
    // They intentionally DO NOT cover:
    // - Interaction with momentum vectors themselves; callers own that
    //   bookkeeping via the returned sign array.
    // -------------------------------------------------------------------------

    fn unit_interval_space() -> ParameterSpace {
        let block = PriorSpec::new("mass", 0, 1, Box::new(TopHat::scalar(0.0, 1.0).unwrap()))
            .with_lower(BoundArg::Scalar(0.0))
            .with_upper(BoundArg::Scalar(1.0));
        ParameterSpace::new(vec![block]).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Verify that a component exactly at the upper bound is unaffected:
    // no value change, no sign flip, no reflection reported.
    //
    // Given
    // -----
    // - Bounds [0, 1] and theta = [1.0].
    //
    // Expect
    // ------
    // - theta unchanged, sign == [1.0], reflected == false.
    fn component_at_bound_is_untouched() {
        // Arrange
        let space = unit_interval_space();
        let theta = array![1.0];

        // Act
        let out = reflect_into_bounds(&space, &theta).unwrap();

        // Assert
        assert_eq!(out.theta, array![1.0]);
        assert_eq!(out.sign, array![1.0]);
        assert!(!out.reflected);
    }

    #[test]
    // Purpose
    // -------
    // Verify a small overshoot maps to the mirrored interior point with
    // a flipped sign.
    //
    // Given
    // -----
    // - Bounds [0, 1] and theta = [1.0 + 0.125].
    //
    // Expect
    // ------
    // - theta == [1.0 - 0.125], sign == [-1.0], reflected == true.
    fn small_overshoot_is_mirrored_with_sign_flip() {
        // Arrange
        let space = unit_interval_space();
        let theta = array![1.125];

        // Act
        let out = reflect_into_bounds(&space, &theta).unwrap();

        // Assert
        assert_relative_eq!(out.theta[0], 0.875);
        assert_eq!(out.sign, array![-1.0]);
        assert!(out.reflected);
    }

    #[test]
    // Purpose
    // -------
    // Verify repeated reflection: a step far past the upper bound keeps
    // reflecting until in bounds, with the final sign equal to (-1)
    // raised to the number of reflections applied.
    //
    // Given
    // -----
    // - Bounds [0, 1] and theta = [2.3].
    //
    // Expect
    // ------
    // - 2.3 -> -0.3 -> 0.3 (two reflections): theta == [0.3], sign ==
    //   [1.0], reflected == true.
    fn large_overshoot_reflects_repeatedly_until_in_bounds() {
        // Arrange
        let space = unit_interval_space();
        let theta = array![2.3];

        // Act
        let out = reflect_into_bounds(&space, &theta).unwrap();

        // Assert
        assert_relative_eq!(out.theta[0], 0.3, max_relative = 1e-12);
        assert_eq!(out.sign, array![1.0]);
        assert!(out.reflected);
    }

    #[test]
    // Purpose
    // -------
    // Verify one-sided bounds reflect only on their defined side and
    // vector bounds apply per component.
    //
    // Given
    // -----
    // - Block of length 2 with only lower bounds [0, 1] and theta =
    //   [-0.5, 5.0].
    //
    // Expect
    // ------
    // - theta == [0.5, 5.0], sign == [-1.0, 1.0].
    fn one_sided_vector_bounds_reflect_per_component() {
        // Arrange
        let block = PriorSpec::new("mass", 0, 2, Box::new(TopHat::scalar(-10.0, 10.0).unwrap()))
            .with_lower(BoundArg::Vector(array![0.0, 1.0]));
        let space = ParameterSpace::new(vec![block]).unwrap();
        let theta = array![-0.5, 5.0];

        // Act
        let out = reflect_into_bounds(&space, &theta).unwrap();

        // Assert
        assert_eq!(out.theta, array![0.5, 5.0]);
        assert_eq!(out.sign, array![-1.0, 1.0]);
    }

    #[test]
    // Purpose
    // -------
    // Verify degenerate intervals are a fatal configuration error, not
    // an infinite loop.
    //
    // Given
    // -----
    // - A block with lower == upper == 1.0 and an out-of-bounds theta.
    //
    // Expect
    // ------
    // - reflect_into_bounds returns DegenerateBound.
    fn degenerate_interval_is_fatal_configuration_error() {
        // Arrange
        let block = PriorSpec::new("mass", 0, 1, Box::new(TopHat::scalar(0.0, 2.0).unwrap()))
            .with_lower(BoundArg::Scalar(1.0))
            .with_upper(BoundArg::Scalar(1.0));
        let space = ParameterSpace::new(vec![block]).unwrap();
        let theta = array![3.0];

        // Act
        let res = reflect_into_bounds(&space, &theta);

        // Assert
        assert_eq!(
            res,
            Err(ReflectError::DegenerateBound {
                block: "mass".to_string(),
                index: 0,
                lower: 1.0,
                upper: 1.0,
            })
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify a NaN component is rejected up front instead of passing
    // through the sweep loop as "in bounds".
    //
    // Given
    // -----
    // - Bounds [0, 1] and theta = [NaN].
    //
    // Expect
    // ------
    // - reflect_into_bounds returns NonFiniteComponent at index 0.
    fn nan_component_is_rejected_up_front() {
        // Arrange
        let space = unit_interval_space();
        let theta = array![f64::NAN];

        // Act
        let res = reflect_into_bounds(&space, &theta);

        // Assert
        assert!(matches!(res, Err(ReflectError::NonFiniteComponent { index: 0, .. })));
    }

    #[test]
    // Purpose
    // -------
    // Verify the sweep cap surfaces as NonConvergence for a position so
    // far outside a narrow interval that folding it back would need more
    // sweeps than the cap allows.
    //
    // Given
    // -----
    // - Bounds [0, 1] and theta = [1e300] (finite, ~5e299 sweeps away).
    //
    // Expect
    // ------
    // - reflect_into_bounds returns NonConvergence at the cap.
    fn sweep_cap_exhaustion_surfaces_as_non_convergence() {
        // Arrange
        let space = unit_interval_space();
        let theta = array![1e300];

        // Act
        let res = reflect_into_bounds(&space, &theta);

        // Assert
        assert_eq!(res, Err(ReflectError::NonConvergence { sweeps: MAX_REFLECTION_SWEEPS }));
    }

    #[test]
    // Purpose
    // -------
    // Verify theta length is validated against the space dimension.
    //
    // Given
    // -----
    // - A one-dimensional space and a length-2 theta.
    //
    // Expect
    // ------
    // - reflect_into_bounds returns ThetaLengthMismatch.
    fn reflection_rejects_wrong_length_theta() {
        // Arrange
        let space = unit_interval_space();
        let theta = array![0.5, 0.5];

        // Act
        let res = reflect_into_bounds(&space, &theta);

        // Assert
        assert_eq!(res, Err(ReflectError::ThetaLengthMismatch { expected: 1, actual: 2 }));
    }
}

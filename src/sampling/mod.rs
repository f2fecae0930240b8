//! sampling — trajectory boundary handling for gradient-based samplers.
//!
//! The evaluators in [`crate::posterior`] never touch this module; a
//! host HMC/NUTS driver calls [`reflect_into_bounds`] between leapfrog
//! steps to keep trajectories inside each block's box constraints while
//! tracking momentum sign flips.

pub mod errors;
pub mod reflection;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{ReflectError, ReflectResult};
pub use self::reflection::{reflect_into_bounds, Reflection, MAX_REFLECTION_SWEEPS};

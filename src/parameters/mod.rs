//! parameters — flat theta vectors and their named block structure.
//!
//! Purpose
//! -------
//! Provide the mapping between the single flat parameter vector consumed
//! by an external sampler and the structured, named parameter blocks the
//! rest of the model works with. This module owns the layout metadata
//! ([`PriorSpec`]), the descriptor ([`ParameterSpace`]) with its
//! `expand`/`contract` bijection and bound queries, and the validation
//! helpers that make the layout safe by construction.
//!
//! Key behaviors
//! -------------
//! - Define the block layout invariant: slices partition `[0, ndim)`
//!   with no gaps or overlaps, enforced at construction.
//! - Convert flat vectors to `name -> Array1<f64>` maps and back, with
//!   fatal shape errors instead of silent truncation.
//! - Answer per-index box bound queries derived from prior supports,
//!   with an explicit undefined sentinel for unbounded indices.
//!
//! Invariants & assumptions
//! ------------------------
//! - A space's structure (names, offsets, lengths) never changes after
//!   construction; `dimension()` is computed once.
//! - `expand` is pure; only the `set_parameters` convenience cache
//!   mutates, so concurrent evaluation uses `expand` directly or holds
//!   an external lock.
//!
//! Downstream usage
//! ----------------
//! - Samplers hold the flat vector and call `expand` through the
//!   evaluators in [`crate::posterior`]; trajectory boundary handling in
//!   [`crate::sampling`] reads block reflection bounds from here.

pub mod descriptor;
pub mod errors;
pub mod spec;
pub mod validation;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::descriptor::{ParamMap, ParameterSpace, UNDEFINED_BOUND};
pub use self::errors::{ParamError, ParamResult};
pub use self::spec::PriorSpec;

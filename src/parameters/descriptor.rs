//! Parameter space — the flat-vector ↔ named-block mapping.
//!
//! Purpose
//! -------
//! Own the ordered collection of [`PriorSpec`] blocks describing how an
//! external sampler's flat theta vector maps onto named, variable-length
//! parameter blocks, and provide the bijective `expand`/`contract`
//! conversions plus per-index box bound queries.
//!
//! Key behaviors
//! -------------
//! - [`ParameterSpace::new`] validates the layout once: unique names,
//!   non-empty blocks, slices exactly partitioning `[0, ndim)`, and bound
//!   arguments sized to their blocks. The structure is immutable after
//!   construction; downstream vectors are sized against `ndim`.
//! - [`ParameterSpace::expand`] is pure and returns a fresh map, so
//!   concurrent evaluations of different theta vectors are safe without
//!   locks. [`ParameterSpace::set_parameters`] is the single-threaded
//!   convenience that refreshes the [`ParameterSpace::params`] cache.
//! - [`ParameterSpace::contract`] is the exact inverse of `expand`:
//!   `contract(Some(&expand(v))) == v` for every valid `v`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `theta.len() == ndim` for every expand/contract call; violations are
//!   fatal [`ParamError::ThetaLengthMismatch`] errors, never silent
//!   truncation.
//! - Fixed parameters attached via [`ParameterSpace::with_fixed`] are
//!   merged into every expansion; a block with the same name shadows the
//!   fixed entry.
//!
//! Conventions
//! -----------
//! - The expanded representation is a plain `name -> Array1<f64>` map;
//!   block ordering is carried by the offsets, not by map iteration.
use crate::parameters::{
    errors::{ParamError, ParamResult},
    spec::PriorSpec,
    validation::{validate_block_args, validate_partition, validate_theta_len},
};
use ndarray::{s, Array1};
use std::collections::HashMap;

/// Expanded parameter representation: block (or fixed) name to values.
pub type ParamMap = HashMap<String, Array1<f64>>;

/// Sentinel returned by [`ParameterSpace::bounds`] for indices whose
/// block defines no box support. Callers must treat it as "undefined",
/// never as a real constraint.
pub const UNDEFINED_BOUND: (f64, f64) = (0.0, 0.0);

/// Ordered collection of parameter blocks spanning the flat vector.
#[derive(Debug)]
pub struct ParameterSpace {
    blocks: Vec<PriorSpec>,
    ndim: usize,
    fixed: ParamMap,
    params: ParamMap,
}

impl ParameterSpace {
    /// Build a parameter space from block metadata.
    ///
    /// Blocks may be supplied in any order; they are sorted by offset
    /// before layout validation.
    ///
    /// # Errors
    /// - [`ParamError::EmptyBlock`], [`ParamError::DuplicateBlockName`],
    ///   or [`ParamError::NonContiguousBlocks`] for layout violations.
    /// - [`ParamError::BoundLengthMismatch`] for vector-valued support or
    ///   reflection bounds that do not match their block length.
    pub fn new(mut blocks: Vec<PriorSpec>) -> ParamResult<Self> {
        blocks.sort_by_key(|b| b.offset());
        let ndim = validate_partition(&blocks)?;
        for block in &blocks {
            validate_block_args(block)?;
        }
        Ok(ParameterSpace { blocks, ndim, fixed: ParamMap::new(), params: ParamMap::new() })
    }

    /// Attach a fixed (non-sampled) parameter merged into every expansion.
    pub fn with_fixed(mut self, name: impl Into<String>, value: Array1<f64>) -> Self {
        self.fixed.insert(name.into(), value);
        self
    }

    /// Total dimensionality of the flat vector. Never fails after
    /// construction.
    pub fn dimension(&self) -> usize {
        self.ndim
    }

    /// Blocks in offset order.
    pub fn blocks(&self) -> &[PriorSpec] {
        &self.blocks
    }

    /// Look up a block by name.
    pub fn block(&self, name: &str) -> Option<&PriorSpec> {
        self.blocks.iter().find(|b| b.name() == name)
    }

    /// Expand a flat vector into the named representation.
    ///
    /// Pure: returns a fresh map of `fixed ∪ {name -> materialized
    /// sub-vector copy}` without touching the cache, so it can be called
    /// concurrently for different theta vectors.
    ///
    /// # Errors
    /// - [`ParamError::ThetaLengthMismatch`] unless
    ///   `theta.len() == self.dimension()`.
    pub fn expand(&self, theta: &Array1<f64>) -> ParamResult<ParamMap> {
        validate_theta_len(self.ndim, theta.len())?;
        let mut params = self.fixed.clone();
        for block in &self.blocks {
            params.insert(block.name().to_string(), theta.slice(s![block.range()]).to_owned());
        }
        Ok(params)
    }

    /// Expand and store the result in the convenience cache.
    ///
    /// Single-threaded callers can follow with [`ParameterSpace::params`]
    /// and [`ParameterSpace::contract`] without carrying the map around.
    pub fn set_parameters(&mut self, theta: &Array1<f64>) -> ParamResult<()> {
        self.params = self.expand(theta)?;
        Ok(())
    }

    /// Last cached expansion (empty before the first `set_parameters`).
    pub fn params(&self) -> &ParamMap {
        &self.params
    }

    /// Contract a named representation back into a flat vector.
    ///
    /// Reads from `source` when given, otherwise from the cache. Entries
    /// that do not correspond to a block (fixed parameters, extras) are
    /// ignored.
    ///
    /// # Errors
    /// - [`ParamError::UnknownBlock`] when a block is missing from the
    ///   source map.
    /// - [`ParamError::BlockLengthMismatch`] when a supplied value does
    ///   not fill its slice exactly.
    pub fn contract(&self, source: Option<&ParamMap>) -> ParamResult<Array1<f64>> {
        let source = source.unwrap_or(&self.params);
        let mut theta = Array1::zeros(self.ndim);
        for block in &self.blocks {
            let values = source
                .get(block.name())
                .ok_or_else(|| ParamError::UnknownBlock { name: block.name().to_string() })?;
            if values.len() != block.length() {
                return Err(ParamError::BlockLengthMismatch {
                    name: block.name().to_string(),
                    expected: block.length(),
                    actual: values.len(),
                });
            }
            theta.slice_mut(s![block.range()]).assign(values);
        }
        Ok(theta)
    }

    /// Per-index box bounds derived from each block's prior support.
    ///
    /// Scalar supports broadcast across the block; vector supports are
    /// consumed per component. Indices whose block defines no support
    /// report [`UNDEFINED_BOUND`].
    pub fn bounds(&self) -> Vec<(f64, f64)> {
        let mut bounds = vec![UNDEFINED_BOUND; self.ndim];
        for block in &self.blocks {
            if let Some((mini, maxi)) = block.prior().support() {
                for k in 0..block.length() {
                    bounds[block.offset() + k] = (mini.broadcast(k), maxi.broadcast(k));
                }
            }
        }
        bounds
    }
}

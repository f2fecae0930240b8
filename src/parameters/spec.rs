//! Block metadata — one named slice of the flat theta vector.
use crate::priors::density::{BoundArg, PriorDensity};
use std::ops::Range;

/// Metadata for one named parameter block.
///
/// A block owns a contiguous half-open slice `[offset, offset + length)`
/// of the flat theta vector, the prior density evaluated on that slice,
/// and optional reflection bounds used by
/// [`crate::sampling::reflect_into_bounds`].
///
/// Reflection bounds are deliberately independent from the prior's own
/// box support: the support feeds probability and
/// [`crate::parameters::ParameterSpace::bounds`], while `lower`/`upper`
/// only steer trajectory reflection. The two may differ.
#[derive(Debug)]
pub struct PriorSpec {
    name: String,
    offset: usize,
    length: usize,
    prior: Box<dyn PriorDensity>,
    lower: Option<BoundArg>,
    upper: Option<BoundArg>,
}

impl PriorSpec {
    /// Describe a block at `[offset, offset + length)` with the given prior.
    ///
    /// Layout invariants (unique name, non-zero length, contiguity with
    /// its siblings) are enforced by
    /// [`crate::parameters::ParameterSpace::new`], not here.
    pub fn new(
        name: impl Into<String>, offset: usize, length: usize, prior: Box<dyn PriorDensity>,
    ) -> Self {
        PriorSpec { name: name.into(), offset, length, prior, lower: None, upper: None }
    }

    /// Attach a lower reflection bound (scalar broadcasts over the block).
    pub fn with_lower(mut self, lower: BoundArg) -> Self {
        self.lower = Some(lower);
        self
    }

    /// Attach an upper reflection bound (scalar broadcasts over the block).
    pub fn with_upper(mut self, upper: BoundArg) -> Self {
        self.upper = Some(upper);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Half-open slice of the flat vector owned by this block.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.length
    }

    pub fn prior(&self) -> &dyn PriorDensity {
        self.prior.as_ref()
    }

    pub fn lower(&self) -> Option<&BoundArg> {
        self.lower.as_ref()
    }

    pub fn upper(&self) -> Option<&BoundArg> {
        self.upper.as_ref()
    }
}

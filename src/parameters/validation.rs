//! Parameter-space validation helpers.
//!
//! Purpose
//! -------
//! Centralize the checks that make a [`crate::parameters::ParameterSpace`]
//! safe to use after construction: theta lengths, block layout, and bound
//! argument compatibility. Constructors call these so invariants hold
//! from birth and evaluation code never re-checks layout.
//!
//! Conventions
//! -----------
//! - Functions return [`ParamResult`] and never panic on invalid inputs.
//! - Blocks are expected pre-sorted by offset when `validate_partition`
//!   runs; `ParameterSpace::new` sorts before calling.
use crate::parameters::{
    errors::{ParamError, ParamResult},
    spec::PriorSpec,
};

/// Validate a flat-vector length against the space dimension.
///
/// Returns
/// -------
/// `Ok(())` when `actual == expected`, otherwise
/// `Err(ParamError::ThetaLengthMismatch)`. Never truncates or pads.
pub fn validate_theta_len(expected: usize, actual: usize) -> ParamResult<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(ParamError::ThetaLengthMismatch { expected, actual })
    }
}

/// Validate that blocks exactly partition `[0, ndim)` and return `ndim`.
///
/// Parameters
/// ----------
/// - `blocks`: block metadata sorted by offset.
///
/// Returns
/// -------
/// `ParamResult<usize>`
///   - `Ok(ndim)` where `ndim` is the sum of all block lengths.
///   - `Err(ParamError::EmptyBlock)` for a zero-length block.
///   - `Err(ParamError::DuplicateBlockName)` for repeated names.
///   - `Err(ParamError::NonContiguousBlocks)` for any gap or overlap,
///     including a first block that does not start at offset 0.
pub fn validate_partition(blocks: &[PriorSpec]) -> ParamResult<usize> {
    let mut next_offset = 0;
    for block in blocks {
        if block.length() == 0 {
            return Err(ParamError::EmptyBlock { name: block.name().to_string() });
        }
        if block.offset() != next_offset {
            return Err(ParamError::NonContiguousBlocks {
                name: block.name().to_string(),
                expected_offset: next_offset,
                found_offset: block.offset(),
            });
        }
        next_offset = block.offset() + block.length();
    }
    for (i, block) in blocks.iter().enumerate() {
        if blocks[..i].iter().any(|other| other.name() == block.name()) {
            return Err(ParamError::DuplicateBlockName { name: block.name().to_string() });
        }
    }
    Ok(next_offset)
}

/// Validate vector-valued bound arguments against the block length.
///
/// Covers both the prior's box support (`mini`/`maxi`) and the optional
/// reflection bounds (`lower`/`upper`). Scalar arguments always pass.
pub fn validate_block_args(block: &PriorSpec) -> ParamResult<()> {
    let check = |field: &'static str, len: usize, matches: bool| -> ParamResult<()> {
        if matches {
            Ok(())
        } else {
            Err(ParamError::BoundLengthMismatch {
                name: block.name().to_string(),
                field,
                expected: block.length(),
                actual: len,
            })
        }
    };
    if let Some((mini, maxi)) = block.prior().support() {
        check("mini", mini.len(), mini.matches(block.length()))?;
        check("maxi", maxi.len(), maxi.matches(block.length()))?;
    }
    if let Some(lower) = block.lower() {
        check("lower", lower.len(), lower.matches(block.length()))?;
    }
    if let Some(upper) = block.upper() {
        check("upper", upper.len(), upper.matches(block.length()))?;
    }
    Ok(())
}

/// Result alias for parameter-space operations.
pub type ParamResult<T> = Result<T, ParamError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    // ---- Theta shape ----
    /// Flat vector length does not equal the space dimension. Always
    /// fatal; never silently truncated or padded.
    ThetaLengthMismatch {
        expected: usize,
        actual: usize,
    },

    // ---- Block layout ----
    /// Two blocks share a name.
    DuplicateBlockName {
        name: String,
    },

    /// A block has zero length.
    EmptyBlock {
        name: String,
    },

    /// Block slices must partition [0, ndim) with no gaps or overlaps.
    NonContiguousBlocks {
        name: String,
        expected_offset: usize,
        found_offset: usize,
    },

    /// A vector-valued bound argument does not match its block length.
    BoundLengthMismatch {
        name: String,
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    // ---- Expansion / contraction ----
    /// A named block is missing from the supplied parameter map.
    UnknownBlock {
        name: String,
    },

    /// A supplied block value has the wrong length for its slice.
    BlockLengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
}

impl std::error::Error for ParamError {}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Theta shape ----
            ParamError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }

            // ---- Block layout ----
            ParamError::DuplicateBlockName { name } => {
                write!(f, "Duplicate block name '{name}'")
            }
            ParamError::EmptyBlock { name } => {
                write!(f, "Block '{name}' has zero length")
            }
            ParamError::NonContiguousBlocks { name, expected_offset, found_offset } => {
                write!(
                    f,
                    "Block '{name}' starts at offset {found_offset}, expected {expected_offset}: \
                     slices must partition the flat vector with no gaps or overlaps"
                )
            }
            ParamError::BoundLengthMismatch { name, field, expected, actual } => {
                write!(
                    f,
                    "Block '{name}' bound '{field}' length mismatch: expected {expected}, \
                     actual {actual}"
                )
            }

            // ---- Expansion / contraction ----
            ParamError::UnknownBlock { name } => {
                write!(f, "Block '{name}' missing from parameter map")
            }
            ParamError::BlockLengthMismatch { name, expected, actual } => {
                write!(
                    f,
                    "Block '{name}' value length mismatch: expected {expected}, actual {actual}"
                )
            }
        }
    }
}

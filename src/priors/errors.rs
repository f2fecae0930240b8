use crate::parameters::errors::ParamError;

/// Result alias for prior-density operations.
pub type PriorResult<T> = Result<T, PriorError>;

#[derive(Debug, Clone, PartialEq)]
pub enum PriorError {
    // ---- Gradient ----
    /// Sentinel: the density defines no analytic gradient. The prior
    /// engine treats this as a zero contribution, never as a failure.
    GradientNotImplemented,

    // ---- Shape ----
    /// Theta length does not match the parameter space dimension.
    ThetaLengthMismatch {
        expected: usize,
        actual: usize,
    },

    /// A vector-valued density argument does not match the sub-vector length.
    ArgLengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    // ---- Density arguments ----
    /// Scale (sigma) must be finite and strictly positive.
    InvalidScale {
        index: usize,
        value: f64,
    },

    /// Location (mean) must be finite.
    InvalidLocation {
        index: usize,
        value: f64,
    },

    /// Tophat support must have strictly positive width.
    EmptySupport {
        index: usize,
        mini: f64,
        maxi: f64,
    },

    // ---- Descriptor ----
    /// Wrapper for parameter-space errors surfaced through the engine.
    Descriptor {
        text: String,
    },
}

impl std::error::Error for PriorError {}

impl std::fmt::Display for PriorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            PriorError::GradientNotImplemented => {
                write!(f, "Prior gradient not implemented for this density")
            }

            // ---- Shape ----
            PriorError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            PriorError::ArgLengthMismatch { field, expected, actual } => {
                write!(
                    f,
                    "Prior argument '{field}' length mismatch: expected {expected}, actual {actual}"
                )
            }

            // ---- Density arguments ----
            PriorError::InvalidScale { index, value } => {
                write!(f, "Invalid scale at index {index}: {value}, must be finite and > 0")
            }
            PriorError::InvalidLocation { index, value } => {
                write!(f, "Invalid location at index {index}: {value}, must be finite")
            }
            PriorError::EmptySupport { index, mini, maxi } => {
                write!(
                    f,
                    "Empty tophat support at index {index}: [{mini}, {maxi}] has non-positive width"
                )
            }

            // ---- Descriptor ----
            PriorError::Descriptor { text } => {
                write!(f, "Parameter space error: {text}")
            }
        }
    }
}

impl From<ParamError> for PriorError {
    fn from(err: ParamError) -> Self {
        match err {
            ParamError::ThetaLengthMismatch { expected, actual } => {
                PriorError::ThetaLengthMismatch { expected, actual }
            }
            other => PriorError::Descriptor { text: other.to_string() },
        }
    }
}

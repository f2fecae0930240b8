use crate::parameters::errors::ParamError;
use crate::priors::errors::PriorError;

/// Result alias for posterior evaluation.
pub type PosteriorResult<T> = Result<T, PosteriorError>;

#[derive(Debug, Clone, PartialEq)]
pub enum PosteriorError {
    // ---- Parameter space ----
    /// Theta length does not match the parameter space dimension.
    ThetaLengthMismatch {
        expected: usize,
        actual: usize,
    },

    /// A named block is missing from a supplied parameter map.
    UnknownBlock {
        name: String,
    },

    /// A supplied block value has the wrong length for its slice.
    BlockLengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Wrapper for other parameter-space errors.
    Descriptor {
        text: String,
    },

    // ---- Priors ----
    /// Wrapper for prior-density errors.
    Prior {
        text: String,
    },

    // ---- Gradient ----
    /// Analytic posterior gradients are defined only when the parameter
    /// space spans exactly the mass block. Fatal; retrying without
    /// changing the configuration cannot succeed.
    UnsupportedGradientRequest {
        blocks: String,
    },

    /// The gradient of the jitter-dependent normalization term is not
    /// defined; a non-zero jitter during gradient evaluation is fatal
    /// rather than a silently wrong zero.
    JitterGradientUnimplemented {
        value: f64,
    },

    /// A parameter required by the evaluator is absent from the
    /// expanded map.
    MissingParameter {
        name: String,
    },

    // ---- Observations ----
    /// Two observation arrays that must share a length do not.
    ChannelLengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Observational uncertainties must be finite and strictly positive.
    InvalidUncertainty {
        index: usize,
        value: f64,
    },

    /// The spectral mask selects no pixels.
    NoValidPixels,

    /// The ingestion rescale factor is non-finite or non-positive.
    InvalidRescale {
        value: f64,
    },

    // ---- Model basis ----
    /// A per-component basis output does not match the expected shape.
    ComponentShapeMismatch {
        axis: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Failure reported by the model-generation collaborator.
    Basis {
        text: String,
    },
}

impl std::error::Error for PosteriorError {}

impl std::fmt::Display for PosteriorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Parameter space ----
            PosteriorError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            PosteriorError::UnknownBlock { name } => {
                write!(f, "Block '{name}' missing from parameter map")
            }
            PosteriorError::BlockLengthMismatch { name, expected, actual } => {
                write!(
                    f,
                    "Block '{name}' value length mismatch: expected {expected}, actual {actual}"
                )
            }
            PosteriorError::Descriptor { text } => {
                write!(f, "Parameter space error: {text}")
            }

            // ---- Priors ----
            PosteriorError::Prior { text } => {
                write!(f, "Prior error: {text}")
            }

            // ---- Gradient ----
            PosteriorError::UnsupportedGradientRequest { blocks } => {
                write!(
                    f,
                    "Analytic gradients are defined only for a space spanning exactly the \
                     'mass' block; this space has blocks [{blocks}]"
                )
            }
            PosteriorError::JitterGradientUnimplemented { value } => {
                write!(
                    f,
                    "Gradient of the jitter normalization term is not implemented \
                     (jitter = {value}); refusing to return a silently wrong gradient"
                )
            }
            PosteriorError::MissingParameter { name } => {
                write!(f, "Required parameter '{name}' missing from expanded parameters")
            }

            // ---- Observations ----
            PosteriorError::ChannelLengthMismatch { field, expected, actual } => {
                write!(
                    f,
                    "Observation field '{field}' length mismatch: expected {expected}, \
                     actual {actual}"
                )
            }
            PosteriorError::InvalidUncertainty { index, value } => {
                write!(
                    f,
                    "Invalid uncertainty at index {index}: {value}, must be finite and > 0"
                )
            }
            PosteriorError::NoValidPixels => {
                write!(f, "Spectral mask selects no pixels")
            }
            PosteriorError::InvalidRescale { value } => {
                write!(f, "Invalid rescale factor: {value}, must be finite and > 0")
            }

            // ---- Model basis ----
            PosteriorError::ComponentShapeMismatch { axis, expected, actual } => {
                write!(
                    f,
                    "Component output shape mismatch on {axis}: expected {expected}, \
                     actual {actual}"
                )
            }
            PosteriorError::Basis { text } => {
                write!(f, "Model basis error: {text}")
            }
        }
    }
}

impl From<ParamError> for PosteriorError {
    fn from(err: ParamError) -> Self {
        match err {
            ParamError::ThetaLengthMismatch { expected, actual } => {
                PosteriorError::ThetaLengthMismatch { expected, actual }
            }
            ParamError::UnknownBlock { name } => PosteriorError::UnknownBlock { name },
            ParamError::BlockLengthMismatch { name, expected, actual } => {
                PosteriorError::BlockLengthMismatch { name, expected, actual }
            }
            other => PosteriorError::Descriptor { text: other.to_string() },
        }
    }
}

impl From<PriorError> for PosteriorError {
    fn from(err: PriorError) -> Self {
        match err {
            PriorError::ThetaLengthMismatch { expected, actual } => {
                PosteriorError::ThetaLengthMismatch { expected, actual }
            }
            other => PosteriorError::Prior { text: other.to_string() },
        }
    }
}

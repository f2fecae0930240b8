/// Result alias for boundary-reflection operations.
pub type ReflectResult<T> = Result<T, ReflectError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ReflectError {
    // ---- Shape ----
    /// Theta length does not match the parameter space dimension.
    ThetaLengthMismatch {
        expected: usize,
        actual: usize,
    },

    /// A proposed component is NaN or infinite; such values compare
    /// false against every bound and would pass through reflection
    /// untouched.
    NonFiniteComponent {
        index: usize,
        value: f64,
    },

    // ---- Bounds ----
    /// A reflection interval has non-positive width; reflection could
    /// ping-pong forever. Fatal configuration error.
    DegenerateBound {
        block: String,
        index: usize,
        lower: f64,
        upper: f64,
    },

    /// The reflection loop failed to converge within the sweep cap.
    NonConvergence {
        sweeps: usize,
    },
}

impl std::error::Error for ReflectError {}

impl std::fmt::Display for ReflectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Shape ----
            ReflectError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            ReflectError::NonFiniteComponent { index, value } => {
                write!(f, "Non-finite theta component at index {index}: {value}")
            }

            // ---- Bounds ----
            ReflectError::DegenerateBound { block, index, lower, upper } => {
                write!(
                    f,
                    "Degenerate reflection bound on block '{block}' component {index}: \
                     [{lower}, {upper}] has non-positive width"
                )
            }
            ReflectError::NonConvergence { sweeps } => {
                write!(f, "Reflection failed to converge within {sweeps} sweeps")
            }
        }
    }
}

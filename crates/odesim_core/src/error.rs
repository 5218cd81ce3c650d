use thiserror::Error;

pub type Result<T> = std::result::Result<T, OdeError>;

/// Errors raised by system construction, solver construction and selection.
/// All of them are usage errors; only a run whose clock stops advancing
/// fails after stepping has begun.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OdeError {
    /// Malformed constructor input (non-positive `dt`, non-finite time, bad state length).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The solver cannot integrate the selected system.
    #[error("the {solver} solver is only compatible with mechanical systems, got {system}")]
    ConfigurationMismatch { solver: String, system: String },

    /// Required keys absent from a parameter set.
    #[error("the following keys are missing in the {system} parameters: {keys:?}")]
    MissingParameter { system: String, keys: Vec<String> },

    #[error("unknown system: {0}")]
    UnknownSystem(String),

    #[error("unknown solver: {0}")]
    UnknownSolver(String),

    #[error("unknown initial condition method: {0} (use 'random', 'zeros' or 'ones')")]
    UnknownInitialCondition(String),
}

impl OdeError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        OdeError::InvalidArgument(message.into())
    }
}

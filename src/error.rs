use thiserror::Error;

/// Rejections raised by the S-curve planner.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlanningError {
    #[error("{name} must be a positive finite number, got {value}")]
    InvalidLimit { name: &'static str, value: f64 },
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },
    #[error("{name} {value} exceeds the velocity limit {limit}")]
    VelocityOutOfRange {
        name: &'static str,
        value: f64,
        limit: f64,
    },
    #[error("trajectory is infeasible: displacement {distance} is not larger than the {required} needed to change velocity")]
    Infeasible { distance: f64, required: f64 },
    #[error("trajectory is infeasible: {0}")]
    Degenerate(&'static str),
    #[error("no reduced acceleration fits the requested displacement")]
    NotConverged,
}

/// The only failure the editor pipeline knows about: the current parameter
/// snapshot did not produce a usable trajectory.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{reason}")]
pub struct EvaluationFailure {
    pub reason: String,
}

impl EvaluationFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<PlanningError> for EvaluationFailure {
    fn from(err: PlanningError) -> Self {
        Self::new(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown parameter '{0}'")]
pub struct UnknownParameter(pub String);

/// Errors produced while parsing an operator command line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("missing {0}")]
    MissingArgument(&'static str),
    #[error("'{0}' is not a number")]
    InvalidNumber(String),
    #[error(transparent)]
    Parameter(#[from] UnknownParameter),
}

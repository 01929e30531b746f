use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AcoError {
    #[error("invalid graph: {0}")]
    InvalidGraph(String),
    #[error("vertex {0} can't be added to the tour")]
    DuplicateVertex(usize),
    #[error("length of an incomplete tour is not defined")]
    IncompleteTourAccess,
    #[error("no termination rule chosen")]
    NoTerminationRule,
    #[error("missing parameter {0}")]
    MissingParameter(&'static str),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Reads a parameter that has to be present after all config layers were merged.
pub fn require<T: Copy>(value: Option<T>, name: &'static str) -> Result<T, AcoError> {
    value.ok_or(AcoError::MissingParameter(name))
}

use std::fmt::{self, Display};

use crate::job::JobStatus;

/// Errors produced by model constructors and state transitions.
#[derive(Debug)]
pub enum ModelError {
    /// A job result was asked to move backwards or re-enter a terminal state.
    InvalidTransition { from: JobStatus, to: JobStatus },
    /// A constructor rejected its input.
    InvalidUnit(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidTransition { from, to } => {
                write!(f, "invalid job transition: {from} -> {to}")
            }
            ModelError::InvalidUnit(msg) => write!(f, "invalid unit: {msg}"),
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;

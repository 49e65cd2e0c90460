use std::collections::TryReserveError;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("policy {policy} requires at least {required} points, got {found}")]
    Configuration {
        policy: &'static str,
        required: usize,
        found: usize,
    },
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),
    #[error("no unvisited vertices left to search")]
    EmptySearchSpace,
    #[error("allocation failed: {0}")]
    Allocation(String),
    #[error("rayon pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        Self::PreconditionViolation(message.into())
    }
}

impl From<TryReserveError> for Error {
    fn from(value: TryReserveError) -> Self {
        Self::Allocation(value.to_string())
    }
}

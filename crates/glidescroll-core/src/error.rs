use thiserror::Error;

/// Failure carried by a settled [`ScrollHandle`](crate::ScrollHandle).
///
/// `Copy` so that every joiner of a deduplicated animation reads the
/// same outcome out of the shared completion channel.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollError {
    #[error("scroll target could not be resolved")]
    TargetNotFound,

    #[error("animation interrupted by an external scroll")]
    Interrupted,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

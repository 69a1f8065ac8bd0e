use thiserror::Error;

/// Rejected run configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("batch size must be greater than zero")]
    ZeroBatchSize,
    #[error("row limit must be greater than zero in debug mode")]
    ZeroRowLimit,
    #[error("unknown table: {0}")]
    UnknownTable(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

use thiserror::Error;

/// Errors surfaced by the emit side of the crate.
///
/// Builder mutators never fail: invalid input is discarded and the chain
/// continues. Only serializing or writing the finished record can error.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

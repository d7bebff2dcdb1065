use thiserror::Error;

/// Top-level error type for the paddock workspace.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for PaddockError` so that `?` works across crate
/// boundaries (the binary only ever deals with this type).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PaddockError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("Flight error: {0}")]
    Flight(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for PaddockError {
    fn from(err: toml::de::Error) -> Self {
        PaddockError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for PaddockError {
    fn from(err: toml::ser::Error) -> Self {
        PaddockError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for PaddockError {
    fn from(err: serde_json::Error) -> Self {
        PaddockError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for paddock operations.
pub type Result<T> = std::result::Result<T, PaddockError>;

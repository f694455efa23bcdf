use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpangraphError {
    #[error("input unavailable: {0}")]
    InputUnavailable(String),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialize(String),
}

pub type Result<T> = std::result::Result<T, SpangraphError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParetuneError {
    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("Exhausted sampling: {0}")]
    ExhaustedSampling(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ParetuneError>;

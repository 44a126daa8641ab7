use guild_types::ContractError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("contract error: {0}")]
    Contract(#[from] ContractError),

    #[error("config error: {0}")]
    Config(String),

    #[error("logging error: {0}")]
    Logging(#[from] guild_utils::LoggingError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

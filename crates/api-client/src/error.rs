// In crates/api-client/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to build the API client: {0}")]
    ClientBuildError(String),
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(#[from] serde_json::Error),
    #[error("API error: code {code}, msg: {msg}")]
    ApiError { code: String, msg: String },
    #[error("No price data returned: {0}")]
    NoData(String),
    #[error("Price file error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    InvalidInput(#[from] core_types::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

use jobwatch_core::search::RequestError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("auth token not set; run `jobwatch login` first")]
    MissingAuth,

    #[error("invalid search request: {0}")]
    InvalidRequest(#[from] RequestError),

    #[error("HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;

use thiserror::Error;

/// How a lookup against one of the remote services ended, short of success.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The image service has no cat for this query (HTTP 404).
    #[error("no cats were found")]
    NotFound,
    /// A newer query superseded the request.
    #[error("request cancelled")]
    Cancelled,
    #[error("{0}")]
    Request(String),
}

impl LookupError {
    pub fn request(message: impl Into<String>) -> Self {
        LookupError::Request(message.into())
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::Request(err.to_string())
    }
}

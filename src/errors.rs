use hyper::StatusCode;
use thiserror::Error;

use crate::models::ErrorBody;

#[derive(Debug, Error)]
pub enum ProxyError {
    /// The caller left out something the endpoint needs.
    #[error("{0}")]
    Validation(String),
    /// The server is missing required setup, usually the API key.
    #[error("{0}")]
    Configuration(String),
    /// Building, sending, or reading the upstream call failed, timeouts included.
    #[error("proxy fetch failed: {0}")]
    Upstream(String),
}

impl ProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn body(&self) -> ErrorBody {
        match self {
            Self::Validation(msg) | Self::Configuration(msg) => ErrorBody::new(msg.clone()),
            Self::Upstream(detail) => ErrorBody::with_detail("proxy fetch failed", detail.clone()),
        }
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        // the request URL carries the API key
        Self::Upstream(err.without_url().to_string())
    }
}

impl From<url::ParseError> for ProxyError {
    fn from(err: url::ParseError) -> Self {
        Self::Upstream(format!("invalid upstream url: {err}"))
    }
}

impl warp::reject::Reject for ProxyError {}

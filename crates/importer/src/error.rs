//! Errors raised while talking to an import endpoint.
//!
//! - [`InvalidUrl`] the configured base URL cannot host the endpoint.
//! - [`Io`] the selected file could not be read before sending.
//! - [`Transport`] the request could not be sent or timed out.
//! - [`Decode`] a 2xx response carried a body that is not a summary.
//! - [`Server`] the server answered with a non-2xx status.
//!
//!  [`InvalidUrl`]: ClientError::InvalidUrl
//!  [`Io`]: ClientError::Io
//!  [`Transport`]: ClientError::Transport
//!  [`Decode`]: ClientError::Decode
//!  [`Server`]: ClientError::Server
use api_types::error::ImportErrorBody;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base_url: {0}")]
    InvalidUrl(String),
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{status}: {}", .body.text().unwrap_or("no message"))]
    Server {
        status: StatusCode,
        body: ImportErrorBody,
    },
}

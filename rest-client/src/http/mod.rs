// rest-client/src/http/mod.rs
use crate::request::Request;
use crate::response::Response;
use async_trait::async_trait;

/// Methods a transport is expected to dispatch
pub const SUPPORTED_METHODS: [&str; 6] = ["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD"];

/// Transport-level failure, absorbed into a [`Response`] by adapters
#[derive(Debug, Clone)]
pub struct HttpError {
    pub status: Option<u16>,
    pub message: String,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(status) = self.status {
            write!(f, "HTTP error {}: {}", status, self.message)
        } else {
            write!(f, "HTTP error: {}", self.message)
        }
    }
}

impl std::error::Error for HttpError {}

impl From<crate::Error> for HttpError {
    fn from(err: crate::Error) -> Self {
        HttpError::new(err.to_string())
    }
}

/// Generic HTTP transport - users can implement their own.
///
/// `send` always returns the populated response. Network, TLS and timeout
/// failures are reported as status 0 with the failure description as
/// content, never as an error.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, request: &Request, response: Response) -> Response;
}

#[cfg(feature = "reqwest")]
pub mod reqwest;

#[cfg(feature = "reqwest")]
pub use reqwest::ReqwestClient;

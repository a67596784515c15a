// rest-client/src/error.rs
use thiserror::Error;

/// Errors raised while building a request or an authorization header.
///
/// Transport failures are never reported through this type; they are
/// absorbed into the [`Response`](crate::Response) by the adapter.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed base URL, disallowed scheme, missing attachment file
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Token could not be signed with the configured secret and algorithm
    #[error("Signing error: {0}")]
    Signing(String),
    /// Body could not be encoded as JSON or as a form
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Transport engine could not be constructed
    #[error("Client build error: {0}")]
    Build(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Error::Signing(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_urlencoded::ser::Error> for Error {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

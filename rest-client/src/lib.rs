// rest-client/src/lib.rs
//! REST API client layer: build a [`Request`], hand it to an [`HttpClient`]
//! together with an empty [`Response`], and branch on the populated result.
//!
//! ```no_run
//! # async fn run() -> rest_client::Result<()> {
//! use rest_client::{BearerStringAuthorization, HttpClient, ReqwestClient, Request, Response};
//!
//! let mut request = Request::new("https://api.example.com")?;
//! request
//!     .set_method("POST")
//!     .set_path("v1/items")
//!     .add_header("Content-Type", "application/json")
//!     .add_data("name", "widget")
//!     .set_authorization(BearerStringAuthorization::new("token"));
//!
//! let response = ReqwestClient::new()?.send(&request, Response::new()).await;
//! if response.is_error() {
//!     eprintln!("{}: {}", response.status_code(), response.content());
//! }
//! # Ok(())
//! # }
//! ```
pub mod authorization;
pub mod body;
pub mod config;
pub mod error;
pub mod http;
pub mod request;
pub mod response;
pub mod scalar;

pub use authorization::{
    Authorization, AuthorizationStrategy, BasicAuthorization, BearerStringAuthorization,
    HeaderFormat, JsonWebTokenSigner, JwtAuthorization, TokenSigner,
};
pub use body::{FilePart, RequestBody};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use http::{HttpClient, HttpError};
pub use request::Request;
pub use response::{Response, StatusClass};
pub use scalar::Scalar;

// Re-export the signing algorithm selector used by `JwtAuthorization`
pub use jsonwebtoken::Algorithm;

// Re-export reqwest client when feature is enabled
#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;

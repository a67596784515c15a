// rest-client/src/request.rs
use crate::authorization::{Authorization, AuthorizationStrategy};
use crate::error::{Error, Result};
use crate::scalar::Scalar;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const METHOD_GET: &str = "GET";
pub const METHOD_POST: &str = "POST";
pub const METHOD_PUT: &str = "PUT";
pub const METHOD_PATCH: &str = "PATCH";
pub const METHOD_DELETE: &str = "DELETE";
pub const METHOD_HEAD: &str = "HEAD";

pub const DEFAULT_ACCEPT_TYPE: &str = "application/json";
pub const DEFAULT_ACCEPT_ENCODING: &str = "gzip, deflate";

const ALLOWED_SCHEMES: [&str; 2] = ["http", "https"];

/// Characters stripped from the end of a base URL before validation
const BASE_URL_TRAILING: &[char] = &['/', '.', '\\', ' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Outgoing API request.
///
/// Setters return `&mut Self` so calls can be chained on a single binding.
/// Header keys are stored lower-cased; the computed header view from
/// [`Request::headers`] adds the defaults and the authorization header on
/// every call.
#[derive(Debug, Clone)]
pub struct Request {
    base_url: String,
    method: String,
    path: String,
    authorization: Option<Authorization>,
    headers: BTreeMap<String, String>,
    query: BTreeMap<String, Scalar>,
    data: BTreeMap<String, Scalar>,
    data_raw: String,
    files: BTreeMap<String, PathBuf>,
}

impl Request {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut request = Self {
            base_url: String::new(),
            method: METHOD_GET.to_string(),
            path: "/".to_string(),
            authorization: None,
            headers: BTreeMap::new(),
            query: BTreeMap::new(),
            data: BTreeMap::new(),
            data_raw: String::new(),
            files: BTreeMap::new(),
        };
        request.set_base_url(base_url)?;
        Ok(request)
    }

    /// Set the absolute http(s) URL requests are sent to.
    ///
    /// Trailing slashes, dots, backslashes, whitespace and NUL are stripped
    /// before validation. On error the previous base URL is kept.
    pub fn set_base_url(&mut self, base_url: &str) -> Result<&mut Self> {
        let trimmed = base_url.trim_end_matches(BASE_URL_TRAILING).trim();
        let parsed = url::Url::parse(trimmed)
            .map_err(|_| Error::InvalidArgument(format!("Invalid url '{}'", trimmed)))?;

        let scheme = parsed.scheme().to_ascii_lowercase();
        if !ALLOWED_SCHEMES.contains(&scheme.as_str()) {
            return Err(Error::InvalidArgument(format!(
                "Invalid scheme '{}'",
                scheme
            )));
        }

        // `Url::parse` accepts `http:host`; require the authority form
        let has_authority = trimmed
            .get(scheme.len()..)
            .is_some_and(|rest| rest.starts_with("://"));
        let has_host = parsed.host_str().is_some_and(|h| !h.is_empty());
        if !has_authority || !has_host {
            return Err(Error::InvalidArgument(format!("Invalid url '{}'", trimmed)));
        }

        self.base_url = trimmed.to_string();
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upper-cased and trimmed; unknown methods are rejected by the transport
    pub fn set_method(&mut self, method: &str) -> &mut Self {
        self.method = method.trim().to_uppercase();
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Drop empty segments and prefix a single `/`
    pub fn set_path(&mut self, path: &str) -> &mut Self {
        let segments: Vec<&str> = path.trim().split('/').filter(|s| !s.is_empty()).collect();
        self.path = format!("/{}", segments.join("/"));
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Base URL followed by the path
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, self.path)
    }

    pub fn set_authorization(&mut self, authorization: impl Into<Authorization>) -> &mut Self {
        self.authorization = Some(authorization.into());
        self
    }

    pub fn authorization(&self) -> Option<&Authorization> {
        self.authorization.as_ref()
    }

    pub fn authorization_mut(&mut self) -> Option<&mut Authorization> {
        self.authorization.as_mut()
    }

    pub fn clear_authorization(&mut self) -> &mut Self {
        self.authorization = None;
        self
    }

    /// Case-insensitive; the last write for a key wins
    pub fn add_header(&mut self, key: &str, value: &str) -> &mut Self {
        self.headers.insert(key.to_ascii_lowercase(), value.to_string());
        self
    }

    /// Headers set by the caller, without defaults or authorization
    pub fn explicit_headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Header value set by the caller, looked up case-insensitively
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(&key.to_ascii_lowercase()).map(String::as_str)
    }

    /// Headers to send: explicit headers, `accept` and `accept-encoding`
    /// defaults, and the authorization header when a strategy is set.
    ///
    /// Fails only when the authorization strategy cannot produce a value.
    pub fn headers(&self) -> Result<BTreeMap<String, String>> {
        let mut headers = self.headers.clone();
        headers
            .entry("accept".to_string())
            .or_insert_with(|| DEFAULT_ACCEPT_TYPE.to_string());
        headers
            .entry("accept-encoding".to_string())
            .or_insert_with(|| DEFAULT_ACCEPT_ENCODING.to_string());

        if let Some(authorization) = &self.authorization {
            headers.insert("authorization".to_string(), authorization.content()?);
        }

        Ok(headers)
    }

    pub fn add_query(&mut self, key: &str, value: impl Into<Scalar>) -> &mut Self {
        self.query.insert(key.to_string(), value.into());
        self
    }

    pub fn set_query<K, V>(&mut self, query: impl IntoIterator<Item = (K, V)>) -> &mut Self
    where
        K: Into<String>,
        V: Into<Scalar>,
    {
        self.query = query
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    pub fn query(&self) -> &BTreeMap<String, Scalar> {
        &self.query
    }

    pub fn reset_query(&mut self) -> &mut Self {
        self.query.clear();
        self
    }

    pub fn add_data(&mut self, field: &str, value: impl Into<Scalar>) -> &mut Self {
        self.data.insert(field.to_string(), value.into());
        self
    }

    pub fn set_data<K, V>(&mut self, data: impl IntoIterator<Item = (K, V)>) -> &mut Self
    where
        K: Into<String>,
        V: Into<Scalar>,
    {
        self.data = data
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    pub fn data(&self) -> &BTreeMap<String, Scalar> {
        &self.data
    }

    pub fn set_data_raw(&mut self, data: impl Into<String>) -> &mut Self {
        self.data_raw = data.into();
        self
    }

    pub fn data_raw(&self) -> &str {
        &self.data_raw
    }

    /// Clear both structured data and the raw body
    pub fn reset_data(&mut self) -> &mut Self {
        self.data.clear();
        self.data_raw.clear();
        self
    }

    /// Attach a file as a multipart field.
    ///
    /// The path must exist now; it is not checked again at send time.
    pub fn add_file(&mut self, field: &str, path: impl AsRef<Path>) -> Result<&mut Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::InvalidArgument(format!(
                "File '{}' does not exist",
                path.display()
            )));
        }
        self.files.insert(field.to_string(), path.to_path_buf());
        Ok(self)
    }

    pub fn files(&self) -> &BTreeMap<String, PathBuf> {
        &self.files
    }

    pub fn reset_files(&mut self) -> &mut Self {
        self.files.clear();
        self
    }
}

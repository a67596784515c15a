// rest-client/src/http/reqwest.rs
use super::{HttpClient, HttpError, SUPPORTED_METHODS};
use crate::body::{FilePart, RequestBody};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::request::Request;
use crate::response::Response;
use async_trait::async_trait;
use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::redirect::Policy;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::io::Read;
use tracing::{debug, warn};

/// Set by proxies that already stripped `content-encoding` but left the body encoded
const ORIGINAL_CONTENT_ENCODING: &str = "x-original-content-encoding";

/// Transport adapter backed by one long-lived `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

struct Exchange {
    status: u16,
    headers: BTreeMap<String, String>,
    content: String,
}

impl ReqwestClient {
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let redirect = if config.max_redirects == 0 {
            Policy::none()
        } else {
            Policy::limited(config.max_redirects)
        };

        let inner = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .redirect(redirect)
            .user_agent(config.user_agent.as_str())
            .tcp_nodelay(config.tcp_nodelay)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .build()
            .map_err(|e| Error::Build(e.to_string()))?;

        Ok(Self { inner })
    }

    /// Wrap an already configured engine handle
    pub fn from_client(inner: reqwest::Client) -> Self {
        Self { inner }
    }

    async fn exchange(&self, request: &Request) -> std::result::Result<Exchange, HttpError> {
        let method = parse_method(request.method())?;
        let headers = request.headers()?;
        let body = RequestBody::negotiate(request)?;
        let endpoint = request.endpoint();

        debug!(method = %method, endpoint = %endpoint, body = body.kind(), "sending request");

        let is_multipart = matches!(body, RequestBody::Multipart { .. });
        let mut builder = self.inner.request(method, &endpoint).query(request.query());

        for (key, value) in &headers {
            // the engine writes the multipart content type with its boundary
            if is_multipart && key == CONTENT_TYPE.as_str() {
                continue;
            }
            builder = builder.header(key.as_str(), value.as_str());
        }

        if !headers.contains_key(CONTENT_TYPE.as_str()) {
            if let Some(content_type) = body.default_content_type() {
                builder = builder.header(CONTENT_TYPE, content_type);
            }
        }

        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Multipart { fields, files } => {
                builder.multipart(multipart_form(fields, files)?)
            }
            RequestBody::Raw(body) | RequestBody::Json(body) | RequestBody::Form(body) => {
                builder.body(body)
            }
        };

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let headers = collect_headers(resp.headers());
        let bytes = resp.bytes().await.map_err(|e| HttpError {
            status: Some(status),
            message: e.to_string(),
        })?;
        let content = decode_content(&headers, &bytes)?;

        debug!(status, endpoint = %endpoint, "received response");

        Ok(Exchange {
            status,
            headers,
            content,
        })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn send(&self, request: &Request, mut response: Response) -> Response {
        match self.exchange(request).await {
            Ok(exchange) => {
                response
                    .set_status_code(exchange.status)
                    .set_headers(exchange.headers)
                    .set_content(exchange.content);
            }
            Err(err) => {
                warn!(endpoint = %request.endpoint(), error = %err, "request failed");
                response.fail(err.to_string());
            }
        }
        response
    }
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("Request timeout: {}", err)
        } else if err.is_connect() {
            format!("Connection error: {}", err)
        } else if err.is_builder() {
            format!("Invalid request: {}", err)
        } else {
            err.to_string()
        };
        HttpError {
            status: err.status().map(|s| s.as_u16()),
            message,
        }
    }
}

fn parse_method(method: &str) -> std::result::Result<reqwest::Method, HttpError> {
    if !SUPPORTED_METHODS.contains(&method) {
        return Err(HttpError::new(format!("Unsupported method '{}'", method)));
    }
    reqwest::Method::from_bytes(method.as_bytes())
        .map_err(|e| HttpError::new(format!("Unsupported method '{}': {}", method, e)))
}

fn multipart_form(
    fields: Vec<(String, String)>,
    files: Vec<FilePart>,
) -> std::result::Result<Form, HttpError> {
    let mut form = Form::new();
    for (name, value) in fields {
        form = form.text(name, value);
    }
    for file in files {
        let part = Part::bytes(file.contents)
            .file_name(file.file_name)
            .mime_str(&file.mime)?;
        form = form.part(file.field, part);
    }
    Ok(form)
}

/// Lower-cased names; repeated headers are joined with `", "`
fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut collected = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        match collected.entry(name.as_str().to_string()) {
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
            Entry::Occupied(mut entry) => {
                let joined: &mut String = entry.get_mut();
                joined.push_str(", ");
                joined.push_str(&value);
            }
        }
    }
    collected
}

fn decode_content(
    headers: &BTreeMap<String, String>,
    bytes: &[u8],
) -> std::result::Result<String, HttpError> {
    // HEAD, 204 and 304 replies may carry the header without a body
    if bytes.is_empty() {
        return Ok(String::new());
    }

    let encoding = headers
        .get(ORIGINAL_CONTENT_ENCODING)
        .map(|e| e.trim().to_ascii_lowercase());

    let decoded = match encoding.as_deref() {
        Some("gzip") => inflate(GzDecoder::new(bytes), "gzip")?,
        Some("deflate") => {
            inflate(ZlibDecoder::new(bytes), "deflate")
                .or_else(|_| inflate(DeflateDecoder::new(bytes), "deflate"))?
        }
        _ => bytes.to_vec(),
    };

    Ok(String::from_utf8_lossy(&decoded).into_owned())
}

fn inflate(mut decoder: impl Read, encoding: &str) -> std::result::Result<Vec<u8>, HttpError> {
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| HttpError::new(format!("Cannot decode {} body: {}", encoding, e)))?;
    Ok(out)
}

// rest-client/src/response.rs
use crate::error::Result;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

/// Error tier derived from the status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusClass {
    #[default]
    Ok,
    ClientError,
    ServerError,
}

impl StatusClass {
    /// Client error is `400..499` and server error is `500..520` or 0.
    ///
    /// 499 falls in neither tier. The gap is kept for compatibility with
    /// existing callers that branch on these flags.
    pub fn classify(status_code: u16) -> Self {
        match status_code {
            0 => StatusClass::ServerError,
            400..=498 => StatusClass::ClientError,
            500..=519 => StatusClass::ServerError,
            _ => StatusClass::Ok,
        }
    }
}

/// Normalized result of a request, filled once by the transport.
///
/// A status code of 0 marks a transport failure; `content` then holds
/// the failure description.
#[derive(Debug, Clone, Default)]
pub struct Response {
    status_code: u16,
    class: StatusClass,
    headers: BTreeMap<String, String>,
    content: String,
}

impl Response {
    /// Empty response; not classified until a status code is set
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status_code(&mut self, status_code: u16) -> &mut Self {
        self.status_code = status_code;
        self.class = StatusClass::classify(status_code);
        self
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Replace all headers; keys are lower-cased
    pub fn set_headers<K, V>(&mut self, headers: impl IntoIterator<Item = (K, V)>) -> &mut Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        self.headers = headers
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_ascii_lowercase(), v.into()))
            .collect();
        self
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Case-insensitive lookup returning `default` when absent
    pub fn header(&self, name: &str, default: &str) -> String {
        self.headers
            .get(&name.to_ascii_lowercase())
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    pub fn set_content(&mut self, content: impl Into<String>) -> &mut Self {
        self.content = content.into();
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// `content-type` without parameters, empty when absent
    pub fn content_type(&self) -> String {
        let content_type = self.header("content-type", "");
        match content_type.split_once(';') {
            Some((media_type, _)) => media_type.trim().to_string(),
            None => content_type,
        }
    }

    /// Deserialize `content` as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.content)?)
    }

    pub fn status_class(&self) -> StatusClass {
        self.class
    }

    pub fn is_error(&self) -> bool {
        self.class != StatusClass::Ok
    }

    pub fn is_client_error(&self) -> bool {
        self.class == StatusClass::ClientError
    }

    pub fn is_server_error(&self) -> bool {
        self.class == StatusClass::ServerError
    }

    /// Populate as a transport-level failure
    pub fn fail(&mut self, message: impl Into<String>) -> &mut Self {
        self.set_status_code(0)
            .set_headers(Vec::<(String, String)>::new())
            .set_content(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn with_status(code: u16) -> Response {
        let mut resp = Response::new();
        resp.set_status_code(code);
        resp
    }

    #[test]
    fn test_new_is_unclassified() {
        let resp = Response::new();
        assert_eq!(resp.status_code(), 0);
        assert!(!resp.is_error());
        assert!(resp.content().is_empty());
    }

    #[test]
    fn test_success_is_not_error() {
        for code in [200, 201, 204, 301, 399] {
            let resp = with_status(code);
            assert!(!resp.is_error(), "{}", code);
            assert!(!resp.is_client_error());
            assert!(!resp.is_server_error());
        }
    }

    #[test]
    fn test_client_error() {
        let resp = with_status(404);
        assert!(resp.is_error());
        assert!(resp.is_client_error());
        assert!(!resp.is_server_error());

        assert!(with_status(400).is_client_error());
        assert!(with_status(498).is_client_error());
    }

    #[test]
    fn test_server_error() {
        let resp = with_status(500);
        assert!(resp.is_error());
        assert!(resp.is_server_error());
        assert!(!resp.is_client_error());

        assert!(with_status(519).is_server_error());
        assert!(!with_status(520).is_error());
    }

    #[test]
    fn test_status_zero_is_server_error() {
        let resp = with_status(0);
        assert!(resp.is_error());
        assert!(resp.is_server_error());
    }

    #[test]
    fn test_499_is_neither_tier() {
        let resp = with_status(499);
        assert!(!resp.is_client_error());
        assert!(!resp.is_server_error());
        assert!(!resp.is_error());
    }

    #[test]
    fn test_classification_recomputed() {
        let mut resp = with_status(500);
        resp.set_status_code(200);
        assert!(!resp.is_error());
        assert_eq!(resp.status_class(), StatusClass::Ok);
    }

    #[test]
    fn test_headers_case_insensitive() {
        let mut resp = Response::new();
        resp.set_headers([("Content-Type", "text/html"), ("X-Request-Id", "abc")]);
        assert_eq!(resp.header("content-type", ""), "text/html");
        assert_eq!(resp.header("x-request-id", ""), "abc");
        assert_eq!(resp.header("X-Missing", "fallback"), "fallback");
        assert!(resp.headers().contains_key("x-request-id"));
    }

    #[test]
    fn test_content_type_strips_parameters() {
        let mut resp = Response::new();
        resp.set_headers([("content-type", "application/json; charset=utf-8")]);
        assert_eq!(resp.content_type(), "application/json");

        resp.set_headers([("content-type", "text/plain")]);
        assert_eq!(resp.content_type(), "text/plain");

        resp.set_headers(Vec::<(String, String)>::new());
        assert_eq!(resp.content_type(), "");
    }

    #[test]
    fn test_fail_populates_transport_failure() {
        let mut resp = with_status(200);
        resp.set_headers([("a", "b")]);
        resp.fail("connection refused");
        assert_eq!(resp.status_code(), 0);
        assert!(resp.headers().is_empty());
        assert_eq!(resp.content(), "connection refused");
        assert!(resp.is_server_error());
    }

    #[test]
    fn test_json_content() {
        #[derive(Deserialize)]
        struct Item {
            id: u32,
        }

        let mut resp = with_status(200);
        resp.set_content(r#"{"id": 7}"#);
        let item: Item = resp.json().unwrap();
        assert_eq!(item.id, 7);

        resp.set_content("not json");
        assert!(resp.json::<Item>().is_err());
    }
}

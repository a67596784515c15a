// rest-client/src/body.rs
use crate::error::Result;
use crate::request::{Request, METHOD_DELETE, METHOD_GET, METHOD_HEAD};
use std::path::Path;

const JSON_CONTENT_TYPE: &str = "application/json";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const OCTET_STREAM: &str = "application/octet-stream";

/// One file attachment of a multipart body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub contents: Vec<u8>,
}

impl FilePart {
    /// Read the whole file and sniff its content type from the bytes.
    ///
    /// The file handle is released before this returns.
    pub fn read(field: &str, path: &Path) -> Result<Self> {
        let contents = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime = sniff_mime(&contents, path);
        Ok(Self {
            field: field.to_string(),
            file_name,
            mime,
            contents,
        })
    }
}

/// Content type from magic bytes, then from the extension
fn sniff_mime(contents: &[u8], path: &Path) -> String {
    if let Some(kind) = infer::get(contents) {
        return kind.mime_type().to_string();
    }
    mime_guess::from_path(path)
        .first()
        .map(|m| m.to_string())
        .unwrap_or_else(|| OCTET_STREAM.to_string())
}

/// Body chosen for a request, in strict priority order:
/// no body for HEAD/GET/DELETE, then multipart when files are attached,
/// then the raw body, then structured data as JSON or a URL-encoded form.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Multipart {
        fields: Vec<(String, String)>,
        files: Vec<FilePart>,
    },
    Raw(String),
    Json(String),
    Form(String),
}

impl RequestBody {
    pub fn negotiate(request: &Request) -> Result<Self> {
        let method = request.method();
        if [METHOD_HEAD, METHOD_GET, METHOD_DELETE].contains(&method) {
            return Ok(RequestBody::Empty);
        }

        if !request.files().is_empty() {
            let fields = request
                .data()
                .iter()
                .map(|(k, v)| (k.clone(), v.to_string()))
                .collect();
            let files = request
                .files()
                .iter()
                .map(|(field, path)| FilePart::read(field, path))
                .collect::<Result<Vec<_>>>()?;
            return Ok(RequestBody::Multipart { fields, files });
        }

        if !request.data_raw().is_empty() {
            return Ok(RequestBody::Raw(request.data_raw().to_string()));
        }

        if !request.data().is_empty() {
            let is_json = request
                .header("content-type")
                .is_some_and(|ct| ct.trim().starts_with(JSON_CONTENT_TYPE));
            if is_json {
                return Ok(RequestBody::Json(serde_json::to_string(request.data())?));
            }
            return Ok(RequestBody::Form(serde_urlencoded::to_string(request.data())?));
        }

        Ok(RequestBody::Empty)
    }

    /// Content type to send when the caller set none.
    ///
    /// Multipart bodies get theirs, with the boundary, from the engine.
    pub fn default_content_type(&self) -> Option<&'static str> {
        match self {
            RequestBody::Json(_) => Some(JSON_CONTENT_TYPE),
            RequestBody::Form(_) => Some(FORM_CONTENT_TYPE),
            _ => None,
        }
    }

    /// Short label used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            RequestBody::Empty => "empty",
            RequestBody::Multipart { .. } => "multipart",
            RequestBody::Raw(_) => "raw",
            RequestBody::Json(_) => "json",
            RequestBody::Form(_) => "form",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

    fn post() -> Request {
        let mut req = Request::new("https://api.example.com").unwrap();
        req.set_method("POST");
        req
    }

    fn temp_file(suffix: &str, contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    #[test]
    fn test_bodyless_methods_ignore_data() {
        let file = temp_file(".txt", b"hello");
        for method in ["GET", "HEAD", "DELETE"] {
            let mut req = post();
            req.set_method(method)
                .add_data("a", 1)
                .set_data_raw("raw")
                .add_file("f", file.path())
                .unwrap();
            assert_eq!(RequestBody::negotiate(&req).unwrap(), RequestBody::Empty);
        }
    }

    #[test]
    fn test_files_win_over_raw() {
        let file = temp_file(".txt", b"hello");
        let mut req = post();
        req.set_data_raw("raw body")
            .add_data("title", "doc")
            .add_file("attachment", file.path())
            .unwrap();

        match RequestBody::negotiate(&req).unwrap() {
            RequestBody::Multipart { fields, files } => {
                assert_eq!(fields, vec![("title".to_string(), "doc".to_string())]);
                assert_eq!(files.len(), 1);
                assert_eq!(files[0].field, "attachment");
                assert_eq!(files[0].contents, b"hello");
                assert!(files[0].file_name.ends_with(".txt"));
            }
            other => panic!("Expected multipart, got {:?}", other),
        }
    }

    #[test]
    fn test_raw_wins_over_data() {
        let mut req = post();
        req.add_data("a", 1).set_data_raw("<xml/>");
        assert_eq!(
            RequestBody::negotiate(&req).unwrap(),
            RequestBody::Raw("<xml/>".to_string())
        );
    }

    #[test]
    fn test_raw_has_no_default_content_type() {
        assert_eq!(RequestBody::Raw("x".into()).default_content_type(), None);
    }

    #[test]
    fn test_data_as_json_when_content_type_is_json() {
        let mut req = post();
        req.add_header("Content-Type", "application/json; charset=utf-8")
            .add_data("name", "rust")
            .add_data("n", 2);
        assert_eq!(
            RequestBody::negotiate(&req).unwrap(),
            RequestBody::Json(r#"{"n":2,"name":"rust"}"#.to_string())
        );
    }

    #[test]
    fn test_data_as_form_otherwise() {
        let mut req = post();
        req.add_data("name", "a b").add_data("n", 2);
        let body = RequestBody::negotiate(&req).unwrap();
        assert_eq!(body, RequestBody::Form("n=2&name=a+b".to_string()));
        assert_eq!(body.default_content_type(), Some(FORM_CONTENT_TYPE));

        req.add_header("content-type", "text/plain");
        assert_eq!(
            RequestBody::negotiate(&req).unwrap(),
            RequestBody::Form("n=2&name=a+b".to_string())
        );
    }

    #[test]
    fn test_nothing_populated_is_empty() {
        let mut req = post();
        assert_eq!(RequestBody::negotiate(&req).unwrap(), RequestBody::Empty);
        req.set_method("PUT");
        assert_eq!(RequestBody::negotiate(&req).unwrap().kind(), "empty");
    }

    #[test]
    fn test_mime_sniffed_from_contents() {
        let file = temp_file(".txt", PNG_MAGIC);
        let part = FilePart::read("image", file.path()).unwrap();
        assert_eq!(part.mime, "image/png");
    }

    #[test]
    fn test_mime_falls_back_to_extension() {
        let file = temp_file(".json", b"{\"a\":1}");
        let part = FilePart::read("doc", file.path()).unwrap();
        assert_eq!(part.mime, "application/json");

        let file = temp_file(".unknownext", b"plain bytes");
        let part = FilePart::read("doc", file.path()).unwrap();
        assert_eq!(part.mime, OCTET_STREAM);
    }

    #[test]
    fn test_file_removed_after_add_fails_at_negotiation() {
        let file = temp_file(".txt", b"hello");
        let mut req = post();
        req.add_file("f", file.path()).unwrap();
        drop(file);
        assert!(RequestBody::negotiate(&req).is_err());
    }
}

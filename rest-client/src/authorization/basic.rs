// rest-client/src/authorization/basic.rs
use super::{AuthorizationStrategy, HeaderFormat};
use crate::error::Result;
use base64::prelude::*;

/// Default name prefix for HTTP Basic credentials
pub const DEFAULT_BASIC_NAME: &str = "Basic";

/// HTTP Basic credentials, `Basic base64(username:password)`.
///
/// The value is always derived from the credentials and the name is always
/// rendered, so `set_value` and `include_name` have no effect on the header.
#[derive(Debug, Clone)]
pub struct BasicAuthorization {
    username: String,
    password: String,
    format: HeaderFormat,
}

impl BasicAuthorization {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            format: HeaderFormat::new(DEFAULT_BASIC_NAME),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    fn credential(&self) -> String {
        BASE64_STANDARD.encode(format!("{}:{}", self.username, self.password))
    }
}

impl AuthorizationStrategy for BasicAuthorization {
    fn format(&self) -> &HeaderFormat {
        &self.format
    }

    fn format_mut(&mut self) -> &mut HeaderFormat {
        &mut self.format
    }

    fn set_value(&mut self, _value: &str) -> &mut Self {
        self
    }

    fn content(&self) -> Result<String> {
        Ok(format!(
            "{}{}{}",
            self.format.name,
            self.format.separator,
            self.credential()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_content() {
        let auth = BasicAuthorization::new("user", "pass");
        assert_eq!(auth.username(), "user");
        let expected = format!("Basic {}", BASE64_STANDARD.encode("user:pass"));
        assert_eq!(auth.content().unwrap(), expected);
        assert_eq!(auth.content().unwrap(), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_basic_empty_password() {
        let auth = BasicAuthorization::new("user", "");
        assert_eq!(auth.content().unwrap(), "Basic dXNlcjo=");
    }

    #[test]
    fn test_basic_always_renders_name() {
        let mut auth = BasicAuthorization::new("user", "pass");
        auth.include_name(false).set_value("ignored");
        assert_eq!(auth.content().unwrap(), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_basic_custom_name_and_separator() {
        let mut auth = BasicAuthorization::new("user", "pass");
        auth.set_name("Creds").set_separator("=");
        assert_eq!(auth.content().unwrap(), "Creds=dXNlcjpwYXNz");
    }
}

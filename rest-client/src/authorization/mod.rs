// rest-client/src/authorization/mod.rs
//! Producers of the `authorization` header value.
//!
//! Every strategy renders `name + separator + value`, or the bare value
//! when the name is excluded. The variants differ only in where the value
//! comes from: base64 credentials, a literal token, or a freshly signed JWT.

mod basic;
mod bearer;
mod jwt;

use crate::error::Result;

pub use basic::BasicAuthorization;
pub use bearer::BearerStringAuthorization;
pub use jwt::{JsonWebTokenSigner, JwtAuthorization, TokenSigner, DEFAULT_JWT_EXPIRES_IN};

/// Default authorization header name prefix
pub const DEFAULT_NAME: &str = "Bearer";

/// Default separator between name and value
pub const DEFAULT_SEPARATOR: &str = " ";

/// Name, separator and include-name flag shared by all strategies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFormat {
    pub name: String,
    pub separator: String,
    pub include_name: bool,
}

impl HeaderFormat {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn render(&self, value: &str) -> String {
        if self.include_name {
            format!("{}{}{}", self.name, self.separator, value)
        } else {
            value.to_string()
        }
    }
}

impl Default for HeaderFormat {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
            include_name: true,
        }
    }
}

/// Common contract of an authorization header strategy.
///
/// Setters return the strategy for chaining. `content` is the final
/// header value.
pub trait AuthorizationStrategy {
    fn format(&self) -> &HeaderFormat;

    fn format_mut(&mut self) -> &mut HeaderFormat;

    /// Replace the value part of the header
    fn set_value(&mut self, value: &str) -> &mut Self;

    fn content(&self) -> Result<String>;

    fn set_name(&mut self, name: &str) -> &mut Self {
        self.format_mut().name = name.to_string();
        self
    }

    fn set_separator(&mut self, separator: &str) -> &mut Self {
        self.format_mut().separator = separator.to_string();
        self
    }

    fn include_name(&mut self, flag: bool) -> &mut Self {
        self.format_mut().include_name = flag;
        self
    }
}

/// Closed set of strategies a [`Request`](crate::Request) can own
#[derive(Debug, Clone)]
pub enum Authorization {
    Basic(BasicAuthorization),
    Bearer(BearerStringAuthorization),
    Jwt(JwtAuthorization),
}

impl AuthorizationStrategy for Authorization {
    fn format(&self) -> &HeaderFormat {
        match self {
            Authorization::Basic(a) => a.format(),
            Authorization::Bearer(a) => a.format(),
            Authorization::Jwt(a) => a.format(),
        }
    }

    fn format_mut(&mut self) -> &mut HeaderFormat {
        match self {
            Authorization::Basic(a) => a.format_mut(),
            Authorization::Bearer(a) => a.format_mut(),
            Authorization::Jwt(a) => a.format_mut(),
        }
    }

    fn set_value(&mut self, value: &str) -> &mut Self {
        match self {
            Authorization::Basic(a) => {
                a.set_value(value);
            }
            Authorization::Bearer(a) => {
                a.set_value(value);
            }
            Authorization::Jwt(a) => {
                a.set_value(value);
            }
        }
        self
    }

    fn content(&self) -> Result<String> {
        match self {
            Authorization::Basic(a) => a.content(),
            Authorization::Bearer(a) => a.content(),
            Authorization::Jwt(a) => a.content(),
        }
    }
}

impl From<BasicAuthorization> for Authorization {
    fn from(value: BasicAuthorization) -> Self {
        Authorization::Basic(value)
    }
}

impl From<BearerStringAuthorization> for Authorization {
    fn from(value: BearerStringAuthorization) -> Self {
        Authorization::Bearer(value)
    }
}

impl From<JwtAuthorization> for Authorization {
    fn from(value: JwtAuthorization) -> Self {
        Authorization::Jwt(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_format_render() {
        let mut format = HeaderFormat::default();
        assert_eq!(format.render("abc"), "Bearer abc");

        format.separator = ":".to_string();
        assert_eq!(format.render("abc"), "Bearer:abc");

        format.include_name = false;
        assert_eq!(format.render("abc"), "abc");
    }

    #[test]
    fn test_enum_delegates_setters() {
        let mut auth: Authorization = BearerStringAuthorization::new("tok").into();
        auth.set_name("Token").set_separator("=");
        assert_eq!(auth.content().unwrap(), "Token=tok");

        auth.set_value("other");
        assert_eq!(auth.content().unwrap(), "Token=other");
    }

    #[test]
    fn test_enum_basic_variant() {
        let auth: Authorization = BasicAuthorization::new("user", "pass").into();
        assert_eq!(auth.format().name, "Basic");
        assert_eq!(auth.content().unwrap(), "Basic dXNlcjpwYXNz");
    }
}

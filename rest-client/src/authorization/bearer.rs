// rest-client/src/authorization/bearer.rs
use super::{AuthorizationStrategy, HeaderFormat};
use crate::error::Result;

/// Literal token rendered as `Bearer <token>`
#[derive(Debug, Clone)]
pub struct BearerStringAuthorization {
    value: String,
    format: HeaderFormat,
}

impl BearerStringAuthorization {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            format: HeaderFormat::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.format.name = name.into();
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.format.separator = separator.into();
        self
    }

    pub fn with_include_name(mut self, flag: bool) -> Self {
        self.format.include_name = flag;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl AuthorizationStrategy for BearerStringAuthorization {
    fn format(&self) -> &HeaderFormat {
        &self.format
    }

    fn format_mut(&mut self) -> &mut HeaderFormat {
        &mut self.format
    }

    fn set_value(&mut self, value: &str) -> &mut Self {
        self.value = value.to_string();
        self
    }

    fn content(&self) -> Result<String> {
        Ok(self.format.render(&self.value))
    }
}

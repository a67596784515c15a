// rest-client/src/authorization/jwt.rs
use super::{AuthorizationStrategy, HeaderFormat};
use crate::error::{Error, Result};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Default token lifetime in seconds
pub const DEFAULT_JWT_EXPIRES_IN: i64 = 30;

/// Produces a compact signed token from a claim set and a secret
pub trait TokenSigner: fmt::Debug + Send + Sync {
    fn sign(&self, claims: &Map<String, Value>, secret: &str) -> Result<String>;
}

/// [`TokenSigner`] backed by `jsonwebtoken`.
///
/// HMAC algorithms use the secret as raw key bytes. RSA, ECDSA and EdDSA
/// algorithms expect the secret to be a PEM encoded private key.
#[derive(Debug, Clone, Copy)]
pub struct JsonWebTokenSigner {
    algorithm: Algorithm,
}

impl JsonWebTokenSigner {
    pub fn new(algorithm: Algorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn encoding_key(&self, secret: &str) -> Result<EncodingKey> {
        let key = match self.algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
                if secret.is_empty() {
                    return Err(Error::Signing(format!(
                        "empty secret for {:?}",
                        self.algorithm
                    )));
                }
                EncodingKey::from_secret(secret.as_bytes())
            }
            Algorithm::RS256
            | Algorithm::RS384
            | Algorithm::RS512
            | Algorithm::PS256
            | Algorithm::PS384
            | Algorithm::PS512 => EncodingKey::from_rsa_pem(secret.as_bytes())?,
            Algorithm::ES256 | Algorithm::ES384 => EncodingKey::from_ec_pem(secret.as_bytes())?,
            Algorithm::EdDSA => EncodingKey::from_ed_pem(secret.as_bytes())?,
        };
        Ok(key)
    }
}

impl Default for JsonWebTokenSigner {
    fn default() -> Self {
        Self::new(Algorithm::HS256)
    }
}

impl TokenSigner for JsonWebTokenSigner {
    fn sign(&self, claims: &Map<String, Value>, secret: &str) -> Result<String> {
        let key = self.encoding_key(secret)?;
        Ok(jsonwebtoken::encode(&Header::new(self.algorithm), claims, &key)?)
    }
}

/// Signed token generated on first use and reused afterwards.
///
/// The claim set is `iss`, `iat`, `nbf`, `exp` followed by the extra claims,
/// which may override the registered ones.
#[derive(Debug, Clone)]
pub struct JwtAuthorization {
    key: String,
    secret: String,
    extra_claims: Map<String, Value>,
    expires_in: i64,
    signer: Arc<dyn TokenSigner>,
    format: HeaderFormat,
    token: OnceLock<String>,
}

impl JwtAuthorization {
    /// `key` becomes the issuer claim, `secret` signs the token
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
            extra_claims: Map::new(),
            expires_in: DEFAULT_JWT_EXPIRES_IN,
            signer: Arc::new(JsonWebTokenSigner::default()),
            format: HeaderFormat::default(),
            token: OnceLock::new(),
        }
    }

    pub fn with_extra_claims(mut self, claims: Map<String, Value>) -> Self {
        self.extra_claims = claims;
        self
    }

    pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra_claims.insert(name.into(), value.into());
        self
    }

    pub fn with_expires_in(mut self, seconds: i64) -> Self {
        self.expires_in = seconds;
        self
    }

    pub fn with_algorithm(self, algorithm: Algorithm) -> Self {
        self.with_signer(JsonWebTokenSigner::new(algorithm))
    }

    pub fn with_signer(mut self, signer: impl TokenSigner + 'static) -> Self {
        self.signer = Arc::new(signer);
        self
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

    /// Token issued so far, if any
    pub fn token(&self) -> Option<&str> {
        self.token.get().map(String::as_str)
    }

    fn claims(&self, now: i64) -> Map<String, Value> {
        let mut claims = Map::new();
        claims.insert("iss".to_string(), Value::from(self.key.as_str()));
        claims.insert("iat".to_string(), Value::from(now));
        claims.insert("nbf".to_string(), Value::from(now));
        claims.insert("exp".to_string(), Value::from(now + self.expires_in));
        for (name, value) in &self.extra_claims {
            claims.insert(name.clone(), value.clone());
        }
        claims
    }

    fn issue(&self) -> Result<String> {
        let now = chrono::Utc::now().timestamp();
        let token = self.signer.sign(&self.claims(now), &self.secret)?;
        tracing::trace!(issuer = %self.key, expires_at = now + self.expires_in, "issued JWT");
        Ok(token)
    }
}

impl AuthorizationStrategy for JwtAuthorization {
    fn format(&self) -> &HeaderFormat {
        &self.format
    }

    fn format_mut(&mut self) -> &mut HeaderFormat {
        &mut self.format
    }

    /// Inject an externally issued token; an empty value re-enables signing
    fn set_value(&mut self, value: &str) -> &mut Self {
        self.token = OnceLock::new();
        if !value.is_empty() {
            let _ = self.token.set(value.to_string());
        }
        self
    }

    fn content(&self) -> Result<String> {
        if let Some(token) = self.token.get() {
            return Ok(self.format.render(token));
        }
        let issued = self.issue()?;
        Ok(self.format.render(self.token.get_or_init(|| issued)))
    }
}

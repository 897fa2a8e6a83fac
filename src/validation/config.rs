//! Client configuration and its validators.

use crate::iam_api::jwt::{parse_algorithm, validate_token};
use crate::iam_api::types::IamError;
use jsonwebtoken::Algorithm;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Hosts the client is permitted to talk to (port suffix ignored)
pub const ALLOWED_HOSTS: &[&str] = &[
    "localhost",
    "127.0.0.1",
    "auth.edirepository.org",
    "auth-s.edirepository.org",
    "auth-d.edirepository.org",
];

/// Per-request transport timeout used unless overridden
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// URL scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response representation requested from the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptType {
    Json,
    Xml,
}

impl AcceptType {
    /// MIME string sent in the `Accept-Type` header
    pub fn mime(self) -> &'static str {
        match self {
            AcceptType::Json => "application/json",
            AcceptType::Xml => "application/xml",
        }
    }
}

impl fmt::Display for AcceptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

/// How server certificates are verified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrustStore {
    /// Built-in root certificates
    System,
    /// PEM bundle whose certificates replace the built-in roots
    File(PathBuf),
}

pub fn validate_scheme(scheme: &str) -> Result<Scheme, IamError> {
    match scheme.to_ascii_lowercase().as_str() {
        "http" => Ok(Scheme::Http),
        "https" => Ok(Scheme::Https),
        _ => Err(IamError::InvalidScheme(format!(
            "scheme '{}' should be 'http' or 'https'",
            scheme
        ))),
    }
}

/// Accepts `host` or `host:port` when `host` is in [`ALLOWED_HOSTS`]
pub fn validate_host(host: &str) -> Result<String, IamError> {
    let hostname = host.split(':').next().unwrap_or_default();
    if !ALLOWED_HOSTS.contains(&hostname) {
        return Err(IamError::InvalidHost(format!(
            "'{}' must be one of '{}'",
            host,
            ALLOWED_HOSTS.join(", ")
        )));
    }
    Ok(host.to_string())
}

pub fn validate_accept(accept: &str) -> Result<AcceptType, IamError> {
    match accept.to_ascii_lowercase().as_str() {
        "json" => Ok(AcceptType::Json),
        "xml" => Ok(AcceptType::Xml),
        _ => Err(IamError::InvalidAccept(format!(
            "'{}' must be 'json' or 'xml'",
            accept
        ))),
    }
}

pub fn validate_public_key_path(public_key_path: impl AsRef<Path>) -> Result<PathBuf, IamError> {
    let path = public_key_path.as_ref();
    if path.is_file() {
        Ok(path.to_path_buf())
    } else {
        Err(IamError::InvalidPublicKey(format!(
            "Public key file '{}' does not exist",
            path.display()
        )))
    }
}

pub fn validate_truststore(truststore: Option<&Path>) -> Result<TrustStore, IamError> {
    match truststore {
        None => Ok(TrustStore::System),
        Some(path) if path.is_file() => Ok(TrustStore::File(path.to_path_buf())),
        Some(path) => Err(IamError::InvalidParameter(format!(
            "Truststore file '{}' does not exist",
            path.display()
        ))),
    }
}

pub fn validate_timeout(timeout: Duration) -> Result<Duration, IamError> {
    if timeout.is_zero() {
        return Err(IamError::InvalidParameter(
            "Timeout must be greater than zero".to_string(),
        ));
    }
    Ok(timeout)
}

/// Validated client configuration
///
/// Every field is checked on construction, and every setter runs the same
/// check before assigning, so a `ClientConfig` never holds an invalid value.
/// A failed setter leaves the previous value untouched.
///
/// # Example
///
/// ```no_run
/// use iam_sdk::ClientConfig;
///
/// let config = ClientConfig::new(
///     "https",
///     "auth.edirepository.org",
///     "json",
///     "./public_key.pem",
///     "ES256",
///     "eyJhbGci...",
/// )?
/// .with_truststore("./truststore.pem")?;
/// # Ok::<(), iam_sdk::IamError>(())
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    scheme: Scheme,
    host: String,
    accept: AcceptType,
    public_key_path: PathBuf,
    algorithm: Algorithm,
    token: String,
    truststore: TrustStore,
    timeout: Duration,
}

impl ClientConfig {
    /// Validate raw client arguments, including the token signature
    pub fn new(
        scheme: &str,
        host: &str,
        accept: &str,
        public_key_path: impl AsRef<Path>,
        algorithm: &str,
        token: impl Into<String>,
    ) -> Result<Self, IamError> {
        let scheme = validate_scheme(scheme)?;
        let host = validate_host(host)?;
        let accept = validate_accept(accept)?;
        let public_key_path = validate_public_key_path(public_key_path)?;
        let algorithm = parse_algorithm(algorithm)?;
        let token = token.into();
        validate_token(&token, &public_key_path, algorithm)?;

        tracing::debug!(
            "Created IAM client config: {}://{} (accept: {})",
            scheme,
            host,
            accept
        );

        Ok(Self {
            scheme,
            host,
            accept,
            public_key_path,
            algorithm,
            token,
            truststore: TrustStore::System,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Set truststore (builder pattern)
    pub fn with_truststore(mut self, truststore: impl AsRef<Path>) -> Result<Self, IamError> {
        self.set_truststore(Some(truststore.as_ref()))?;
        Ok(self)
    }

    /// Set request timeout (builder pattern)
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, IamError> {
        self.set_timeout(timeout)?;
        Ok(self)
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn accept(&self) -> AcceptType {
        self.accept
    }

    pub fn public_key_path(&self) -> &Path {
        &self.public_key_path
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn truststore(&self) -> &TrustStore {
        &self.truststore
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `scheme://host`
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }

    pub fn set_scheme(&mut self, scheme: &str) -> Result<(), IamError> {
        self.scheme = validate_scheme(scheme)?;
        Ok(())
    }

    pub fn set_host(&mut self, host: &str) -> Result<(), IamError> {
        self.host = validate_host(host)?;
        Ok(())
    }

    pub fn set_accept(&mut self, accept: &str) -> Result<(), IamError> {
        self.accept = validate_accept(accept)?;
        Ok(())
    }

    /// Replace the key file; the held token must verify against it
    pub fn set_public_key_path(
        &mut self,
        public_key_path: impl AsRef<Path>,
    ) -> Result<(), IamError> {
        let public_key_path = validate_public_key_path(public_key_path)?;
        validate_token(&self.token, &public_key_path, self.algorithm)?;
        self.public_key_path = public_key_path;
        Ok(())
    }

    /// Replace the algorithm; the held token must verify under it
    pub fn set_algorithm(&mut self, algorithm: &str) -> Result<(), IamError> {
        let algorithm = parse_algorithm(algorithm)?;
        validate_token(&self.token, &self.public_key_path, algorithm)?;
        self.algorithm = algorithm;
        Ok(())
    }

    pub fn set_token(&mut self, token: impl Into<String>) -> Result<(), IamError> {
        let token = token.into();
        validate_token(&token, &self.public_key_path, self.algorithm)?;
        self.token = token;
        Ok(())
    }

    /// `None` restores verification against the built-in roots
    pub fn set_truststore(&mut self, truststore: Option<&Path>) -> Result<(), IamError> {
        self.truststore = validate_truststore(truststore)?;
        Ok(())
    }

    pub fn set_timeout(&mut self, timeout: Duration) -> Result<(), IamError> {
        self.timeout = validate_timeout(timeout)?;
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("accept", &self.accept)
            .field("public_key_path", &self.public_key_path)
            .field("algorithm", &self.algorithm)
            .field("token", &format_args!("<{} bytes>", self.token.len()))
            .field("truststore", &self.truststore)
            .field("timeout", &self.timeout)
            .finish()
    }
}

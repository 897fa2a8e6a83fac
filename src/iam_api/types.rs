use std::collections::HashMap;
use std::fmt;

/// IAM SDK error type
///
/// Represents everything that can go wrong while configuring a client or
/// talking to the IAM REST API. The `Invalid*` variants are raised
/// synchronously, before any network I/O takes place.
#[derive(Debug)]
pub enum IamError {
    /// Scheme is not `http` or `https`
    InvalidScheme(String),
    /// Host is not in the allow-list
    InvalidHost(String),
    /// Accept type is not `json` or `xml`
    InvalidAccept(String),
    /// Public key file is missing or does not hold a usable key
    InvalidPublicKey(String),
    /// Request parameter, truststore or timeout rejected
    InvalidParameter(String),
    /// JWT failed signature, expiry or structure checks
    InvalidToken(String),
    /// Route is not part of the IAM route grammar
    InvalidRoute(String),
    /// Route exists but does not accept the verb
    InvalidVerb(String),
    /// API request failed (transport, HTTP status, or response decoding)
    Api(ApiError),
    /// Response data was requested before any call recorded a response
    NoResponse,
}

impl IamError {
    /// HTTP status code carried by a response error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            IamError::Api(ApiError::Response { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// True when the server answered with a status other than 200
    pub fn is_response_error(&self) -> bool {
        matches!(self, IamError::Api(ApiError::Response { .. }))
    }
}

impl fmt::Display for IamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IamError::InvalidScheme(msg) => write!(f, "Invalid scheme: {}", msg),
            IamError::InvalidHost(msg) => write!(f, "Invalid host: {}", msg),
            IamError::InvalidAccept(msg) => write!(f, "Invalid accept type: {}", msg),
            IamError::InvalidPublicKey(msg) => write!(f, "Invalid public key: {}", msg),
            IamError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            IamError::InvalidToken(msg) => write!(f, "Invalid token: {}", msg),
            IamError::InvalidRoute(msg) => write!(f, "Invalid route: {}", msg),
            IamError::InvalidVerb(msg) => write!(f, "Invalid verb: {}", msg),
            IamError::Api(err) => write!(f, "API error: {}", err),
            IamError::NoResponse => write!(f, "No response has been recorded by this client"),
        }
    }
}

impl std::error::Error for IamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IamError::Api(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ApiError> for IamError {
    fn from(err: ApiError) -> Self {
        IamError::Api(err)
    }
}

/// API-specific errors
#[derive(Debug)]
pub enum ApiError {
    /// Transport failure (DNS, connect, TLS, timeout, reset)
    Request(reqwest::Error),
    /// Completed exchange with a status code other than 200
    Response {
        status: u16,
        reason: String,
        body: String,
    },
    /// Body was expected to be JSON but failed to parse
    JsonDecode(serde_json::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Request(err) => {
                if err.is_timeout() {
                    write!(f, "Request timeout: {}", err)
                } else if err.is_connect() {
                    write!(f, "Connection failed: {}", err)
                } else {
                    write!(f, "Request error: {}", err)
                }
            }
            ApiError::Response {
                status,
                reason,
                body,
            } => {
                if body.is_empty() {
                    write!(f, "HTTP {} {}", status, reason)
                } else {
                    write!(f, "HTTP {} {}: {}", status, reason, body)
                }
            }
            ApiError::JsonDecode(err) => write!(f, "JSON decode error: {}", err),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Request(err) => Some(err),
            ApiError::JsonDecode(err) => Some(err),
            ApiError::Response { .. } => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Request(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::JsonDecode(err)
    }
}

/// Transport-independent HTTP response
///
/// Snapshot of a completed exchange. Header names are stored lowercase so
/// lookups through [`Response::header`] are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status_code: u16,
    reason: String,
    headers: HashMap<String, String>,
    cookies: HashMap<String, String>,
    body: String,
}

impl Response {
    pub fn new(
        status_code: u16,
        reason: impl Into<String>,
        headers: HashMap<String, String>,
        cookies: HashMap<String, String>,
        body: impl Into<String>,
    ) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();

        Self {
            status_code,
            reason: reason.into(),
            headers,
            cookies,
            body: body.into(),
        }
    }

    /// Drain a blocking transport response into an owned snapshot
    pub(crate) fn from_transport(
        response: reqwest::blocking::Response,
    ) -> Result<Self, reqwest::Error> {
        let status = response.status();

        let mut headers: HashMap<String, String> = HashMap::new();
        for (name, value) in response.headers() {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            headers
                .entry(name.as_str().to_string())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert(value);
        }

        let cookies = response
            .cookies()
            .map(|cookie| (cookie.name().to_string(), cookie.value().to_string()))
            .collect();

        let body = response.text()?;

        Ok(Self {
            status_code: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            cookies,
            body,
        })
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn cookies(&self) -> &HashMap<String, String> {
        &self.cookies
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

use crate::iam_api::types::IamError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

/// Header fields the IAM service places in its JWT header
///
/// `iss` and `hd` are non-standard header members, so the header is
/// decoded by hand instead of through `jsonwebtoken::Header`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IamHeader {
    #[serde(default)]
    pub alg: Option<String>,
    #[serde(default)]
    pub typ: Option<String>,
    /// Issuer
    #[serde(default)]
    pub iss: Option<String>,
    /// Hosted domain
    #[serde(default)]
    pub hd: Option<String>,
}

/// Payload claims carried by an EDI IAM token
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IamClaims {
    /// Subject - EDI identifier of the profile
    #[serde(default)]
    pub sub: Option<String>,
    /// Common name
    #[serde(default)]
    pub cn: Option<String>,
    /// Given name
    #[serde(default)]
    pub gn: Option<String>,
    /// Family name (surname)
    #[serde(default)]
    pub sn: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Principals the subject may act as (groups, linked identities)
    #[serde(default)]
    pub principals: Option<Vec<String>>,
    #[serde(default, rename = "isEmailEnabled")]
    pub is_email_enabled: Option<bool>,
    #[serde(default, rename = "isEmailVerified")]
    pub is_email_verified: Option<bool>,
    #[serde(default, rename = "identityId")]
    pub identity_id: Option<i64>,
    #[serde(default, rename = "idpName")]
    pub idp_name: Option<String>,
    #[serde(default, rename = "idpUid")]
    pub idp_uid: Option<String>,
    #[serde(default, rename = "idpCName")]
    pub idp_common_name: Option<String>,
    /// Issuer, when the service puts it in the payload rather than the header
    #[serde(default)]
    pub iss: Option<String>,
    /// Hosted domain, when carried in the payload
    #[serde(default)]
    pub hd: Option<String>,
    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: Option<i64>,
    /// Not before (Unix timestamp)
    #[serde(default)]
    pub nbf: Option<i64>,
    /// Expiration time (Unix timestamp)
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub links: Option<Vec<serde_json::Value>>,
}

/// A token decoded WITHOUT signature verification
///
/// Use this only to display or audit token metadata. Nothing read from an
/// `UnverifiedToken` may be used to authorize an action; call
/// [`validate_token`] for that.
#[derive(Debug, Clone)]
pub struct UnverifiedToken {
    header: IamHeader,
    claims: IamClaims,
}

impl UnverifiedToken {
    pub fn header(&self) -> &IamHeader {
        &self.header
    }

    pub fn claims(&self) -> &IamClaims {
        &self.claims
    }

    pub fn subject(&self) -> Option<&str> {
        self.claims.sub.as_deref()
    }

    pub fn common_name(&self) -> Option<&str> {
        self.claims.cn.as_deref()
    }

    pub fn given_name(&self) -> Option<&str> {
        self.claims.gn.as_deref()
    }

    pub fn family_name(&self) -> Option<&str> {
        self.claims.sn.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.claims.email.as_deref()
    }

    pub fn principals(&self) -> &[String] {
        self.claims.principals.as_deref().unwrap_or(&[])
    }

    pub fn is_email_enabled(&self) -> Option<bool> {
        self.claims.is_email_enabled
    }

    pub fn is_email_verified(&self) -> Option<bool> {
        self.claims.is_email_verified
    }

    pub fn identity_id(&self) -> Option<i64> {
        self.claims.identity_id
    }

    pub fn idp_name(&self) -> Option<&str> {
        self.claims.idp_name.as_deref()
    }

    pub fn idp_uid(&self) -> Option<&str> {
        self.claims.idp_uid.as_deref()
    }

    pub fn idp_common_name(&self) -> Option<&str> {
        self.claims.idp_common_name.as_deref()
    }

    /// Issuer from the header, falling back to the payload
    pub fn issuer(&self) -> Option<&str> {
        self.header
            .iss
            .as_deref()
            .or(self.claims.iss.as_deref())
    }

    /// Hosted domain from the header, falling back to the payload
    pub fn hosted_domain(&self) -> Option<&str> {
        self.header.hd.as_deref().or(self.claims.hd.as_deref())
    }

    pub fn issued_at(&self) -> Option<i64> {
        self.claims.iat
    }

    pub fn not_before(&self) -> Option<i64> {
        self.claims.nbf
    }

    pub fn expiry(&self) -> Option<i64> {
        self.claims.exp
    }

    pub fn links(&self) -> &[serde_json::Value] {
        self.claims.links.as_deref().unwrap_or(&[])
    }

    pub fn issued_at_time(&self) -> Option<DateTime<Utc>> {
        self.claims.iat.and_then(|ts| DateTime::from_timestamp(ts, 0))
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.claims.exp.and_then(|ts| DateTime::from_timestamp(ts, 0))
    }

    /// Check if the token has expired. Tokens without `exp` never expire.
    pub fn is_expired(&self) -> bool {
        match self.claims.exp {
            Some(exp) => exp < Utc::now().timestamp(),
            None => false,
        }
    }
}

/// Parse a signing algorithm name such as `"ES256"`
pub fn parse_algorithm(algorithm: &str) -> Result<Algorithm, IamError> {
    Algorithm::from_str(algorithm).map_err(|_| {
        IamError::InvalidToken(format!(
            "Unsupported signing algorithm '{}'",
            algorithm
        ))
    })
}

/// Build a decoding key for the algorithm family from PEM text
///
/// HMAC algorithms are refused: the key file is public, so it cannot act
/// as a shared secret.
fn decoding_key(public_key: &[u8], algorithm: Algorithm) -> Result<DecodingKey, IamError> {
    let key = match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
            return Err(IamError::InvalidPublicKey(format!(
                "{:?} needs a shared secret, not a public key",
                algorithm
            )));
        }
        Algorithm::ES256 | Algorithm::ES384 => DecodingKey::from_ec_pem(public_key),
        Algorithm::RS256
        | Algorithm::RS384
        | Algorithm::RS512
        | Algorithm::PS256
        | Algorithm::PS384
        | Algorithm::PS512 => DecodingKey::from_rsa_pem(public_key),
        Algorithm::EdDSA => DecodingKey::from_ed_pem(public_key),
    };

    key.map_err(|e| {
        IamError::InvalidPublicKey(format!(
            "Public key is not usable with {:?}: {}",
            algorithm, e
        ))
    })
}

/// Validate a JWT against a public key file
///
/// The key file is read on every call; nothing is cached. Returns the token
/// unchanged when the signature, expiry and not-before checks pass.
///
/// # Example
///
/// ```no_run
/// use iam_sdk::{parse_algorithm, validate_token};
///
/// let algorithm = parse_algorithm("ES256")?;
/// let token = validate_token("eyJhbGci...", "./public_key.pem", algorithm)?;
/// # Ok::<(), iam_sdk::IamError>(())
/// ```
pub fn validate_token<'a>(
    token: &'a str,
    public_key_path: impl AsRef<Path>,
    algorithm: Algorithm,
) -> Result<&'a str, IamError> {
    let public_key_path = public_key_path.as_ref();
    let public_key = std::fs::read(public_key_path).map_err(|e| {
        IamError::InvalidPublicKey(format!(
            "Failed to read public key file '{}': {}",
            public_key_path.display(),
            e
        ))
    })?;

    validate_token_with_key(token, &public_key, algorithm)
}

/// Validate a JWT against in-memory PEM key material
pub fn validate_token_with_key<'a>(
    token: &'a str,
    public_key: &[u8],
    algorithm: Algorithm,
) -> Result<&'a str, IamError> {
    tracing::debug!(
        "Validating JWT token (length: {}, alg: {:?})",
        token.len(),
        algorithm
    );

    let decoding_key = decoding_key(public_key, algorithm)?;

    let mut validation = Validation::new(algorithm);
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.validate_aud = false;
    validation.required_spec_claims = HashSet::new();
    validation.leeway = 0;

    decode::<IamClaims>(token, &decoding_key, &validation).map_err(|e| {
        tracing::debug!("JWT validation failed: {}", e);
        IamError::InvalidToken(e.to_string())
    })?;

    Ok(token)
}

/// Decode a token WITHOUT verifying its signature
///
/// For reading metadata only; see [`UnverifiedToken`].
pub fn read_unverified_claims(token: &str) -> Result<UnverifiedToken, IamError> {
    let mut segments = token.split('.');
    let (header, payload) = match (segments.next(), segments.next(), segments.next()) {
        (Some(header), Some(payload), Some(_signature)) if segments.next().is_none() => {
            (header, payload)
        }
        _ => {
            return Err(IamError::InvalidToken(
                "Token must have three dot-separated segments".to_string(),
            ))
        }
    };

    Ok(UnverifiedToken {
        header: decode_segment(header, "header")?,
        claims: decode_segment(payload, "payload")?,
    })
}

fn decode_segment<T: serde::de::DeserializeOwned>(
    segment: &str,
    name: &str,
) -> Result<T, IamError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('='))
        .map_err(|e| IamError::InvalidToken(format!("Invalid JWT {} encoding: {}", name, e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| IamError::InvalidToken(format!("Invalid JWT {}: {}", name, e)))
}

//! Validation for everything the client sends.
//!
//! All checks here run before any network I/O:
//!
//! - [`config`]: scheme, host allow-list, accept type, key file, truststore, timeout
//! - [`parameters`]: request parameter whitelist and enumerated values
//! - [`routes`]: the IAM route grammar and the verbs each route accepts
//!
//! # Example
//!
//! ```
//! use iam_sdk::validation::{validate_accept, validate_host, validate_route, Verb};
//!
//! assert_eq!(validate_accept("JSON").unwrap().mime(), "application/json");
//! assert!(validate_host("auth.edirepository.org:443").is_ok());
//! assert!(validate_route("auth/v1/resource/package-1", Verb::Get).is_ok());
//! assert!(validate_route("auth/v1/resource/package-1", Verb::Post).is_err());
//! ```

pub mod config;
pub mod parameters;
pub mod routes;

pub use config::{
    validate_accept, validate_host, validate_public_key_path, validate_scheme, validate_timeout,
    validate_truststore, AcceptType, ClientConfig, Scheme, TrustStore, ALLOWED_HOSTS,
    DEFAULT_TIMEOUT,
};
pub use parameters::{validate_parameters, RequestParameters, ALLOWED_PARAMETERS};
pub use routes::{validate_route, Verb};

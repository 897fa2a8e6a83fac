//! IAM SDK
//!
//! A Rust client library for the EDI Identity and Access Management REST API.
//!
//! This SDK provides:
//! - Validated client configuration (scheme, host allow-list, accept type, public key, truststore)
//! - Local JWT verification against the IAM public key, and unverified claim inspection
//! - A blocking HTTP client that checks every route and parameter before sending
//! - Typed clients for profiles, resources, rules, groups, access, EML, API keys, EDI tokens
//!   and authorization checks
//!
//! # Example
//!
//! ```no_run
//! use iam_sdk::{
//!     ClientConfig,
//!     IamClient,
//!     Permission,
//!     ResourceClient,
//!     RuleClient,
//!     AuthorizedClient,
//! };
//!
//! # fn example() -> Result<(), iam_sdk::IamError> {
//! let config = ClientConfig::new(
//!     "https",
//!     "auth.edirepository.org",
//!     "json",
//!     "./public_key.pem",
//!     "ES256",
//!     "eyJhbGci...",
//! )?;
//! let client = IamClient::new(config);
//!
//! // Register a data package and grant a collaborator write access
//! ResourceClient::new(&client).create_resource(
//!     "https://pasta.lternet.edu/package/eml/edi/1/1",
//!     "edi.1.1",
//!     "package",
//!     None,
//! )?;
//! RuleClient::new(&client).create_rule(
//!     "https://pasta.lternet.edu/package/eml/edi/1/1",
//!     "EDI-3fa734a7cd6e40998a5c2b5486b6eced",
//!     Permission::Write,
//! )?;
//!
//! let allowed = AuthorizedClient::new(&client)
//!     .is_authorized("https://pasta.lternet.edu/package/eml/edi/1/1", Permission::Read)?;
//! # Ok(())
//! # }
//! ```

pub mod iam_api;
pub mod validation;

// Re-export commonly used types and functions
pub use iam_api::{
    client::{IamClient, RestApi},
    jwt::{
        parse_algorithm, read_unverified_claims, validate_token, validate_token_with_key,
        UnverifiedToken,
    },
    permission::Permission,
    resources::{
        AccessClient, ApiKeyClient, AuthorizedClient, EdiTokenClient, EmlClient, GroupClient,
        ProfileClient, ResourceClient, ResourceTree, RuleClient,
    },
    response::ResponseData,
    types::{ApiError, IamError, Response},
};
pub use validation::{AcceptType, ClientConfig, RequestParameters, Verb};

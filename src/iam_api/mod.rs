/// IAM REST API integration module
///
/// This module provides the blocking HTTP client, token validation, and the
/// resource-family clients built on top of it.
///
/// ## Request Flow
///
/// 1. The route is matched against the IAM route grammar and its verbs
/// 2. Parameters are checked against the whitelist; a `token` parameter is verified
/// 3. The request is sent with the caller's token in the `pasta_token` cookie
/// 4. Any status other than 200 becomes an error carrying status, reason and body
/// 5. The response is recorded and returned; resource clients normalize it by accept type
pub mod client;
pub mod jwt;
pub mod permission;
pub mod resources;
pub mod response;
pub mod types;

pub use client::{IamClient, RestApi};
pub use jwt::{
    parse_algorithm, read_unverified_claims, validate_token, validate_token_with_key,
    UnverifiedToken,
};
pub use permission::Permission;
pub use resources::*;
pub use response::ResponseData;
pub use types::{ApiError, IamError, Response};

//! JWT Validation Tests
//!
//! Tests for local token verification against the fixture ES256 key pair,
//! and unverified claim inspection.

mod common;

use common::{foreign_token, make_token, public_key_path, valid_token, ISSUER, SUBJECT};
use iam_sdk::{
    parse_algorithm, read_unverified_claims, validate_token, validate_token_with_key, IamError,
};
use jsonwebtoken::Algorithm;

// ============================================================================
// Signature Verification Tests
// ============================================================================

#[test]
fn test_valid_token_is_returned_unchanged() {
    let token = valid_token();
    let result = validate_token(&token, public_key_path(), Algorithm::ES256).unwrap();
    assert_eq!(result, token);
}

#[test]
fn test_validate_token_with_in_memory_key() {
    let token = valid_token();
    let pem = std::fs::read(public_key_path()).unwrap();
    assert!(validate_token_with_key(&token, &pem, Algorithm::ES256).is_ok());
}

#[test]
fn test_token_signed_by_other_key_is_rejected() {
    let token = foreign_token();
    let result = validate_token(&token, public_key_path(), Algorithm::ES256);
    assert!(matches!(result, Err(IamError::InvalidToken(_))));
}

#[test]
fn test_tampered_payload_is_rejected() {
    let token = valid_token();
    let mut segments: Vec<String> = token.split('.').map(str::to_string).collect();
    let other = make_token(chrono::Utc::now().timestamp() + 7200);
    segments[1] = other.split('.').nth(1).unwrap().to_string();

    let tampered = segments.join(".");
    let result = validate_token(&tampered, public_key_path(), Algorithm::ES256);
    assert!(matches!(result, Err(IamError::InvalidToken(_))));
}

#[test]
fn test_expired_token_is_rejected() {
    let token = make_token(chrono::Utc::now().timestamp() - 60);
    let err = validate_token(&token, public_key_path(), Algorithm::ES256).unwrap_err();
    assert!(matches!(err, IamError::InvalidToken(_)));
    assert!(err.to_string().to_lowercase().contains("expired"));
}

#[test]
fn test_algorithm_mismatch_is_rejected() {
    let token = valid_token();
    let result = validate_token(&token, public_key_path(), Algorithm::ES384);
    assert!(matches!(result, Err(IamError::InvalidToken(_))));
}

#[test]
fn test_missing_key_file() {
    let token = valid_token();
    let result = validate_token(&token, "/nonexistent/public_key.pem", Algorithm::ES256);
    assert!(matches!(result, Err(IamError::InvalidPublicKey(_))));
}

#[test]
fn test_garbage_token_is_rejected() {
    for token in ["", "not-a-token", "a.b.c"] {
        assert!(
            matches!(
                validate_token(token, public_key_path(), Algorithm::ES256),
                Err(IamError::InvalidToken(_))
            ),
            "'{}' should be rejected",
            token
        );
    }
}

#[test]
fn test_parse_algorithm_names() {
    assert_eq!(parse_algorithm("ES256").unwrap(), Algorithm::ES256);
    assert_eq!(parse_algorithm("RS256").unwrap(), Algorithm::RS256);
    assert!(matches!(parse_algorithm("none"), Err(IamError::InvalidToken(_))));
}

// ============================================================================
// Unverified Claims Tests
// ============================================================================

#[test]
fn test_unverified_claims_from_signed_token() {
    let claims = read_unverified_claims(&valid_token()).unwrap();

    assert_eq!(claims.subject(), Some(SUBJECT));
    assert_eq!(claims.common_name(), Some("Jane Doe"));
    assert_eq!(claims.given_name(), Some("Jane"));
    assert_eq!(claims.family_name(), Some("Doe"));
    assert_eq!(claims.email(), Some("jdoe@example.org"));
    assert_eq!(claims.principals(), ["EDI-b2757fee12634ccca40d2d689f5c0543"]);
    assert_eq!(claims.is_email_enabled(), Some(true));
    assert_eq!(claims.is_email_verified(), Some(false));
    assert_eq!(claims.identity_id(), Some(7));
    assert_eq!(claims.idp_name(), Some("google"));
    assert_eq!(claims.idp_common_name(), Some("Jane Doe"));
    assert_eq!(claims.issuer(), Some(ISSUER));
    assert_eq!(claims.hosted_domain(), Some("edirepository.org"));
    assert!(!claims.is_expired());
}

#[test]
fn test_unverified_claims_do_not_check_signature() {
    let claims = read_unverified_claims(&foreign_token()).unwrap();
    assert_eq!(claims.subject(), Some(SUBJECT));
}

#[test]
fn test_unverified_claims_report_expiry() {
    let exp = chrono::Utc::now().timestamp() - 60;
    let claims = read_unverified_claims(&make_token(exp)).unwrap();

    assert!(claims.is_expired());
    assert_eq!(claims.expiry(), Some(exp));
    assert_eq!(claims.expires_at().map(|t| t.timestamp()), Some(exp));
}


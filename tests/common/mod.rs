//! Shared fixtures for the integration tests
#![allow(dead_code)]

use iam_sdk::{ClientConfig, IamClient};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::json;
use std::path::PathBuf;

pub const SUBJECT: &str = "EDI-3fa734a7cd6e40998a5c2b5486b6eced";
pub const ISSUER: &str = "https://auth.edirepository.org";

pub fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

pub fn public_key_path() -> PathBuf {
    data_path("public_key.pem")
}

pub fn truststore_path() -> PathBuf {
    data_path("truststore.pem")
}

fn sign(claims: &serde_json::Value, private_key: &str) -> String {
    let pem = std::fs::read(data_path(private_key)).expect("read private key fixture");
    let key = EncodingKey::from_ec_pem(&pem).expect("parse private key fixture");
    encode(&Header::new(Algorithm::ES256), claims, &key).expect("sign token")
}

fn claims(exp: i64) -> serde_json::Value {
    let now = chrono::Utc::now().timestamp();
    json!({
        "sub": SUBJECT,
        "cn": "Jane Doe",
        "gn": "Jane",
        "sn": "Doe",
        "email": "jdoe@example.org",
        "principals": ["EDI-b2757fee12634ccca40d2d689f5c0543"],
        "isEmailEnabled": true,
        "isEmailVerified": false,
        "identityId": 7,
        "idpName": "google",
        "idpUid": "108446734581234567890",
        "idpCName": "Jane Doe",
        "iss": ISSUER,
        "hd": "edirepository.org",
        "iat": now,
        "nbf": now,
        "exp": exp,
    })
}

/// ES256 token signed with the fixture key, expiring at `exp`
pub fn make_token(exp: i64) -> String {
    sign(&claims(exp), "private_key.pem")
}

/// ES256 token valid for the next hour
pub fn valid_token() -> String {
    make_token(chrono::Utc::now().timestamp() + 3600)
}

/// Well-formed token signed with a key that does not match the fixture public key
pub fn foreign_token() -> String {
    let exp = chrono::Utc::now().timestamp() + 3600;
    sign(&claims(exp), "other_private_key.pem")
}

pub fn config_for(host: &str, accept: &str) -> ClientConfig {
    ClientConfig::new("http", host, accept, public_key_path(), "ES256", valid_token())
        .expect("fixture config is valid")
}

/// Client for a local mock server address such as `127.0.0.1:4321`
pub fn client_for(address: std::net::SocketAddr, accept: &str) -> IamClient {
    IamClient::new(config_for(&format!("127.0.0.1:{}", address.port()), accept))
}

/// Run a blocking client call off the async runtime
pub async fn blocking<F, T>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .expect("blocking task panicked")
}

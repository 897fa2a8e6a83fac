//! Request parameter sets and their whitelist.

use crate::iam_api::jwt::validate_token;
use crate::iam_api::permission::Permission;
use crate::iam_api::types::IamError;
use jsonwebtoken::Algorithm;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::path::Path;

/// Parameter keys accepted by the IAM REST API
pub const ALLOWED_PARAMETERS: &[&str] = &[
    "principal",           // EDI identifier or IdP identity
    "sub",                 // EDI identifier of a token subject
    "eml",                 // EML document (XML)
    "access",              // EML access element (XML)
    "resource_key",        // unique resource identifier
    "resource_label",      // non-unique resource label
    "resource_type",       // collection, package, eml, report, data, ezeml, ...
    "parent_resource_key", // resource key of the parent
    "descendants",         // flag
    "ancestors",           // flag
    "all",                 // flag
    "permission",          // read, write or changePermission
    "token",               // JWT, verified before sending
    "given_name",
    "family_name",
    "email",
    "group_name",
    "group_description",
    "key",                 // API key
    "pasta_token",
    "edi_token",
];

/// Keys whose value must be "True" or "False"
const FLAG_PARAMETERS: &[&str] = &["descendants", "ancestors", "all"];

const FLAG_VALUES: &[&str] = &["True", "False"];

/// Ordered request parameters
///
/// Serializes as a JSON object in insertion order; absent values become
/// `null`. Inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParameters {
    entries: Vec<(String, Option<String>)>,
}

impl RequestParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter (builder pattern)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, Some(value.into()));
        self
    }

    /// Add a parameter that may be absent (builder pattern)
    pub fn with_optional(
        mut self,
        key: impl Into<String>,
        value: Option<impl Into<String>>,
    ) -> Self {
        self.insert(key, value.map(Into::into));
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// `None` when the key is missing, `Some(None)` when present but absent-valued
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pairs to send as a query string; absent values are left out
    pub fn query_pairs(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(key, value)| value.as_deref().map(|value| (key.as_str(), value)))
            .collect()
    }
}

impl Serialize for RequestParameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Check keys against [`ALLOWED_PARAMETERS`] and values against their ranges
///
/// A `token` parameter is verified against the public key, which reads the
/// key file once per call.
pub fn validate_parameters(
    parameters: &RequestParameters,
    public_key_path: &Path,
    algorithm: Algorithm,
) -> Result<(), IamError> {
    for (key, value) in parameters.iter() {
        if !ALLOWED_PARAMETERS.contains(&key) {
            return Err(IamError::InvalidParameter(format!(
                "Invalid keyword argument '{}'",
                key
            )));
        }

        if FLAG_PARAMETERS.contains(&key) && !value.is_some_and(|v| FLAG_VALUES.contains(&v)) {
            return Err(IamError::InvalidParameter(format!(
                "Invalid keyword argument for '{}': value '{}' must be True or False",
                key,
                value.unwrap_or("null")
            )));
        }

        if key == "permission" {
            let permission = value.and_then(Permission::from_wire);
            if !matches!(
                permission,
                Some(Permission::Read | Permission::Write | Permission::ChangePermission)
            ) {
                return Err(IamError::InvalidParameter(format!(
                    "Invalid keyword argument for 'permission': value '{}' must be 'read', 'write', or 'changePermission'",
                    value.unwrap_or("null")
                )));
            }
        }

        if key == "token" {
            let token = value.ok_or_else(|| {
                IamError::InvalidParameter("Keyword argument 'token' must not be null".to_string())
            })?;
            validate_token(token, public_key_path, algorithm)?;
        }
    }

    tracing::debug!("Validated {} request parameters", parameters.len());
    Ok(())
}

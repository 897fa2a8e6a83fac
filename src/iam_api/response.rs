use crate::iam_api::types::{ApiError, IamError, Response};
use crate::validation::AcceptType;

/// Response body shaped by the client's accept type
///
/// JSON responses are parsed; XML responses are handed back as text for
/// the caller to parse.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseData {
    Json(serde_json::Value),
    Text(String),
}

impl ResponseData {
    /// Normalize a response body according to `accept`
    pub fn from_response(response: &Response, accept: AcceptType) -> Result<Self, IamError> {
        match accept {
            AcceptType::Json => serde_json::from_str(response.body())
                .map(ResponseData::Json)
                .map_err(|e| {
                    tracing::error!("Failed to parse JSON response body: {}", e);
                    IamError::Api(ApiError::JsonDecode(e))
                }),
            AcceptType::Xml => Ok(ResponseData::Text(response.body().to_string())),
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ResponseData::Json(value) => Some(value),
            ResponseData::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseData::Text(text) => Some(text),
            ResponseData::Json(_) => None,
        }
    }

    pub fn into_json(self) -> Option<serde_json::Value> {
        match self {
            ResponseData::Json(value) => Some(value),
            ResponseData::Text(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn ok_response(body: &str) -> Response {
        Response::new(200, "OK", HashMap::new(), HashMap::new(), body)
    }

    #[test]
    fn test_json_accept_parses_body() {
        let response = ok_response(r#"{"CREATE_RESOURCE": "OK"}"#);
        let data = ResponseData::from_response(&response, AcceptType::Json).unwrap();

        assert_eq!(data, ResponseData::Json(json!({"CREATE_RESOURCE": "OK"})));
        assert_eq!(data.as_json().unwrap()["CREATE_RESOURCE"], "OK");
        assert!(data.as_text().is_none());
    }

    #[test]
    fn test_xml_accept_returns_body_verbatim() {
        let response = ok_response(r#"{"CREATE_RESOURCE": "OK"}"#);
        let data = ResponseData::from_response(&response, AcceptType::Xml).unwrap();

        assert_eq!(
            data,
            ResponseData::Text(r#"{"CREATE_RESOURCE": "OK"}"#.to_string())
        );
        assert!(data.into_json().is_none());
    }

    #[test]
    fn test_invalid_json_is_a_decode_error() {
        let response = ok_response("<resource>xml</resource>");
        let result = ResponseData::from_response(&response, AcceptType::Json);

        assert!(matches!(
            result,
            Err(IamError::Api(ApiError::JsonDecode(_)))
        ));
    }

    #[test]
    fn test_json_scalar_body() {
        let response = ok_response(r#""EDI-3fa734a7cd6e40998a5c2b5486b6eced""#);
        let data = ResponseData::from_response(&response, AcceptType::Json).unwrap();

        assert_eq!(
            data.as_json().and_then(|v| v.as_str()),
            Some("EDI-3fa734a7cd6e40998a5c2b5486b6eced")
        );
    }
}

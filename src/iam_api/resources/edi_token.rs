use crate::iam_api::client::{IamClient, RestApi};
use crate::iam_api::response::ResponseData;
use crate::iam_api::types::IamError;
use crate::validation::RequestParameters;

/// EDI token lifecycle: create, revoke, lock, refresh
#[derive(Debug)]
pub struct EdiTokenClient<C = IamClient> {
    api: C,
}

impl<C: RestApi> EdiTokenClient<C> {
    pub fn new(api: C) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &C {
        &self.api
    }

    pub fn into_inner(self) -> C {
        self.api
    }

    pub fn create_token(&self, sub: &str, key: &str) -> Result<ResponseData, IamError> {
        let params = RequestParameters::new().with("key", key);
        let response = self.api.post(&token_route(sub), Some(&params))?;
        self.api.response_data(&response)
    }

    pub fn revoke_token(&self, sub: &str) -> Result<ResponseData, IamError> {
        let response = self.api.put(&token_route(sub), None)?;
        self.api.response_data(&response)
    }

    pub fn lock_token(&self, sub: &str) -> Result<ResponseData, IamError> {
        let response = self.api.delete(&token_route(sub))?;
        self.api.response_data(&response)
    }

    /// Exchange a PASTA token and an EDI token for refreshed copies of both
    pub fn refresh_token(
        &self,
        pasta_token: &str,
        edi_token: &str,
    ) -> Result<ResponseData, IamError> {
        let params = RequestParameters::new()
            .with("pasta_token", pasta_token)
            .with("edi_token", edi_token);
        let response = self.api.post("auth/v1/refresh", Some(&params))?;
        self.api.response_data(&response)
    }
}

fn token_route(sub: &str) -> String {
    format!("auth/v1/token/{}", sub)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iam_api::resources::testing::FakeApi;

    #[test]
    fn test_token_lifecycle_routes() {
        let api = FakeApi::ok("{}");
        let tokens = EdiTokenClient::new(&api);

        tokens.create_token("EDI-1", "8d3c9a5e").unwrap();
        tokens.revoke_token("EDI-1").unwrap();
        tokens.lock_token("EDI-1").unwrap();

        let calls = api.calls.borrow();
        let observed: Vec<_> = calls.iter().map(|c| (c.verb, c.route.as_str())).collect();
        assert_eq!(
            observed,
            vec![
                ("POST", "auth/v1/token/EDI-1"),
                ("PUT", "auth/v1/token/EDI-1"),
                ("DELETE", "auth/v1/token/EDI-1"),
            ]
        );
        assert_eq!(
            calls[0].params.as_ref().unwrap().get("key"),
            Some(Some("8d3c9a5e"))
        );
        assert!(calls[1].params.is_none());
    }

    #[test]
    fn test_refresh_token() {
        let api = FakeApi::ok(r#"{"pasta_token": "p2", "edi_token": "e2"}"#);
        let tokens = EdiTokenClient::new(&api);

        let data = tokens.refresh_token("p1", "e1").unwrap();
        assert_eq!(data.as_json().unwrap()["edi_token"], "e2");

        let call = api.only_call();
        assert_eq!(call.route, "auth/v1/refresh");
        let params = call.params.unwrap();
        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("pasta_token", Some("p1")), ("edi_token", Some("e1"))]);
    }
}

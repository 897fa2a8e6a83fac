use crate::iam_api::client::{IamClient, RestApi};
use crate::iam_api::response::ResponseData;
use crate::iam_api::types::IamError;
use crate::validation::RequestParameters;

/// Exchange an API key for a token
#[derive(Debug)]
pub struct ApiKeyClient<C = IamClient> {
    api: C,
}

impl<C: RestApi> ApiKeyClient<C> {
    pub fn new(api: C) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &C {
        &self.api
    }

    pub fn into_inner(self) -> C {
        self.api
    }

    pub fn key_to_token(&self, key: &str) -> Result<ResponseData, IamError> {
        let params = RequestParameters::new().with("key", key);
        let response = self.api.post("auth/v1/key", Some(&params))?;
        self.api.response_data(&response)
    }
}

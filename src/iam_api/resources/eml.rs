use crate::iam_api::client::{IamClient, RestApi};
use crate::iam_api::types::IamError;
use crate::validation::RequestParameters;

/// Load the access rules of a complete EML document
#[derive(Debug)]
pub struct EmlClient<C = IamClient> {
    api: C,
}

impl<C: RestApi> EmlClient<C> {
    pub fn new(api: C) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &C {
        &self.api
    }

    pub fn into_inner(self) -> C {
        self.api
    }

    pub fn add_eml(&self, eml: &str) -> Result<(), IamError> {
        let params = RequestParameters::new().with("eml", eml);
        self.api.post("auth/v1/eml", Some(&params))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iam_api::resources::testing::FakeApi;

    #[test]
    fn test_add_eml() {
        let api = FakeApi::ok("");
        let emls = EmlClient::new(&api);
        let eml = r#"<eml:eml packageId="edi.1.1" system="https://pasta.edirepository.org"/>"#;

        emls.add_eml(eml).unwrap();

        let call = api.only_call();
        assert_eq!((call.verb, call.route.as_str()), ("POST", "auth/v1/eml"));
        assert_eq!(call.params.unwrap().get("eml"), Some(Some(eml)));
    }

    #[test]
    fn test_add_eml_rejected() {
        let api = FakeApi::failing(400);
        let emls = EmlClient::new(&api);

        assert_eq!(emls.add_eml("<eml/>").unwrap_err().status(), Some(400));
    }
}

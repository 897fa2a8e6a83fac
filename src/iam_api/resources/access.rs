use crate::iam_api::client::{IamClient, RestApi};
use crate::iam_api::types::IamError;
use crate::validation::RequestParameters;

/// Load the rules of an EML `<access>` element for one resource
#[derive(Debug)]
pub struct AccessClient<C = IamClient> {
    api: C,
}

impl<C: RestApi> AccessClient<C> {
    pub fn new(api: C) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &C {
        &self.api
    }

    pub fn into_inner(self) -> C {
        self.api
    }

    /// `access` is the XML text of the element
    pub fn add_access(
        &self,
        access: &str,
        resource_key: &str,
        resource_label: &str,
        resource_type: &str,
    ) -> Result<(), IamError> {
        let params = RequestParameters::new()
            .with("access", access)
            .with("resource_key", resource_key)
            .with("resource_label", resource_label)
            .with("resource_type", resource_type);
        self.api.post("auth/v1/access", Some(&params))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iam_api::resources::testing::FakeApi;

    const ACCESS: &str = r#"<access authSystem="https://pasta.edirepository.org/authentication" order="allowFirst" system="https://pasta.edirepository.org"><allow><principal>public</principal><permission>read</permission></allow></access>"#;

    #[test]
    fn test_add_access() {
        let api = FakeApi::ok("");
        let access = AccessClient::new(&api);

        access.add_access(ACCESS, "edi.1.1", "edi.1.1", "package").unwrap();

        let call = api.only_call();
        assert_eq!((call.verb, call.route.as_str()), ("POST", "auth/v1/access"));
        let params = call.params.unwrap();
        assert_eq!(params.get("access"), Some(Some(ACCESS)));
        assert_eq!(params.len(), 4);
    }
}

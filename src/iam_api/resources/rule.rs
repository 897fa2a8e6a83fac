use crate::iam_api::client::{IamClient, RestApi};
use crate::iam_api::permission::Permission;
use crate::iam_api::response::ResponseData;
use crate::iam_api::types::IamError;
use crate::validation::RequestParameters;

/// Access control rule operations
///
/// A rule grants one principal a [`Permission`] on one resource.
///
/// # Example
///
/// ```no_run
/// use iam_sdk::{ClientConfig, IamClient, Permission, RuleClient};
///
/// # let config = ClientConfig::new("https", "auth.edirepository.org", "json", "./public_key.pem", "ES256", "eyJhbGci...")?;
/// let client = IamClient::new(config);
/// let rules = RuleClient::new(&client);
///
/// rules.create_rule("edi.1.1", "EDI-3fa734a7cd6e40998a5c2b5486b6eced", Permission::Write)?;
/// let granted = rules.read_resource_rules("edi.1.1")?;
/// # Ok::<(), iam_sdk::IamError>(())
/// ```
#[derive(Debug)]
pub struct RuleClient<C = IamClient> {
    api: C,
}

impl<C: RestApi> RuleClient<C> {
    pub fn new(api: C) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &C {
        &self.api
    }

    pub fn into_inner(self) -> C {
        self.api
    }

    pub fn create_rule(
        &self,
        resource_key: &str,
        principal: &str,
        permission: Permission,
    ) -> Result<ResponseData, IamError> {
        let params = RequestParameters::new()
            .with("resource_key", resource_key)
            .with("principal", principal)
            .with("permission", permission.as_wire());
        let response = self.api.post("auth/v1/rule", Some(&params))?;
        self.api.response_data(&response)
    }

    pub fn update_rule(
        &self,
        resource_key: &str,
        principal: &str,
        permission: Permission,
    ) -> Result<ResponseData, IamError> {
        let params = RequestParameters::new().with("permission", permission.as_wire());
        let response = self
            .api
            .put(&rule_route(resource_key, principal), Some(&params))?;
        self.api.response_data(&response)
    }

    pub fn delete_rule(
        &self,
        resource_key: &str,
        principal: &str,
    ) -> Result<ResponseData, IamError> {
        let response = self.api.delete(&rule_route(resource_key, principal))?;
        self.api.response_data(&response)
    }

    pub fn read_rule(&self, resource_key: &str, principal: &str) -> Result<ResponseData, IamError> {
        let response = self.api.get(&rule_route(resource_key, principal), None)?;
        self.api.response_data(&response)
    }

    /// Rules naming the principal of the client's token
    pub fn read_principal_rules(&self) -> Result<ResponseData, IamError> {
        let response = self.api.get("auth/v1/rules/principal", None)?;
        self.api.response_data(&response)
    }

    pub fn read_resource_rules(&self, resource_key: &str) -> Result<ResponseData, IamError> {
        let response = self
            .api
            .get(&format!("auth/v1/rules/resource/{}", resource_key), None)?;
        self.api.response_data(&response)
    }
}

fn rule_route(resource_key: &str, principal: &str) -> String {
    format!("auth/v1/rule/{}/{}", resource_key, principal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iam_api::resources::testing::FakeApi;

    #[test]
    fn test_create_rule_sends_wire_permission() {
        let api = FakeApi::ok(r#"{"CREATE_RULE": "OK"}"#);
        let rules = RuleClient::new(&api);

        rules
            .create_rule("edi.1.1", "EDI-1", Permission::ChangePermission)
            .unwrap();

        let call = api.only_call();
        assert_eq!(call.route, "auth/v1/rule");
        let params = call.params.unwrap();
        assert_eq!(params.get("resource_key"), Some(Some("edi.1.1")));
        assert_eq!(params.get("principal"), Some(Some("EDI-1")));
        assert_eq!(params.get("permission"), Some(Some("changePermission")));
    }

    #[test]
    fn test_rule_routes() {
        let api = FakeApi::ok("{}");
        let rules = RuleClient::new(&api);

        rules.update_rule("edi.1.1", "EDI-1", Permission::Read).unwrap();
        rules.read_rule("edi.1.1", "EDI-1").unwrap();
        rules.delete_rule("edi.1.1", "EDI-1").unwrap();
        rules.read_principal_rules().unwrap();
        rules.read_resource_rules("edi.1.1").unwrap();

        let calls = api.calls.borrow();
        let observed: Vec<_> = calls.iter().map(|c| (c.verb, c.route.as_str())).collect();
        assert_eq!(
            observed,
            vec![
                ("PUT", "auth/v1/rule/edi.1.1/EDI-1"),
                ("GET", "auth/v1/rule/edi.1.1/EDI-1"),
                ("DELETE", "auth/v1/rule/edi.1.1/EDI-1"),
                ("GET", "auth/v1/rules/principal"),
                ("GET", "auth/v1/rules/resource/edi.1.1"),
            ]
        );
        assert_eq!(
            calls[0].params.as_ref().unwrap().get("permission"),
            Some(Some("read"))
        );
    }

    #[test]
    fn test_read_rule_not_found() {
        let api = FakeApi::failing(404);
        let rules = RuleClient::new(&api);

        assert_eq!(rules.read_rule("edi.1.1", "EDI-1").unwrap_err().status(), Some(404));
    }
}

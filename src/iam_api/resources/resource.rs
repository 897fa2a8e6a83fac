use crate::iam_api::client::{IamClient, RestApi};
use crate::iam_api::response::ResponseData;
use crate::iam_api::types::IamError;
use crate::validation::RequestParameters;

/// Which relatives of a resource to include in a read
///
/// Each requested relation is sent as a `"True"` query flag; the others are
/// left out of the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceTree {
    pub descendants: bool,
    pub ancestors: bool,
    pub all: bool,
}

impl ResourceTree {
    /// The resource alone
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_descendants(mut self) -> Self {
        self.descendants = true;
        self
    }

    pub fn with_ancestors(mut self) -> Self {
        self.ancestors = true;
        self
    }

    pub fn with_all(mut self) -> Self {
        self.all = true;
        self
    }

    fn query(&self) -> Option<RequestParameters> {
        let mut params = RequestParameters::new();
        for (key, requested) in [
            ("descendants", self.descendants),
            ("ancestors", self.ancestors),
            ("all", self.all),
        ] {
            if requested {
                params.insert(key, Some("True".to_string()));
            }
        }
        (!params.is_empty()).then_some(params)
    }
}

/// Resource operations (`auth/v1/resource`, `auth/v1/resources`)
#[derive(Debug)]
pub struct ResourceClient<C = IamClient> {
    api: C,
}

impl<C: RestApi> ResourceClient<C> {
    pub fn new(api: C) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &C {
        &self.api
    }

    pub fn into_inner(self) -> C {
        self.api
    }

    /// Register a resource, optionally beneath a parent resource
    pub fn create_resource(
        &self,
        resource_key: &str,
        resource_label: &str,
        resource_type: &str,
        parent_resource_key: Option<&str>,
    ) -> Result<(), IamError> {
        let params = RequestParameters::new()
            .with("resource_key", resource_key)
            .with("resource_label", resource_label)
            .with("resource_type", resource_type)
            .with_optional("parent_resource_key", parent_resource_key);
        self.api.post("auth/v1/resource", Some(&params))?;
        Ok(())
    }

    pub fn update_resource(
        &self,
        resource_key: &str,
        resource_label: &str,
        resource_type: &str,
        parent_resource_key: Option<&str>,
    ) -> Result<(), IamError> {
        let params = RequestParameters::new()
            .with("resource_label", resource_label)
            .with("resource_type", resource_type)
            .with_optional("parent_resource_key", parent_resource_key);
        self.api
            .put(&format!("auth/v1/resource/{}", resource_key), Some(&params))?;
        Ok(())
    }

    pub fn delete_resource(&self, resource_key: &str) -> Result<(), IamError> {
        self.api
            .delete(&format!("auth/v1/resource/{}", resource_key))?;
        Ok(())
    }

    pub fn read_resource(
        &self,
        resource_key: &str,
        tree: ResourceTree,
    ) -> Result<ResponseData, IamError> {
        let query = tree.query();
        let response = self
            .api
            .get(&format!("auth/v1/resource/{}", resource_key), query.as_ref())?;
        self.api.response_data(&response)
    }

    /// Every resource visible to the caller
    pub fn read_resources(&self) -> Result<ResponseData, IamError> {
        let response = self.api.get("auth/v1/resources", None)?;
        self.api.response_data(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iam_api::resources::testing::FakeApi;
    use crate::validation::AcceptType;

    #[test]
    fn test_tree_query_flags() {
        assert_eq!(ResourceTree::none().query(), None);

        let query = ResourceTree::none()
            .with_descendants()
            .with_all()
            .query()
            .unwrap();
        assert_eq!(query.query_pairs(), vec![("descendants", "True"), ("all", "True")]);
    }

    #[test]
    fn test_create_resource_parameters() {
        let api = FakeApi::ok(r#"{"CREATE_RESOURCE": "OK"}"#);
        let resources = ResourceClient::new(&api);

        resources
            .create_resource(
                "https://pasta.lternet.edu/package/data/eml/edi/1/1",
                "edi.1.1",
                "package",
                None,
            )
            .unwrap();

        let call = api.only_call();
        assert_eq!(call.verb, "POST");
        assert_eq!(call.route, "auth/v1/resource");
        let params = call.params.unwrap();
        let keys: Vec<_> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec!["resource_key", "resource_label", "resource_type", "parent_resource_key"]
        );
        assert_eq!(params.get("parent_resource_key"), Some(None));
    }

    #[test]
    fn test_update_resource_keeps_key_in_route() {
        let api = FakeApi::ok("");
        let resources = ResourceClient::new(&api);

        resources
            .update_resource("edi.1.1", "label", "package", Some("edi"))
            .unwrap();

        let call = api.only_call();
        assert_eq!(call.verb, "PUT");
        assert_eq!(call.route, "auth/v1/resource/edi.1.1");
        let params = call.params.unwrap();
        assert_eq!(params.get("resource_key"), None);
        assert_eq!(params.get("parent_resource_key"), Some(Some("edi")));
    }

    #[test]
    fn test_read_resource_with_ancestors() {
        let api = FakeApi::ok(r#"[{"resource_key": "edi"}]"#);
        let resources = ResourceClient::new(&api);

        let data = resources
            .read_resource("edi.1.1", ResourceTree::none().with_ancestors())
            .unwrap();
        assert_eq!(data.as_json().unwrap()[0]["resource_key"], "edi");

        let call = api.only_call();
        assert_eq!(call.verb, "GET");
        assert_eq!(
            call.params.unwrap().query_pairs(),
            vec![("ancestors", "True")]
        );
    }

    #[test]
    fn test_read_resources_under_xml() {
        let mut api = FakeApi::ok("<resources/>");
        api.accept = AcceptType::Xml;
        let resources = ResourceClient::new(&api);

        let data = resources.read_resources().unwrap();
        assert_eq!(data.as_text(), Some("<resources/>"));
        assert_eq!(api.only_call().route, "auth/v1/resources");
    }

    #[test]
    fn test_delete_resource_error() {
        let api = FakeApi::failing(403);
        let resources = ResourceClient::new(&api);

        let err = resources.delete_resource("edi.1.1").unwrap_err();
        assert!(err.is_response_error());
        assert_eq!(api.only_call().verb, "DELETE");
    }
}

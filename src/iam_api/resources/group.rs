use crate::iam_api::client::{IamClient, RestApi};
use crate::iam_api::response::ResponseData;
use crate::iam_api::types::IamError;
use crate::validation::RequestParameters;

/// Group and group membership operations
#[derive(Debug)]
pub struct GroupClient<C = IamClient> {
    api: C,
}

impl<C: RestApi> GroupClient<C> {
    pub fn new(api: C) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &C {
        &self.api
    }

    pub fn into_inner(self) -> C {
        self.api
    }

    /// Create a group owned by the caller; the service answers with the group's EDI identifier
    pub fn create_group(
        &self,
        group_name: &str,
        group_description: Option<&str>,
    ) -> Result<ResponseData, IamError> {
        let params = RequestParameters::new()
            .with("group_name", group_name)
            .with_optional("group_description", group_description);
        let response = self.api.post("auth/v1/group", Some(&params))?;
        self.api.response_data(&response)
    }

    pub fn read_group(&self, group_id: &str) -> Result<ResponseData, IamError> {
        let response = self.api.get(&format!("auth/v1/group/{}", group_id), None)?;
        self.api.response_data(&response)
    }

    pub fn update_group(
        &self,
        group_id: &str,
        group_name: &str,
        group_description: Option<&str>,
    ) -> Result<ResponseData, IamError> {
        let params = RequestParameters::new()
            .with("group_name", group_name)
            .with_optional("group_description", group_description);
        let response = self
            .api
            .put(&format!("auth/v1/group/{}", group_id), Some(&params))?;
        self.api.response_data(&response)
    }

    pub fn delete_group(&self, group_id: &str) -> Result<ResponseData, IamError> {
        let response = self.api.delete(&format!("auth/v1/group/{}", group_id))?;
        self.api.response_data(&response)
    }

    pub fn add_group_member(
        &self,
        group_id: &str,
        profile_id: &str,
    ) -> Result<ResponseData, IamError> {
        let response = self
            .api
            .post(&member_route(group_id, profile_id), None)?;
        self.api.response_data(&response)
    }

    pub fn remove_group_member(
        &self,
        group_id: &str,
        profile_id: &str,
    ) -> Result<ResponseData, IamError> {
        let response = self.api.delete(&member_route(group_id, profile_id))?;
        self.api.response_data(&response)
    }
}

fn member_route(group_id: &str, profile_id: &str) -> String {
    format!("auth/v1/group/{}/{}", group_id, profile_id)
}

use crate::iam_api::client::{IamClient, RestApi};
use crate::iam_api::response::ResponseData;
use crate::iam_api::types::IamError;
use crate::validation::RequestParameters;

/// Profile operations (`auth/v1/profile`)
///
/// # Example
///
/// ```no_run
/// use iam_sdk::{ClientConfig, IamClient, ProfileClient};
///
/// # let config = ClientConfig::new("https", "auth.edirepository.org", "json", "./public_key.pem", "ES256", "eyJhbGci...")?;
/// let client = IamClient::new(config);
/// let profiles = ProfileClient::new(&client);
///
/// let edi_id = profiles.create_profile("uid=jdoe,o=EDI,dc=edirepository,dc=org")?;
/// println!("{:?}", edi_id);
/// # Ok::<(), iam_sdk::IamError>(())
/// ```
#[derive(Debug)]
pub struct ProfileClient<C = IamClient> {
    api: C,
}

impl<C: RestApi> ProfileClient<C> {
    pub fn new(api: C) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &C {
        &self.api
    }

    pub fn into_inner(self) -> C {
        self.api
    }

    /// Create a profile for an IdP identity; the service answers with its EDI identifier
    pub fn create_profile(&self, principal: &str) -> Result<ResponseData, IamError> {
        let params = RequestParameters::new().with("principal", principal);
        let response = self.api.post("auth/v1/profile", Some(&params))?;
        self.api.response_data(&response)
    }

    /// Update the names and email of a profile; absent values are sent as null
    pub fn update_profile(
        &self,
        edi_id: &str,
        given_name: Option<&str>,
        family_name: Option<&str>,
        email: Option<&str>,
    ) -> Result<(), IamError> {
        let params = RequestParameters::new()
            .with_optional("given_name", given_name)
            .with_optional("family_name", family_name)
            .with_optional("email", email);
        self.api
            .put(&format!("auth/v1/profile/{}", edi_id), Some(&params))?;
        Ok(())
    }

    pub fn delete_profile(&self, edi_id: &str) -> Result<(), IamError> {
        self.api.delete(&format!("auth/v1/profile/{}", edi_id))?;
        Ok(())
    }

    pub fn read_profile(&self, edi_id: &str) -> Result<ResponseData, IamError> {
        let response = self.api.get(&format!("auth/v1/profile/{}", edi_id), None)?;
        self.api.response_data(&response)
    }
}

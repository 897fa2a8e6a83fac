use crate::iam_api::client::{IamClient, RestApi};
use crate::iam_api::permission::Permission;
use crate::iam_api::types::IamError;
use crate::validation::RequestParameters;

/// Authorization checks for the client's token
#[derive(Debug)]
pub struct AuthorizedClient<C = IamClient> {
    api: C,
}

impl<C: RestApi> AuthorizedClient<C> {
    pub fn new(api: C) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &C {
        &self.api
    }

    pub fn into_inner(self) -> C {
        self.api
    }

    /// Whether the token's principals hold `permission` on the resource
    ///
    /// The service denies with a non-200 status, which is logged and
    /// reported as `Ok(false)`. Validation and transport failures are
    /// still returned as errors.
    pub fn is_authorized(
        &self,
        resource_key: &str,
        permission: Permission,
    ) -> Result<bool, IamError> {
        let params = RequestParameters::new()
            .with("resource_key", resource_key)
            .with("permission", permission.as_wire());

        match self.api.get("auth/v1/authorized", Some(&params)) {
            Ok(_) => Ok(true),
            Err(e) if e.is_response_error() => {
                tracing::error!(
                    "Authorization denied for {} on '{}': {}",
                    permission,
                    resource_key,
                    e
                );
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

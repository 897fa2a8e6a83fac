use crate::iam_api::response::ResponseData;
use crate::iam_api::types::{ApiError, IamError, Response};
use crate::validation::{
    validate_parameters, validate_route, AcceptType, ClientConfig, RequestParameters, TrustStore,
    Verb,
};
use reqwest::blocking::Client as HttpClient;
use reqwest::header::COOKIE;
use reqwest::Certificate;
use std::sync::Mutex;

/// Name of the cookie carrying the caller's token
pub const TOKEN_COOKIE: &str = "pasta_token";

/// Header used by the IAM service to select the response representation
pub const ACCEPT_TYPE_HEADER: &str = "Accept-Type";

/// The four HTTP verbs of the IAM REST API
///
/// Resource clients are written against this trait so they can run over
/// [`IamClient`] or any other implementation (a recording fake in tests,
/// for instance). Every method returns the response of that exact call.
pub trait RestApi {
    /// Accept type responses should be normalized with
    fn accept(&self) -> AcceptType;

    fn get(
        &self,
        route: &str,
        query_params: Option<&RequestParameters>,
    ) -> Result<Response, IamError>;

    fn post(
        &self,
        route: &str,
        form_params: Option<&RequestParameters>,
    ) -> Result<Response, IamError>;

    fn put(
        &self,
        route: &str,
        form_params: Option<&RequestParameters>,
    ) -> Result<Response, IamError>;

    fn delete(&self, route: &str) -> Result<Response, IamError>;

    /// Normalize a response with this client's accept type
    fn response_data(&self, response: &Response) -> Result<ResponseData, IamError> {
        ResponseData::from_response(response, self.accept())
    }
}

impl<T: RestApi + ?Sized> RestApi for &T {
    fn accept(&self) -> AcceptType {
        (**self).accept()
    }

    fn get(
        &self,
        route: &str,
        query_params: Option<&RequestParameters>,
    ) -> Result<Response, IamError> {
        (**self).get(route, query_params)
    }

    fn post(
        &self,
        route: &str,
        form_params: Option<&RequestParameters>,
    ) -> Result<Response, IamError> {
        (**self).post(route, form_params)
    }

    fn put(
        &self,
        route: &str,
        form_params: Option<&RequestParameters>,
    ) -> Result<Response, IamError> {
        (**self).put(route, form_params)
    }

    fn delete(&self, route: &str) -> Result<Response, IamError> {
        (**self).delete(route)
    }
}

/// Blocking HTTP client for the IAM REST API
///
/// Owns a validated [`ClientConfig`]. Each call validates its route and
/// parameters, opens a fresh connection, and treats any status other than
/// 200 as an error. Nothing is retried.
///
/// The most recent successful response is also kept in a mutex-guarded
/// slot for [`IamClient::last_response`]. Prefer the value returned by
/// each call: with a shared client the slot holds whichever call finished
/// last.
///
/// # Example
///
/// ```no_run
/// use iam_sdk::{ClientConfig, IamClient, RestApi};
///
/// let config = ClientConfig::new(
///     "https",
///     "auth.edirepository.org",
///     "json",
///     "./public_key.pem",
///     "ES256",
///     "eyJhbGci...",
/// )?;
/// let client = IamClient::new(config);
///
/// let response = client.get("auth/v1/resources", None)?;
/// println!("{}", response.body());
/// # Ok::<(), iam_sdk::IamError>(())
/// ```
#[derive(Debug)]
pub struct IamClient {
    config: ClientConfig,
    last_response: Mutex<Option<Response>>,
}

impl IamClient {
    pub fn new(config: ClientConfig) -> Self {
        tracing::debug!("Creating IamClient for {}", config.base_url());

        Self {
            config,
            last_response: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Mutable access for the validating `set_*` methods
    pub fn config_mut(&mut self) -> &mut ClientConfig {
        &mut self.config
    }

    /// Most recent successful response, if any call has succeeded
    pub fn last_response(&self) -> Option<Response> {
        self.last_response
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Normalize the most recent successful response
    ///
    /// Fails with [`IamError::NoResponse`] when no call has succeeded yet.
    pub fn last_response_data(&self) -> Result<ResponseData, IamError> {
        let response = self.last_response().ok_or(IamError::NoResponse)?;
        ResponseData::from_response(&response, self.config.accept())
    }

    fn record(&self, response: &Response) {
        *self
            .last_response
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(response.clone());
    }

    /// Build a single-use transport client
    fn http_client(&self) -> Result<HttpClient, IamError> {
        let mut builder = HttpClient::builder()
            .timeout(self.config.timeout())
            .pool_max_idle_per_host(0);

        if let TrustStore::File(path) = self.config.truststore() {
            let pem = std::fs::read(path).map_err(|e| {
                IamError::InvalidParameter(format!(
                    "Failed to read truststore '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            let certificates = Certificate::from_pem_bundle(&pem).map_err(ApiError::from)?;
            if certificates.is_empty() {
                return Err(IamError::InvalidParameter(format!(
                    "Truststore '{}' contains no certificates",
                    path.display()
                )));
            }

            builder = builder.tls_built_in_root_certs(false);
            for certificate in certificates {
                builder = builder.add_root_certificate(certificate);
            }
        }

        builder.build().map_err(|e| {
            tracing::error!("Failed to create HTTP client: {}", e);
            IamError::Api(ApiError::Request(e))
        })
    }

    fn url(&self, route: &str) -> Result<url::Url, IamError> {
        let url = format!("{}/{}", self.config.base_url(), route);
        url::Url::parse(&url).map_err(|e| {
            IamError::InvalidRoute(format!("'{}' does not form a valid URL: {}", route, e))
        })
    }

    fn execute(
        &self,
        verb: Verb,
        route: &str,
        params: Option<&RequestParameters>,
    ) -> Result<Response, IamError> {
        validate_route(route, verb)?;
        if let Some(params) = params {
            validate_parameters(params, self.config.public_key_path(), self.config.algorithm())?;
        }
        let url = self.url(route)?;
        let http = self.http_client()?;

        tracing::debug!("Sending {} request to: {}", verb, url);

        let request = match verb {
            Verb::Get => http.get(url),
            Verb::Post => http.post(url),
            Verb::Put => http.put(url),
            Verb::Delete => http.delete(url),
        }
        .header(COOKIE, format!("{}={}", TOKEN_COOKIE, self.config.token()))
        .header(ACCEPT_TYPE_HEADER, self.config.accept().mime());

        let request = match verb {
            Verb::Get => match params {
                Some(params) => request.query(&params.query_pairs()),
                None => request,
            },
            Verb::Post | Verb::Put => {
                let empty = RequestParameters::new();
                request.json(params.unwrap_or(&empty))
            }
            Verb::Delete => request,
        };

        let response = request
            .send()
            .and_then(Response::from_transport)
            .map_err(|e| {
                tracing::error!("{} {} failed: {}", verb, route, e);
                IamError::Api(ApiError::Request(e))
            })?;

        tracing::debug!(
            "Received response with status: {} {}",
            response.status_code(),
            response.reason()
        );

        if response.status_code() != 200 {
            tracing::error!(
                "{} {} failed: HTTP {} - {}",
                verb,
                route,
                response.status_code(),
                response.body()
            );
            return Err(IamError::Api(ApiError::Response {
                status: response.status_code(),
                reason: response.reason().to_string(),
                body: response.body().to_string(),
            }));
        }

        if verb != Verb::Get {
            tracing::info!("{} {} succeeded", verb, route);
        }

        self.record(&response);
        Ok(response)
    }
}

impl RestApi for IamClient {
    fn accept(&self) -> AcceptType {
        self.config.accept()
    }

    fn get(
        &self,
        route: &str,
        query_params: Option<&RequestParameters>,
    ) -> Result<Response, IamError> {
        self.execute(Verb::Get, route, query_params)
    }

    fn post(
        &self,
        route: &str,
        form_params: Option<&RequestParameters>,
    ) -> Result<Response, IamError> {
        self.execute(Verb::Post, route, form_params)
    }

    fn put(
        &self,
        route: &str,
        form_params: Option<&RequestParameters>,
    ) -> Result<Response, IamError> {
        self.execute(Verb::Put, route, form_params)
    }

    fn delete(&self, route: &str) -> Result<Response, IamError> {
        self.execute(Verb::Delete, route, None)
    }
}

use super::interceptor::{BearerAuth, ContentTypeNegotiation, RequestInterceptor};
use super::request::{ApiRequest, RequestBody};
use super::response::{ApiResponse, ErrorLogger, ResponseHandler, SessionInvalidation};
use crate::error::ApiError;
use crate::session::{CredentialStore, Navigator};

use common::HttpStatusCode;

use std::sync::Arc;
use std::time::Duration;

use log::trace;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

pub const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);

/// The single shared client for all server calls.
///
/// Cheap to clone; clones share the connection pool and both chains.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    client: Client,
    request_chain: Arc<Vec<Arc<dyn RequestInterceptor>>>,
    response_chain: Arc<Vec<Arc<dyn ResponseHandler>>>,
}

pub struct ApiClientBuilder {
    base_url: String,
    timeout: Duration,
    request_chain: Vec<Arc<dyn RequestInterceptor>>,
    response_chain: Vec<Arc<dyn ResponseHandler>>,
}

impl ApiClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn request_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.request_chain.push(interceptor);
        self
    }

    pub fn response_handler(mut self, handler: Arc<dyn ResponseHandler>) -> Self {
        self.response_chain.push(handler);
        self
    }

    /// The standard chains: bearer auth and content-type negotiation on the
    /// way out; logging and 401 session invalidation on the way back.
    pub fn with_session(
        self,
        store: CredentialStore,
        navigator: Arc<dyn Navigator>,
        login_path: impl Into<String>,
    ) -> Self {
        self.request_interceptor(Arc::new(BearerAuth::new(store.clone())))
            .request_interceptor(Arc::new(ContentTypeNegotiation))
            .response_handler(Arc::new(ErrorLogger))
            .response_handler(Arc::new(SessionInvalidation::new(
                store, navigator, login_path,
            )))
    }

    #[track_caller]
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let mut base_url = Url::parse(&self.base_url)?;
        // Relative joins keep the last path segment only with a trailing slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder().timeout(self.timeout).build()?;

        Ok(ApiClient {
            base_url,
            client,
            request_chain: Arc::new(self.request_chain),
            response_chain: Arc::new(self.response_chain),
        })
    }
}

impl ApiClient {
    pub fn builder(base_url: impl Into<String>) -> ApiClientBuilder {
        ApiClientBuilder {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT_DURATION,
            request_chain: Vec::new(),
            response_chain: Vec::new(),
        }
    }

    /// A client with the standard chains and the default login path.
    pub fn new(
        base_url_str: &str,
        store: CredentialStore,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        Self::builder(base_url_str)
            .with_session(store, navigator, crate::LOGIN_PATH)
            .build()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Run the request chain without dispatching.
    pub fn prepare(&self, mut request: ApiRequest) -> Result<ApiRequest, ApiError> {
        for interceptor in self.request_chain.iter() {
            trace!("Request interceptor: {}", interceptor.name());
            interceptor.intercept(&mut request)?;
        }
        Ok(request)
    }

    /// Send through the full pipeline.
    ///
    /// # Errors
    ///
    /// Any non-2xx status or transport failure, classified as [`ApiError`],
    /// after every response handler has observed it.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let request = self.prepare(request)?;

        match self.dispatch(&request).await {
            Ok(response) => {
                for handler in self.response_chain.iter() {
                    handler.on_success(&request, &response);
                }
                Ok(response)
            }
            Err(error) => {
                for handler in self.response_chain.iter() {
                    handler.on_error(&request, &error);
                }
                Err(error)
            }
        }
    }

    /// Send and decode a JSON body.
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        self.send(request).await?.json()
    }

    async fn dispatch(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut url = self
            .base_url
            .join(request.path.trim_start_matches('/'))?;

        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }

        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .headers(request.headers.clone());

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.body(serde_json::to_vec(value)?),
            RequestBody::Multipart(form) => builder.multipart(form.clone().into_reqwest()?),
        };

        let response = builder.send().await?;
        let status = HttpStatusCode(response.status().as_u16());
        let headers = response.headers().clone();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, body));
        }

        let body = response.bytes().await?.to_vec();

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

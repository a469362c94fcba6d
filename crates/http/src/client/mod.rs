//! PawsConnect API client

pub mod auth;
pub mod error;
pub mod interceptor;

use std::sync::Arc;
use std::time::Duration;

use error::ClientError;
use interceptor::Interceptor;
use reqwest::{Client, ClientBuilder};
use tracing::debug;

/// Default timeout applied to every request unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// PawsConnect API client
///
/// The base URL is fixed at construction; endpoint paths are appended to it.
/// Every request built through [`PawsClient::request`] runs through the
/// interceptor pipeline in registration order.
#[derive(Clone)]
pub struct PawsClient {
    client: Client,
    base_url: String,
    interceptors: Arc<[Arc<dyn Interceptor>]>,
}

impl PawsClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> PawsClientBuilder {
        PawsClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a request builder, running the interceptor pipeline
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, url);

        for interceptor in self.interceptors.iter() {
            request = interceptor.intercept(request);
        }

        request
    }

    /// Create a request builder carrying an explicit bearer token.
    ///
    /// Skips the interceptor pipeline so a candidate token can be sent
    /// before any session state exists (and without stacking a second
    /// `Authorization` header on top of one added by the pipeline).
    pub fn request_with_bearer(
        &self,
        method: reqwest::Method,
        path: &str,
        token: &str,
    ) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, url)
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"))
    }

    /// Execute a request and handle common errors
    ///
    /// Rejections are mapped by status code and propagated unmodified; no
    /// retry happens at this layer.
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            debug!(status = status.as_u16(), "request rejected by backend");
            Err(ClientError::from_response(status, message))
        }
    }
}

/// Builder for PawsClient
#[derive(Default)]
pub struct PawsClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl PawsClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout (defaults to [`DEFAULT_TIMEOUT`])
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Append an interceptor; pipeline order is registration order
    pub fn interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<PawsClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut client_builder = ClientBuilder::new()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT));

        if let Some(user_agent) = self.user_agent {
            client_builder = client_builder.user_agent(user_agent);
        } else {
            client_builder = client_builder.user_agent("paws-client/0.1.0");
        }

        let client = client_builder.build()?;

        Ok(PawsClient {
            client,
            base_url,
            interceptors: self.interceptors.into(),
        })
    }
}

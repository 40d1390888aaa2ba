/*
[INPUT]:  HTTP configuration (base URL, timeouts, bearer token)
[OUTPUT]: Configured reqwest client plus normalized send helpers
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing response normalization
*/

use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use std::time::Duration;
use uuid::Uuid;

use crate::http::{FlowdeskError, Result};
use crate::types::{ActionOutcome, ApiEnvelope};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Main HTTP client for the workflow engine API
#[derive(Debug)]
pub struct FlowdeskClient {
    http_client: Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl FlowdeskClient {
    /// Create a new client with default configuration
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(ClientConfig::default(), base_url)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: Url::parse(base_url)?,
            auth_token: None,
        })
    }

    /// Set the bearer token attached to subsequent requests
    pub fn set_auth_token(&mut self, token: impl Into<String>) {
        self.auth_token = Some(token.into());
    }

    /// Get the bearer token if set
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// Build full URL for an API endpoint
    fn api_url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint)?)
    }

    /// Build a request builder with request-id and auth headers applied
    pub(crate) fn api_request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.api_url(endpoint)?;
        let mut builder = self
            .http_client
            .request(method, url)
            .header("x-request-id", Uuid::new_v4().to_string());
        if let Some(token) = &self.auth_token {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    /// Send a request and deserialize the 2xx body directly into `T`.
    ///
    /// Non-2xx bodies are mined for a remote `message` before falling back
    /// to the status line.
    pub(crate) async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_from_body(status, response.text().await.ok()));
        }
        Ok(response.json::<T>().await?)
    }

    /// Send a request and normalize the response into an `ActionOutcome`.
    pub(crate) async fn send_envelope(&self, builder: RequestBuilder) -> Result<ActionOutcome> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Self::error_from_body(status, Some(body)));
        }
        if body.trim().is_empty() {
            // Some engine endpoints answer 204-style with an empty body.
            return Ok(ActionOutcome::from(ApiEnvelope::default()));
        }
        let envelope: ApiEnvelope = serde_json::from_str(&body)?;
        Ok(ActionOutcome::from(envelope))
    }

    /// Send a request and return the raw 2xx body plus response headers.
    pub(crate) async fn send_raw(&self, builder: RequestBuilder) -> Result<reqwest::Response> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_from_body(status, response.text().await.ok()));
        }
        Ok(response)
    }

    fn error_from_body(status: StatusCode, body: Option<String>) -> FlowdeskError {
        let remote_message = body.as_deref().and_then(|text| {
            serde_json::from_str::<ApiEnvelope>(text)
                .ok()
                .and_then(|envelope| envelope.message)
        });
        let message = remote_message.unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
        FlowdeskError::api_error(status, message)
    }
}

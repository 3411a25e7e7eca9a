//! HTTP client for the Vapi REST API.
//!
//! [`VapiClient`] holds the credentials and base URL; the per-resource
//! operations live next to their request types (`assistants`, `calls`,
//! `chats`, `phone_numbers`) as `impl VapiClient` blocks.

pub mod http;

use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::calls::{CallAccessor, CallRecord};
use crate::config::CoraConfig;
use crate::error::CoraError;

use http::{bearer_headers, shared_client, status_to_error};

/// Authenticated Vapi API client.
#[derive(Clone)]
pub struct VapiClient {
    api_key: String,
    base_url: String,
    config: CoraConfig,
}

impl std::fmt::Debug for VapiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VapiClient")
            .field("base_url", &self.base_url)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl VapiClient {
    /// Build a client from a config; fails if no API key is configured.
    pub fn new(config: CoraConfig) -> Result<Self, CoraError> {
        let api_key = config.require_api_key()?.to_string();
        Ok(Self {
            api_key,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            config,
        })
    }

    /// Build a client from `VAPI_*` environment variables and `.env`.
    pub fn from_env() -> Result<Self, CoraError> {
        Self::new(CoraConfig::from_env())
    }

    /// Point the client at a different API host (e.g. a mock server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn config(&self) -> &CoraConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CoraError> {
        debug!(path, "Vapi GET");
        self.send(shared_client().get(self.url(path)).query(query))
            .await
    }

    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
    ) -> Result<T, CoraError> {
        debug!(path, "Vapi POST");
        self.send(shared_client().post(self.url(path)).json(body))
            .await
    }

    pub(crate) async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CoraError> {
        debug!(path, "Vapi DELETE");
        self.send(shared_client().delete(self.url(path))).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, CoraError> {
        let resp = request.headers(bearer_headers(&self.api_key)).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status.as_u16(), &body_text));
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CallAccessor for VapiClient {
    async fn get_call(&self, call_id: &str) -> Result<CallRecord, CoraError> {
        self.get_json(&format!("call/{call_id}"), &[]).await
    }
}

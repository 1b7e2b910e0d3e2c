//! Shared HTTP client for the Tidecast application API.
//!
//! Minimal client with configurable auth and generic JSON helpers; the
//! metadata attacher and engagement helpers build on it. The record store
//! behind the API is an external collaborator consumed through plain
//! request/response contracts.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tidecast_core::models::{ContentKind, MediaRecord};
use tidecast_core::UploaderConfig;
use uuid::Uuid;

/// Authentication strategy for the application API.
#[derive(Clone, Debug)]
pub enum Auth {
    /// `Authorization: Bearer {token}`
    Bearer(String),
    /// `X-API-Key: {key}`
    XApiKey(String),
}

/// HTTP client for the application API with configurable auth.
#[derive(Clone, Debug)]
pub struct AppClient {
    client: Client,
    base_url: String,
    auth: Auth,
}

impl AppClient {
    pub fn new(config: &UploaderConfig, auth: Auth) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client for the application API")?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            auth,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Auth::Bearer(token) => request.header("Authorization", format!("Bearer {}", token)),
            Auth::XApiKey(key) => request.header("X-API-Key", key.as_str()),
        }
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "API request failed with status {}: {}",
                status,
                error_text
            ));
        }

        response
            .json()
            .await
            .context("Failed to parse response as JSON")
    }

    /// GET request, deserializing the JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.apply_auth(self.client.get(self.build_url(path)));
        let response = request.send().await.context("Failed to send request")?;
        Self::read_json(response).await
    }

    /// POST JSON body and deserialize the response.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.apply_auth(self.client.post(self.build_url(path)).json(body));
        let response = request.send().await.context("Failed to send request")?;
        Self::read_json(response).await
    }

    /// PUT JSON body and deserialize the response.
    pub async fn put_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.apply_auth(self.client.put(self.build_url(path)).json(body));
        let response = request.send().await.context("Failed to send request")?;
        Self::read_json(response).await
    }

    /// POST with no interest in the response body. Used by fire-and-forget
    /// endpoints that may reply 204.
    pub async fn post_no_content<B: serde::Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let request = self.apply_auth(self.client.post(self.build_url(path)).json(body));
        let response = request.send().await.context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "API request failed with status {}: {}",
                status,
                error_text
            ));
        }
        Ok(())
    }

    /// DELETE request. Returns Ok(()) on success.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let request = self.apply_auth(self.client.delete(self.build_url(path)));
        let response = request.send().await.context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "API request failed with status {}: {}",
                status,
                error_text
            ));
        }
        Ok(())
    }

    /// Fetch a single media record.
    pub async fn get_record(&self, kind: ContentKind, id: Uuid) -> Result<MediaRecord> {
        self.get(&format!("/api/{}/{}", kind.endpoint(), id)).await
    }

    /// Delete a media record (owner or admin action).
    pub async fn delete_record(&self, kind: ContentKind, id: Uuid) -> Result<()> {
        self.delete(&format!("/api/{}/{}", kind.endpoint(), id))
            .await
    }
}

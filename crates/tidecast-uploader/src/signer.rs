//! Client for the signer: the external service issuing short-lived, scoped
//! upload authorizations.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tidecast_core::models::{ResourceKind, UploadSignature};
use tidecast_core::{UploadError, UploaderConfig};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignatureRequest<'a> {
    resource_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    folder: Option<&'a str>,
}

/// Signer error bodies come back as JSON or plain text; both are handled.
#[derive(Debug, Deserialize)]
struct SignerErrorBody {
    error: Option<String>,
    message: Option<String>,
}

#[derive(Clone, Debug)]
pub struct SignerClient {
    http: reqwest::Client,
    url: String,
}

impl SignerClient {
    pub fn new(config: &UploaderConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client for signer")?;

        Ok(Self {
            http,
            url: config.signer_url.clone(),
        })
    }

    /// Request a one-use signature scoped to the given resource kind and
    /// folder. Every failure surfaces as `SignatureUnavailable`; the caller
    /// must not start a transfer without a signature.
    pub async fn request_signature(
        &self,
        kind: ResourceKind,
        folder: Option<&str>,
    ) -> Result<UploadSignature, UploadError> {
        let body = SignatureRequest {
            resource_type: kind.as_str(),
            folder,
        };

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| UploadError::SignatureUnavailable(format!("Signer unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(UploadError::SignatureUnavailable(signer_error_message(
                status, &body_text,
            )));
        }

        let signature: UploadSignature = response.json().await.map_err(|e| {
            UploadError::SignatureUnavailable(format!("Failed to parse signer response: {}", e))
        })?;

        tracing::debug!(
            cloud_name = %signature.cloud_name,
            resource_type = %kind,
            "Acquired upload signature"
        );

        Ok(signature)
    }
}

fn signer_error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<SignerErrorBody>(body) {
        if let Some(message) = parsed.error.or(parsed.message) {
            return message;
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("Signer returned status {}", status)
    } else {
        trimmed.to_string()
    }
}

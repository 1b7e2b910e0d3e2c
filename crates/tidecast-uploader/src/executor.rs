//! Upload executor: owns the lifecycle of one direct transfer to the cloud
//! asset host.
//!
//! Sequence per call: validate client-side, acquire a signature, stream the
//! file with progress ticks, parse the host response. Strictly one attempt;
//! there is no automatic retry, no cancellation, and no resume. A failure
//! after the bytes transferred may leave an orphaned asset on the host;
//! nothing here reconciles that.

use anyhow::{Context, Result};
use bytes::Bytes;
use futures::StreamExt;
use serde::Deserialize;
use tidecast_core::models::{ResourceKind, UploadSignature, UploadedAsset};
use tidecast_core::{UploadError, UploaderConfig};

use crate::file::FileSource;
use crate::progress::ProgressGauge;
use crate::signer::SignerClient;

/// Host success body. Parsed strictly: an asset is either fully populated
/// or the response is rejected as invalid.
#[derive(Debug, Deserialize)]
struct HostUploadResponse {
    secure_url: Option<String>,
    url: Option<String>,
    public_id: Option<String>,
    resource_type: Option<ResourceKind>,
    format: Option<String>,
    duration: Option<f64>,
}

impl HostUploadResponse {
    fn into_asset(self) -> Result<UploadedAsset, UploadError> {
        let remote_url = self
            .secure_url
            .filter(|u| !u.is_empty())
            .or(self.url.filter(|u| !u.is_empty()))
            .ok_or_else(|| {
                UploadError::InvalidHostResponse(
                    "Host response is missing secure_url/url".to_string(),
                )
            })?;

        let storage_id = self.public_id.filter(|p| !p.is_empty()).ok_or_else(|| {
            UploadError::InvalidHostResponse("Host response is missing public_id".to_string())
        })?;

        let resource_kind = self.resource_type.ok_or_else(|| {
            UploadError::InvalidHostResponse("Host response is missing resource_type".to_string())
        })?;

        let format = self.format.filter(|f| !f.is_empty()).ok_or_else(|| {
            UploadError::InvalidHostResponse("Host response is missing format".to_string())
        })?;

        Ok(UploadedAsset {
            remote_url,
            storage_id,
            resource_kind,
            format,
            duration: self.duration,
        })
    }
}

#[derive(Debug, Deserialize)]
struct HostErrorBody {
    error: Option<HostErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct HostErrorDetail {
    message: Option<String>,
}

#[derive(Clone, Debug)]
pub struct UploadExecutor {
    http: reqwest::Client,
    signer: SignerClient,
    upload_base_url: String,
    chunk_bytes: usize,
}

impl UploadExecutor {
    pub fn new(config: &UploaderConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client for uploads")?;

        Ok(Self {
            http,
            signer: SignerClient::new(config)?,
            upload_base_url: config.upload_base_url.clone(),
            chunk_bytes: config.chunk_bytes,
        })
    }

    /// Run one full transfer: validate, sign, stream, parse.
    ///
    /// Progress is driven through `gauge` up to 100% transferred; terminal
    /// `done` is the caller's to emit once the asset has also been
    /// persisted. Errors mark the gauge failed before returning.
    #[tracing::instrument(
        skip(self, file, gauge),
        fields(
            filename = %file.filename,
            bytes = file.len(),
            resource_type = %kind,
        )
    )]
    pub async fn execute(
        &self,
        file: &FileSource,
        kind: ResourceKind,
        folder: Option<&str>,
        accepted_mime_prefix: Option<&str>,
        gauge: &ProgressGauge,
    ) -> Result<UploadedAsset, UploadError> {
        let result = self
            .run(file, kind, folder, accepted_mime_prefix, gauge)
            .await;
        if result.is_err() {
            gauge.failed();
        }
        result
    }

    async fn run(
        &self,
        file: &FileSource,
        kind: ResourceKind,
        folder: Option<&str>,
        accepted_mime_prefix: Option<&str>,
        gauge: &ProgressGauge,
    ) -> Result<UploadedAsset, UploadError> {
        validate(file, accepted_mime_prefix)?;

        gauge.signing();
        let signature = self.signer.request_signature(kind, folder).await?;

        gauge.transferred(0, file.len() as u64);
        let response = self.transfer(file, kind, &signature, folder, gauge).await?;

        let status = response.status();
        if status.is_success() {
            let body = response.text().await.map_err(|e| {
                UploadError::NetworkError(format!("Failed to read host response: {}", e))
            })?;
            let parsed: HostUploadResponse = serde_json::from_str(&body).map_err(|_| {
                UploadError::InvalidHostResponse(
                    "Host reported success but the response body could not be parsed".to_string(),
                )
            })?;
            let asset = parsed.into_asset()?;
            tracing::info!(
                public_id = %asset.storage_id,
                url = %asset.remote_url,
                "Transfer complete"
            );
            Ok(asset)
        } else {
            let body = response.text().await.unwrap_or_else(|_| String::new());
            tracing::warn!(status = %status, "Host rejected upload");
            Err(UploadError::UploadRejected(host_error_message(
                status, &body,
            )))
        }
    }

    async fn transfer(
        &self,
        file: &FileSource,
        kind: ResourceKind,
        signature: &UploadSignature,
        folder: Option<&str>,
        gauge: &ProgressGauge,
    ) -> Result<reqwest::Response, UploadError> {
        let url = format!(
            "{}/v1_1/{}/{}/upload",
            self.upload_base_url,
            signature.cloud_name,
            kind.endpoint()
        );

        let part = progress_part(file, self.chunk_bytes, gauge)?;
        let mut form = reqwest::multipart::Form::new()
            .text("api_key", signature.api_key.clone())
            .text("timestamp", signature.timestamp.to_string())
            .text("signature", signature.signature.clone())
            .text("resource_type", kind.as_str())
            .part("file", part);
        if let Some(folder) = folder {
            form = form.text("folder", folder.to_string());
        }

        self.http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    UploadError::Timeout(format!("Transfer did not complete: {}", e))
                } else {
                    UploadError::NetworkError(format!("Transfer failed: {}", e))
                }
            })
    }
}

fn validate(file: &FileSource, accepted_mime_prefix: Option<&str>) -> Result<(), UploadError> {
    if file.is_empty() {
        return Err(UploadError::InvalidInput(
            "Selected file is empty".to_string(),
        ));
    }
    if let Some(prefix) = accepted_mime_prefix {
        if !file.content_type.starts_with(prefix) {
            return Err(UploadError::InvalidInput(format!(
                "Expected a {}* file, got {}",
                prefix, file.content_type
            )));
        }
    }
    Ok(())
}

/// Multipart file part whose body stream reports progress once per chunk.
fn progress_part(
    file: &FileSource,
    chunk_bytes: usize,
    gauge: &ProgressGauge,
) -> Result<reqwest::multipart::Part, UploadError> {
    let data = file.bytes.clone();
    let total = data.len() as u64;
    let chunk = chunk_bytes.max(1);

    let chunks: Vec<Bytes> = (0..data.len())
        .step_by(chunk)
        .map(|offset| data.slice(offset..usize::min(offset + chunk, data.len())))
        .collect();

    let gauge = gauge.clone();
    let mut sent: u64 = 0;
    let stream = futures::stream::iter(chunks).map(move |piece| {
        sent += piece.len() as u64;
        gauge.transferred(sent, total);
        Ok::<Bytes, std::io::Error>(piece)
    });

    reqwest::multipart::Part::stream_with_length(reqwest::Body::wrap_stream(stream), total)
        .file_name(file.filename.clone())
        .mime_str(&file.content_type)
        .map_err(|e| {
            UploadError::InvalidInput(format!(
                "Invalid content type {}: {}",
                file.content_type, e
            ))
        })
}

fn host_error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<HostErrorBody>(body) {
        if let Some(message) = parsed.error.and_then(|e| e.message) {
            return message;
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("Upload rejected with status {}", status)
    } else {
        trimmed.to_string()
    }
}

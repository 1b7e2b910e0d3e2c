//! Configuration module
//!
//! Pipeline configuration with environment-driven construction. The signer
//! and application API are deployment-specific and must be provided; the
//! asset host and transfer tuning have sensible defaults.

use std::env;
use std::time::Duration;

use anyhow::Context;

const DEFAULT_UPLOAD_BASE_URL: &str = "https://api.cloudinary.com";
const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 300;
const DEFAULT_CHUNK_BYTES: usize = 64 * 1024;

/// Configuration for the upload pipeline.
#[derive(Clone, Debug)]
pub struct UploaderConfig {
    /// Endpoint issuing upload signatures.
    pub signer_url: String,
    /// Base URL of the cloud asset host.
    pub upload_base_url: String,
    /// Base URL of the application API (record store).
    pub api_base_url: String,
    /// Client timeout applied to every request, including the transfer.
    pub timeout: Duration,
    /// Size of the body chunks the transfer stream yields; progress is
    /// reported once per chunk.
    pub chunk_bytes: usize,
}

impl UploaderConfig {
    pub fn new(signer_url: impl Into<String>, api_base_url: impl Into<String>) -> Self {
        Self {
            signer_url: trim_url(signer_url.into()),
            upload_base_url: DEFAULT_UPLOAD_BASE_URL.to_string(),
            api_base_url: trim_url(api_base_url.into()),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            chunk_bytes: DEFAULT_CHUNK_BYTES,
        }
    }

    /// Build from environment variables:
    /// TIDECAST_SIGNER_URL (required), TIDECAST_API_URL,
    /// TIDECAST_UPLOAD_URL, TIDECAST_UPLOAD_TIMEOUT_SECS,
    /// TIDECAST_UPLOAD_CHUNK_BYTES.
    pub fn from_env() -> anyhow::Result<Self> {
        let signer_url =
            env::var("TIDECAST_SIGNER_URL").context("TIDECAST_SIGNER_URL must be set")?;

        let api_base_url =
            env::var("TIDECAST_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        let upload_base_url =
            env::var("TIDECAST_UPLOAD_URL").unwrap_or_else(|_| DEFAULT_UPLOAD_BASE_URL.to_string());

        let timeout_secs = match env::var("TIDECAST_UPLOAD_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .context("TIDECAST_UPLOAD_TIMEOUT_SECS must be an integer number of seconds")?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let chunk_bytes = match env::var("TIDECAST_UPLOAD_CHUNK_BYTES") {
            Ok(raw) => raw
                .parse::<usize>()
                .context("TIDECAST_UPLOAD_CHUNK_BYTES must be an integer number of bytes")?,
            Err(_) => DEFAULT_CHUNK_BYTES,
        };

        Ok(Self {
            signer_url: trim_url(signer_url),
            upload_base_url: trim_url(upload_base_url),
            api_base_url: trim_url(api_base_url),
            timeout: Duration::from_secs(timeout_secs),
            chunk_bytes,
        })
    }
}

fn trim_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

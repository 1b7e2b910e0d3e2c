//! Upload authorization and uploaded-asset models.

use serde::{Deserialize, Serialize};

/// Host-side resource kind, as understood by the asset host's upload
/// endpoints and echoed back in its responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Image,
    Video,
    Audio,
    Raw,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Image => "image",
            ResourceKind::Video => "video",
            ResourceKind::Audio => "audio",
            ResourceKind::Raw => "raw",
        }
    }

    /// Path segment of the host upload endpoint. Raw files go through the
    /// host's auto-detection endpoint.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ResourceKind::Image => "image",
            ResourceKind::Video => "video",
            ResourceKind::Audio => "audio",
            ResourceKind::Raw => "auto",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Short-lived authorization for one direct upload to the asset host.
///
/// Issued by the signer per attempt, scoped to a resource kind and folder,
/// and discarded after use; the host is not guaranteed to accept a reused
/// signature. Never persisted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSignature {
    pub signature: String,
    /// Unix seconds at which the signature was issued.
    pub timestamp: i64,
    /// Storage account the upload is addressed to.
    pub cloud_name: String,
    pub api_key: String,
    #[serde(default)]
    pub folder: Option<String>,
}

/// Descriptor of a successfully transferred asset, built from the host's
/// success response. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedAsset {
    pub remote_url: String,
    pub storage_id: String,
    pub resource_kind: ResourceKind,
    pub format: String,
    /// Seconds; present for audio and video assets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

//! Media record models and the application API wire contracts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::asset::ResourceKind;

/// Uploadable content kind on the platform. Blogs and news posts do not go
/// through the upload pipeline and are not represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Video,
    Photo,
    Audio,
    Podcast,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Video => "video",
            ContentKind::Photo => "photo",
            ContentKind::Audio => "audio",
            ContentKind::Podcast => "podcast",
        }
    }

    /// Application API collection segment, e.g. `/api/videos`.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ContentKind::Video => "videos",
            ContentKind::Photo => "photos",
            ContentKind::Audio => "audios",
            ContentKind::Podcast => "podcasts",
        }
    }

    /// Host-side resource kind used for the primary asset transfer.
    pub fn resource_kind(&self) -> ResourceKind {
        match self {
            ContentKind::Video => ResourceKind::Video,
            ContentKind::Photo => ResourceKind::Image,
            ContentKind::Audio | ContentKind::Podcast => ResourceKind::Audio,
        }
    }

    /// MIME prefix the primary file must match, checked before any network
    /// call is made.
    pub fn accepted_mime_prefix(&self) -> &'static str {
        match self {
            ContentKind::Video => "video/",
            ContentKind::Photo => "image/",
            ContentKind::Audio | ContentKind::Podcast => "audio/",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "video" | "videos" => Ok(ContentKind::Video),
            "photo" | "photos" => Ok(ContentKind::Photo),
            "audio" | "audios" => Ok(ContentKind::Audio),
            "podcast" | "podcasts" => Ok(ContentKind::Podcast),
            other => Err(anyhow::anyhow!(
                "Unknown content kind: {}. Must be one of: video, photo, audio, podcast",
                other
            )),
        }
    }
}

/// Persisted media entity as returned by the application API.
///
/// The thumbnail fields are set only after a fully successful secondary
/// upload; a failed thumbnail upload leaves them unset rather than pointing
/// at an asset that does not exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRecord {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub url: String,
    pub public_id: String,
    pub resource_type: ResourceKind,
    pub format: String,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub thumbnail_public_id: Option<String>,
    #[serde(default)]
    pub likes_count: i64,
    #[serde(default)]
    pub comments_count: i64,
    #[serde(default)]
    pub views_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MediaRecord {
    /// True once a secondary (thumbnail) asset has been attached.
    pub fn has_thumbnail(&self) -> bool {
        self.thumbnail_url.is_some()
    }
}

/// Create-record request body, sent after a successful primary upload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMediaRecord {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub public_id: String,
    pub url: String,
    pub resource_type: ResourceKind,
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
}

/// Update body attaching a secondary asset to an existing record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetThumbnail {
    pub thumbnail_url: String,
    pub thumbnail_public_id: String,
}

/// Counter payload returned by the engagement endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementCount {
    pub likes_count: i64,
}

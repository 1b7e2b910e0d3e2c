//! Metadata attacher: persists uploaded-asset descriptors to the
//! application's record store.
//!
//! A failure here is reported as `MetadataPersistFailed`, distinct from the
//! upload errors, so the caller can tell the user "your file uploaded but we
//! couldn't save it" instead of implying total failure.

use tidecast_core::models::{
    AuthContext, ContentKind, CreateMediaRecord, MediaRecord, SetThumbnail, UploadedAsset,
};
use tidecast_core::UploadError;
use uuid::Uuid;

use crate::client::AppClient;

/// Domain fields supplied by the caller for the new record.
#[derive(Debug, Clone)]
pub struct RecordDetails {
    pub title: String,
    pub description: Option<String>,
    pub folder: Option<String>,
}

#[derive(Clone, Debug)]
pub struct MetadataAttacher {
    app: AppClient,
}

impl MetadataAttacher {
    pub fn new(app: AppClient) -> Self {
        Self { app }
    }

    /// Create the media record for a successfully uploaded primary asset.
    #[tracing::instrument(
        skip(self, asset, details),
        fields(kind = %kind, owner_id = %auth.user_id)
    )]
    pub async fn attach_primary(
        &self,
        auth: &AuthContext,
        kind: ContentKind,
        asset: &UploadedAsset,
        details: RecordDetails,
    ) -> Result<MediaRecord, UploadError> {
        let body = CreateMediaRecord {
            title: details.title,
            description: details.description,
            owner_id: auth.user_id,
            public_id: asset.storage_id.clone(),
            url: asset.remote_url.clone(),
            resource_type: asset.resource_kind,
            format: asset.format.clone(),
            duration: asset.duration,
            folder: details.folder,
        };

        let record: MediaRecord = self
            .app
            .post_json(&format!("/api/{}", kind.endpoint()), &body)
            .await
            .map_err(|e| UploadError::MetadataPersistFailed(e.to_string()))?;

        tracing::info!(record_id = %record.id, "Media record created");
        Ok(record)
    }

    /// Set the secondary (thumbnail) asset on an existing record.
    ///
    /// Invoked only after `attach_primary` has returned a record id, and
    /// never concurrently with other writes to the same record; sequencing
    /// alone prevents lost updates.
    #[tracing::instrument(skip(self, asset), fields(kind = %kind, record_id = %record_id))]
    pub async fn attach_secondary(
        &self,
        kind: ContentKind,
        record_id: Uuid,
        asset: &UploadedAsset,
    ) -> Result<MediaRecord, UploadError> {
        let body = SetThumbnail {
            thumbnail_url: asset.remote_url.clone(),
            thumbnail_public_id: asset.storage_id.clone(),
        };

        let record: MediaRecord = self
            .app
            .put_json(&format!("/api/{}/{}", kind.endpoint(), record_id), &body)
            .await
            .map_err(|e| UploadError::MetadataPersistFailed(e.to_string()))?;

        tracing::info!("Thumbnail attached");
        Ok(record)
    }
}

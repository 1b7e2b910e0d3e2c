//! Composed publish flow: primary upload, record creation, and the optional
//! thumbnail upload/attach cycle.
//!
//! Ordering is strict: the thumbnail cycle starts only after the primary
//! record exists, and the two are never run concurrently against the same
//! record. A thumbnail failure is a partial outcome, not an error; the
//! persisted primary record is never rolled back.

use std::sync::Arc;

use anyhow::Result;
use tidecast_core::models::{AuthContext, ContentKind, MediaRecord, ResourceKind};
use tidecast_core::{UploadError, UploaderConfig};
use validator::Validate;

use crate::attacher::{MetadataAttacher, RecordDetails};
use crate::client::{AppClient, Auth};
use crate::executor::UploadExecutor;
use crate::file::FileSource;
use crate::progress::{ProgressGauge, ProgressSink};

/// One piece of content to publish.
#[derive(Debug, Validate)]
pub struct MediaSubmission {
    pub kind: ContentKind,
    pub file: FileSource,
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be between 1 and 200 characters"
    ))]
    pub title: String,
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
    pub folder: Option<String>,
    /// Optional custom thumbnail, uploaded after the primary record exists.
    pub thumbnail: Option<FileSource>,
}

/// Result of a publish. The partial case is a distinct variant so callers
/// cannot forget to check it.
#[derive(Debug)]
pub enum PublishOutcome {
    /// Record persisted; thumbnail attached too if one was supplied.
    Complete(MediaRecord),
    /// Record persisted but the supplied thumbnail did not make it; the
    /// record's thumbnail fields remain unset.
    ThumbnailFailed {
        record: MediaRecord,
        error: UploadError,
    },
}

impl PublishOutcome {
    pub fn record(&self) -> &MediaRecord {
        match self {
            PublishOutcome::Complete(record) => record,
            PublishOutcome::ThumbnailFailed { record, .. } => record,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, PublishOutcome::Complete(_))
    }
}

pub struct Publisher {
    executor: UploadExecutor,
    attacher: MetadataAttacher,
}

impl Publisher {
    pub fn new(config: &UploaderConfig, auth: Auth) -> Result<Self> {
        let executor = UploadExecutor::new(config)?;
        let app = AppClient::new(config, auth)?;
        Ok(Self {
            executor,
            attacher: MetadataAttacher::new(app),
        })
    }

    pub fn from_parts(executor: UploadExecutor, attacher: MetadataAttacher) -> Self {
        Self { executor, attacher }
    }

    /// Publish one submission: upload the primary file, create its record,
    /// then upload and attach the thumbnail if one was supplied.
    ///
    /// Each transfer reports to its own sink; the caller composes the two
    /// streams (e.g. two progress bars).
    #[tracing::instrument(
        skip(self, auth, submission, primary_progress, thumbnail_progress),
        fields(kind = %submission.kind, owner_id = %auth.user_id)
    )]
    pub async fn publish(
        &self,
        auth: &AuthContext,
        submission: MediaSubmission,
        primary_progress: Arc<dyn ProgressSink>,
        thumbnail_progress: Arc<dyn ProgressSink>,
    ) -> Result<PublishOutcome, UploadError> {
        submission
            .validate()
            .map_err(|e| UploadError::InvalidInput(format!("Validation error: {}", e)))?;

        let MediaSubmission {
            kind,
            file,
            title,
            description,
            folder,
            thumbnail,
        } = submission;

        let primary_gauge = ProgressGauge::new(primary_progress);
        let asset = self
            .executor
            .execute(
                &file,
                kind.resource_kind(),
                folder.as_deref(),
                Some(kind.accepted_mime_prefix()),
                &primary_gauge,
            )
            .await?;

        primary_gauge.persisting();
        let details = RecordDetails {
            title,
            description,
            folder: folder.clone(),
        };
        let record = match self.attacher.attach_primary(auth, kind, &asset, details).await {
            Ok(record) => record,
            Err(e) => {
                primary_gauge.failed();
                return Err(e);
            }
        };
        primary_gauge.done();

        let Some(thumbnail_file) = thumbnail else {
            return Ok(PublishOutcome::Complete(record));
        };

        let thumb_gauge = ProgressGauge::new(thumbnail_progress);
        let thumb_asset = match self
            .executor
            .execute(
                &thumbnail_file,
                ResourceKind::Image,
                folder.as_deref(),
                Some("image/"),
                &thumb_gauge,
            )
            .await
        {
            Ok(asset) => asset,
            Err(error) => {
                tracing::warn!(
                    record_id = %record.id,
                    error = %error,
                    "Thumbnail upload failed; record kept without thumbnail"
                );
                return Ok(PublishOutcome::ThumbnailFailed { record, error });
            }
        };

        thumb_gauge.persisting();
        match self
            .attacher
            .attach_secondary(kind, record.id, &thumb_asset)
            .await
        {
            Ok(updated) => {
                thumb_gauge.done();
                Ok(PublishOutcome::Complete(updated))
            }
            Err(error) => {
                thumb_gauge.failed();
                tracing::warn!(
                    record_id = %record.id,
                    error = %error,
                    "Thumbnail attach failed; record kept without thumbnail"
                );
                Ok(PublishOutcome::ThumbnailFailed { record, error })
            }
        }
    }
}

//! Tidecast upload pipeline.
//!
//! Client-driven signed direct uploads with two-phase metadata attachment:
//! acquire a one-use signature from the signer, stream the file straight to
//! the cloud asset host with progress ticks, persist the media record
//! through the application API, and optionally run a second cycle for a
//! custom thumbnail.

pub mod attacher;
pub mod client;
pub mod engagement;
pub mod executor;
pub mod file;
pub mod progress;
pub mod publisher;
pub mod signer;

pub use attacher::{MetadataAttacher, RecordDetails};
pub use client::{AppClient, Auth};
pub use engagement::{Engagement, OptimisticCounter};
pub use executor::UploadExecutor;
pub use file::FileSource;
pub use progress::{NoopProgress, ProgressGauge, ProgressSink};
pub use publisher::{MediaSubmission, PublishOutcome, Publisher};
pub use signer::SignerClient;

// Re-export core types used throughout the public API.
pub use tidecast_core::models::{
    AuthContext, ContentKind, MediaRecord, ResourceKind, Role, UploadPhase, UploadProgress,
    UploadedAsset,
};
pub use tidecast_core::{UploadError, UploaderConfig};

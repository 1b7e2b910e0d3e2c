//! Domain models shared across the upload pipeline.

pub mod asset;
pub mod auth;
pub mod progress;
pub mod record;

pub use asset::{ResourceKind, UploadSignature, UploadedAsset};
pub use auth::{AuthContext, Role};
pub use progress::{UploadPhase, UploadProgress};
pub use record::{ContentKind, CreateMediaRecord, EngagementCount, MediaRecord, SetThumbnail};

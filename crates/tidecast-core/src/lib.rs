//! Tidecast Core Library
//!
//! This crate provides the domain models, error taxonomy, and configuration
//! shared across the Tidecast upload pipeline components. It contains no
//! network code; the pipeline itself lives in `tidecast-uploader`.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::UploaderConfig;
pub use error::UploadError;
pub use models::{
    AuthContext, ContentKind, MediaRecord, ResourceKind, Role, UploadPhase, UploadProgress,
    UploadSignature, UploadedAsset,
};

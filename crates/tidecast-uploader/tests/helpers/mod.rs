//! Shared fixtures for the upload pipeline integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use tidecast_core::models::{UploadPhase, UploadProgress};
use tidecast_core::UploaderConfig;
use tidecast_uploader::ProgressSink;
use uuid::Uuid;

/// Signer path mounted on the mock server.
pub const SIGNER_PATH: &str = "/sign/upload";

/// Config pointing every collaborator (signer, asset host, application API)
/// at the same mock server.
pub fn test_config(server_url: &str) -> UploaderConfig {
    let mut config = UploaderConfig::new(format!("{}{}", server_url, SIGNER_PATH), server_url);
    config.upload_base_url = server_url.trim_end_matches('/').to_string();
    config
}

/// Canned signer success body matching the mock host account "demo".
pub fn signature_body() -> &'static str {
    r#"{"signature":"abc","timestamp":1700000000,"cloudName":"demo","apiKey":"123"}"#
}

/// Canned host success body for a video transfer.
pub fn video_host_body() -> &'static str {
    r#"{"secure_url":"https://res.cloudinary.com/demo/video/upload/x.mp4","public_id":"x","resource_type":"video","format":"mp4","duration":12.5}"#
}

/// Canned host success body for an image (thumbnail) transfer.
pub fn image_host_body() -> &'static str {
    r#"{"secure_url":"https://res.cloudinary.com/demo/image/upload/t.jpg","public_id":"t","resource_type":"image","format":"jpg"}"#
}

/// Application API record body, with or without thumbnail fields set.
pub fn record_json(id: Uuid, with_thumbnail: bool) -> String {
    let thumb = if with_thumbnail {
        r#""thumbnailUrl":"https://res.cloudinary.com/demo/image/upload/t.jpg","thumbnailPublicId":"t","#
    } else {
        ""
    };
    format!(
        r#"{{"id":"{id}","title":"Harbor at dawn","description":"Morning swell off the breakwater","ownerId":"7f9c1b2a-0d4e-4b1a-9a66-0e1c2d3f4a5b","url":"https://res.cloudinary.com/demo/video/upload/x.mp4","publicId":"x","resourceType":"video","format":"mp4","duration":12.5,{thumb}"likesCount":0,"commentsCount":0,"viewsCount":0,"createdAt":"2024-01-15T08:30:00Z","updatedAt":"2024-01-15T08:30:00Z"}}"#
    )
}

/// Progress sink collecting every tick for later assertions.
pub struct ProgressRecorder {
    ticks: Mutex<Vec<UploadProgress>>,
}

impl ProgressRecorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            ticks: Mutex::new(Vec::new()),
        })
    }

    pub fn ticks(&self) -> Vec<UploadProgress> {
        self.ticks.lock().unwrap().clone()
    }

    pub fn last(&self) -> UploadProgress {
        *self.ticks().last().expect("no progress was reported")
    }

    /// Assert every tick is within [0, 100] and never decreases.
    pub fn assert_monotone(&self) {
        let ticks = self.ticks();
        let mut last = 0u8;
        for tick in &ticks {
            assert!(tick.percent <= 100, "percent out of range: {:?}", ticks);
            assert!(
                tick.percent >= last,
                "progress went backwards: {:?}",
                ticks
            );
            last = tick.percent;
        }
    }

    pub fn assert_finished(&self, phase: UploadPhase, percent: u8) {
        let last = self.last();
        assert_eq!(last.phase, phase, "ticks: {:?}", self.ticks());
        assert_eq!(last.percent, percent, "ticks: {:?}", self.ticks());
    }
}

impl ProgressSink for ProgressRecorder {
    fn report(&self, progress: UploadProgress) {
        self.ticks.lock().unwrap().push(progress);
    }
}

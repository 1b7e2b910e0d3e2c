//! Upload executor integration tests against a mock signer and asset host.

mod helpers;

use helpers::{signature_body, test_config, video_host_body, ProgressRecorder, SIGNER_PATH};
use mockito::{Matcher, Server};
use tidecast_core::models::{ResourceKind, UploadPhase};
use tidecast_uploader::{FileSource, ProgressGauge, UploadExecutor};

fn video_file() -> FileSource {
    FileSource::new(vec![0u8; 2 * 1024 * 1024], "x.mp4", "video/mp4")
}

#[tokio::test]
async fn uploads_video_and_returns_asset() {
    let mut server = Server::new_async().await;

    let signer = server
        .mock("POST", SIGNER_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(signature_body())
        .create_async()
        .await;
    let host = server
        .mock("POST", "/v1_1/demo/video/upload")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(video_host_body())
        .create_async()
        .await;

    let config = test_config(&server.url());
    let executor = UploadExecutor::new(&config).unwrap();
    let recorder = ProgressRecorder::new();
    let gauge = ProgressGauge::new(recorder.clone());

    let asset = executor
        .execute(
            &video_file(),
            ResourceKind::Video,
            None,
            Some("video/"),
            &gauge,
        )
        .await
        .unwrap();

    assert_eq!(
        asset.remote_url,
        "https://res.cloudinary.com/demo/video/upload/x.mp4"
    );
    assert_eq!(asset.storage_id, "x");
    assert_eq!(asset.resource_kind, ResourceKind::Video);
    assert_eq!(asset.format, "mp4");
    assert_eq!(asset.duration, Some(12.5));

    signer.assert_async().await;
    host.assert_async().await;

    // Transfer progress climbed to 100 without going backwards.
    recorder.assert_monotone();
    let ticks = recorder.ticks();
    assert_eq!(ticks.first().unwrap().phase, UploadPhase::Signing);
    assert_eq!(ticks.last().unwrap().phase, UploadPhase::Transferring);
    assert_eq!(ticks.last().unwrap().percent, 100);
}

#[tokio::test]
async fn signer_failure_aborts_before_any_transfer() {
    let mut server = Server::new_async().await;

    let signer = server
        .mock("POST", SIGNER_PATH)
        .with_status(500)
        .with_body("signer exploded")
        .create_async()
        .await;
    // No multipart request may ever reach the host.
    let host = server
        .mock("POST", Matcher::Regex("^/v1_1/.*".to_string()))
        .expect(0)
        .create_async()
        .await;

    let config = test_config(&server.url());
    let executor = UploadExecutor::new(&config).unwrap();
    let recorder = ProgressRecorder::new();
    let gauge = ProgressGauge::new(recorder.clone());

    let err = executor
        .execute(
            &video_file(),
            ResourceKind::Video,
            None,
            Some("video/"),
            &gauge,
        )
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "SIGNATURE_UNAVAILABLE");
    assert_eq!(recorder.last().phase, UploadPhase::Failed);

    signer.assert_async().await;
    host.assert_async().await;
}

#[tokio::test]
async fn host_success_without_url_is_invalid_response() {
    let mut server = Server::new_async().await;

    let _m1 = server
        .mock("POST", SIGNER_PATH)
        .with_status(200)
        .with_body(signature_body())
        .create_async()
        .await;
    let _m2 = server
        .mock("POST", "/v1_1/demo/video/upload")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"public_id":"x","resource_type":"video","format":"mp4"}"#)
        .create_async()
        .await;

    let config = test_config(&server.url());
    let executor = UploadExecutor::new(&config).unwrap();
    let recorder = ProgressRecorder::new();
    let gauge = ProgressGauge::new(recorder.clone());

    let err = executor
        .execute(
            &video_file(),
            ResourceKind::Video,
            None,
            Some("video/"),
            &gauge,
        )
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "INVALID_HOST_RESPONSE");
    assert_eq!(recorder.last().phase, UploadPhase::Failed);
}

#[tokio::test]
async fn host_rejection_surfaces_host_message() {
    let mut server = Server::new_async().await;

    let _m3 = server
        .mock("POST", SIGNER_PATH)
        .with_status(200)
        .with_body(signature_body())
        .create_async()
        .await;
    let _m4 = server
        .mock("POST", "/v1_1/demo/video/upload")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":{"message":"Invalid signature"}}"#)
        .create_async()
        .await;

    let config = test_config(&server.url());
    let executor = UploadExecutor::new(&config).unwrap();
    let recorder = ProgressRecorder::new();
    let gauge = ProgressGauge::new(recorder.clone());

    let err = executor
        .execute(
            &video_file(),
            ResourceKind::Video,
            None,
            Some("video/"),
            &gauge,
        )
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "UPLOAD_REJECTED");
    assert!(err.to_string().contains("Invalid signature"));
}

#[tokio::test]
async fn invalid_input_makes_no_network_calls() {
    let mut server = Server::new_async().await;

    let signer = server
        .mock("POST", SIGNER_PATH)
        .expect(0)
        .create_async()
        .await;
    let host = server
        .mock("POST", Matcher::Regex("^/v1_1/.*".to_string()))
        .expect(0)
        .create_async()
        .await;

    let config = test_config(&server.url());
    let executor = UploadExecutor::new(&config).unwrap();

    // Empty file.
    let recorder = ProgressRecorder::new();
    let gauge = ProgressGauge::new(recorder.clone());
    let empty = FileSource::new(Vec::<u8>::new(), "x.mp4", "video/mp4");
    let err = executor
        .execute(&empty, ResourceKind::Video, None, Some("video/"), &gauge)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_INPUT");

    // Wrong MIME prefix.
    let gauge = ProgressGauge::new(ProgressRecorder::new());
    let pdf = FileSource::new(vec![1u8; 16], "doc.pdf", "application/pdf");
    let err = executor
        .execute(&pdf, ResourceKind::Video, None, Some("video/"), &gauge)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_INPUT");

    signer.assert_async().await;
    host.assert_async().await;
}

#[tokio::test]
async fn progress_ticks_once_per_chunk_and_reaches_100() {
    let mut server = Server::new_async().await;

    let _m5 = server
        .mock("POST", SIGNER_PATH)
        .with_status(200)
        .with_body(signature_body())
        .create_async()
        .await;
    let _m6 = server
        .mock("POST", "/v1_1/demo/video/upload")
        .with_status(200)
        .with_body(video_host_body())
        .create_async()
        .await;

    let mut config = test_config(&server.url());
    config.chunk_bytes = 1024; // force many ticks

    let executor = UploadExecutor::new(&config).unwrap();
    let recorder = ProgressRecorder::new();
    let gauge = ProgressGauge::new(recorder.clone());

    let file = FileSource::new(vec![0u8; 10 * 1024], "x.mp4", "video/mp4");
    executor
        .execute(&file, ResourceKind::Video, None, Some("video/"), &gauge)
        .await
        .unwrap();

    recorder.assert_monotone();
    let transfer_ticks = recorder
        .ticks()
        .iter()
        .filter(|t| t.phase == UploadPhase::Transferring)
        .count();
    assert!(
        transfer_ticks >= 10,
        "expected a tick per chunk, got {}",
        transfer_ticks
    );
    assert_eq!(recorder.last().percent, 100);
}

#[tokio::test]
async fn folder_is_forwarded_to_the_signer() {
    let mut server = Server::new_async().await;

    let signer = server
        .mock("POST", SIGNER_PATH)
        .match_body(Matcher::JsonString(
            r#"{"resourceType":"image","folder":"harbors"}"#.to_string(),
        ))
        .with_status(200)
        .with_body(signature_body())
        .create_async()
        .await;
    let host = server
        .mock("POST", "/v1_1/demo/image/upload")
        .with_status(200)
        .with_body(
            r#"{"secure_url":"https://res.cloudinary.com/demo/image/upload/h.jpg","public_id":"h","resource_type":"image","format":"jpg"}"#,
        )
        .create_async()
        .await;

    let config = test_config(&server.url());
    let executor = UploadExecutor::new(&config).unwrap();
    let gauge = ProgressGauge::new(ProgressRecorder::new());

    let file = FileSource::new(vec![1u8; 64], "h.jpg", "image/jpeg");
    let asset = executor
        .execute(
            &file,
            ResourceKind::Image,
            Some("harbors"),
            Some("image/"),
            &gauge,
        )
        .await
        .unwrap();

    assert_eq!(asset.storage_id, "h");
    signer.assert_async().await;
    host.assert_async().await;
}

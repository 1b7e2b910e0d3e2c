//! Error types module
//!
//! Every failure of the upload pipeline is represented by the `UploadError`
//! enum. The variants are deliberately coarse: each one corresponds to a
//! distinct user-facing outcome (bad file, signer down, transfer failed,
//! host said no, host response unusable, record not saved, timed out), so a
//! caller can always render a meaningful message without string-matching.

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The file failed client-side validation; no network call was made.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The signer rejected the request or was unreachable. The transfer is
    /// never attempted without a signature.
    #[error("Upload signature unavailable: {0}")]
    SignatureUnavailable(String),

    /// The transfer to the asset host failed at the transport level.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The asset host returned a non-success status for the transfer.
    #[error("Upload rejected by host: {0}")]
    UploadRejected(String),

    /// The host reported success but the response body was unusable. The
    /// bytes were transferred; the caller cannot trust the asset metadata.
    #[error("Invalid host response: {0}")]
    InvalidHostResponse(String),

    /// The application API rejected the record create/update. The asset
    /// itself uploaded fine; only the metadata save failed.
    #[error("Failed to save media record: {0}")]
    MetadataPersistFailed(String),

    /// The request exceeded the configured client timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),
}

impl UploadError {
    /// Machine-readable error code, stable across releases.
    pub fn error_code(&self) -> &'static str {
        match self {
            UploadError::InvalidInput(_) => "INVALID_INPUT",
            UploadError::SignatureUnavailable(_) => "SIGNATURE_UNAVAILABLE",
            UploadError::NetworkError(_) => "NETWORK_ERROR",
            UploadError::UploadRejected(_) => "UPLOAD_REJECTED",
            UploadError::InvalidHostResponse(_) => "INVALID_HOST_RESPONSE",
            UploadError::MetadataPersistFailed(_) => "METADATA_PERSIST_FAILED",
            UploadError::Timeout(_) => "TIMEOUT",
        }
    }

    /// Whether re-running the whole flow may succeed. Retry is always
    /// manual; there is no automatic retry anywhere in the pipeline.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            UploadError::SignatureUnavailable(_)
                | UploadError::NetworkError(_)
                | UploadError::MetadataPersistFailed(_)
                | UploadError::Timeout(_)
        )
    }

    /// Client-facing message suitable for an inline error display.
    pub fn client_message(&self) -> String {
        match self {
            UploadError::InvalidInput(msg) => msg.clone(),
            UploadError::SignatureUnavailable(_) => {
                "Could not authorize the upload. Please try again.".to_string()
            }
            UploadError::NetworkError(_) => {
                "The upload failed due to a network problem.".to_string()
            }
            UploadError::UploadRejected(msg) => msg.clone(),
            UploadError::InvalidHostResponse(_) => {
                "The file was transferred but could not be verified.".to_string()
            }
            UploadError::MetadataPersistFailed(_) => {
                "Your file uploaded but we couldn't save it.".to_string()
            }
            UploadError::Timeout(_) => "The upload timed out.".to_string(),
        }
    }
}

//! Transfer progress reporting types.
//!
//! `UploadProgress` values are transient; they exist only for the duration
//! of one transfer and are never persisted.

use serde::{Deserialize, Serialize};

/// Phase of a single file transfer.
///
/// `Done` and `Failed` are terminal; there are no transitions out of either.
/// `Failed` may be entered from any non-terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadPhase {
    Signing,
    Transferring,
    Persisting,
    Done,
    Failed,
}

impl UploadPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, UploadPhase::Done | UploadPhase::Failed)
    }
}

impl std::fmt::Display for UploadPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UploadPhase::Signing => "signing",
            UploadPhase::Transferring => "transferring",
            UploadPhase::Persisting => "persisting",
            UploadPhase::Done => "done",
            UploadPhase::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// One progress tick for one transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadProgress {
    /// Percent complete, 0 to 100.
    pub percent: u8,
    pub phase: UploadPhase,
}

impl UploadProgress {
    pub fn new(phase: UploadPhase, percent: u8) -> Self {
        Self {
            percent: percent.min(100),
            phase,
        }
    }
}

//! Progress reporting surface.
//!
//! UI-agnostic: callers hand the pipeline a `ProgressSink` and render ticks
//! however they like. Each transfer gets its own independent sink; composing
//! several bars (primary plus thumbnail) is the caller's concern.

use std::sync::{Arc, Mutex};

use tidecast_core::models::{UploadPhase, UploadProgress};

/// Receiver for progress ticks of one transfer.
///
/// Implementations must tolerate being called from the transfer task.
pub trait ProgressSink: Send + Sync {
    fn report(&self, progress: UploadProgress);
}

impl<F> ProgressSink for F
where
    F: Fn(UploadProgress) + Send + Sync,
{
    fn report(&self, progress: UploadProgress) {
        self(progress)
    }
}

/// Sink that discards all ticks.
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn report(&self, _progress: UploadProgress) {}
}

fn rank(phase: UploadPhase) -> u8 {
    match phase {
        UploadPhase::Signing => 0,
        UploadPhase::Transferring => 1,
        UploadPhase::Persisting => 2,
        UploadPhase::Done | UploadPhase::Failed => 3,
    }
}

struct GaugeState {
    phase: UploadPhase,
    percent: u8,
    terminal: bool,
}

/// Per-transfer progress gauge enforcing the transfer state machine.
///
/// Guarantees observed by the sink: percent is within [0, 100] and
/// monotonically non-decreasing; phases only move forward (signing,
/// transferring, persisting, done/failed); nothing is emitted after a
/// terminal phase.
#[derive(Clone)]
pub struct ProgressGauge {
    sink: Arc<dyn ProgressSink>,
    state: Arc<Mutex<GaugeState>>,
}

impl ProgressGauge {
    pub fn new(sink: Arc<dyn ProgressSink>) -> Self {
        Self {
            sink,
            state: Arc::new(Mutex::new(GaugeState {
                phase: UploadPhase::Signing,
                percent: 0,
                terminal: false,
            })),
        }
    }

    fn emit(&self, phase: UploadPhase, percent: u8) {
        let progress = {
            let Ok(mut state) = self.state.lock() else {
                return;
            };
            if state.terminal {
                return;
            }
            if rank(phase) < rank(state.phase) {
                return;
            }
            let percent = percent.min(100).max(state.percent);
            state.phase = phase;
            state.percent = percent;
            state.terminal = phase.is_terminal();
            UploadProgress::new(phase, percent)
        };
        self.sink.report(progress);
    }

    pub fn signing(&self) {
        self.emit(UploadPhase::Signing, 0);
    }

    /// Report bytes handed to the transport out of the transfer total.
    pub fn transferred(&self, sent: u64, total: u64) {
        let percent = if total == 0 {
            100
        } else {
            (sent.saturating_mul(100) / total).min(100) as u8
        };
        self.emit(UploadPhase::Transferring, percent);
    }

    pub fn persisting(&self) {
        self.emit(UploadPhase::Persisting, 100);
    }

    pub fn done(&self) {
        self.emit(UploadPhase::Done, 100);
    }

    pub fn failed(&self) {
        let Ok(state) = self.state.lock() else {
            return;
        };
        let percent = state.percent;
        drop(state);
        self.emit(UploadPhase::Failed, percent);
    }
}

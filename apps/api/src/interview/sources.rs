//! Pluggable device sources.
//!
//! The browser owns the actual microphone and camera; it relays start/stop
//! outcomes and transcript text as session events. Server-side, each session
//! still talks to the devices through these traits so the flow engine can be
//! driven by scripted sources in tests.

use async_trait::async_trait;

use crate::interview::flow::StartFailure;

/// Lifecycle status of a device source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    Inactive,
    Active,
    Denied,
    Failed,
}

/// Speech-to-text source. `start` is called once per recording attempt;
/// incremental transcript text arrives as session events, not through this
/// trait.
#[async_trait]
pub trait TranscriptionSource: Send + Sync {
    async fn start(&self) -> Result<(), StartFailure>;
    async fn stop(&self);
}

/// Optional camera source. Failure here never blocks the interview; denial
/// and device failure map to [`SourceStatus::Denied`] and
/// [`SourceStatus::Failed`] respectively.
#[async_trait]
pub trait CameraSource: Send + Sync {
    async fn start(&self) -> Result<(), StartFailure>;
    async fn stop(&self);
}

/// Browser-relayed transcription: the client already holds the microphone, so
/// server-side start/stop always succeed and the real outcome arrives later
/// as `recording_started` / `source_error` events.
pub struct RelayTranscription;

#[async_trait]
impl TranscriptionSource for RelayTranscription {
    async fn start(&self) -> Result<(), StartFailure> {
        Ok(())
    }

    async fn stop(&self) {}
}

/// Browser-relayed camera, same contract as [`RelayTranscription`].
pub struct RelayCamera;

#[async_trait]
impl CameraSource for RelayCamera {
    async fn start(&self) -> Result<(), StartFailure> {
        Ok(())
    }

    async fn stop(&self) {}
}

#[cfg(test)]
pub mod scripted {
    //! Deterministic sources for flow-engine tests.

    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Transcription source that fails the first `deny_first` start attempts
    /// and counts stops.
    pub struct ScriptedTranscription {
        deny_first: usize,
        starts: AtomicUsize,
        stops: AtomicUsize,
    }

    impl ScriptedTranscription {
        pub fn always_ok() -> Self {
            Self::denying_first(0)
        }

        pub fn denying_first(deny_first: usize) -> Self {
            Self {
                deny_first,
                starts: AtomicUsize::new(0),
                stops: AtomicUsize::new(0),
            }
        }

        pub fn stop_count(&self) -> usize {
            self.stops.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TranscriptionSource for ScriptedTranscription {
        async fn start(&self) -> Result<(), StartFailure> {
            let attempt = self.starts.fetch_add(1, Ordering::SeqCst);
            if attempt < self.deny_first {
                Err(StartFailure::PermissionDenied)
            } else {
                Ok(())
            }
        }

        async fn stop(&self) {
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Camera source with a fixed outcome.
    pub struct ScriptedCamera {
        pub fail: Option<StartFailure>,
    }

    #[async_trait]
    impl CameraSource for ScriptedCamera {
        async fn start(&self) -> Result<(), StartFailure> {
            match self.fail {
                Some(reason) => Err(reason),
                None => Ok(()),
            }
        }

        async fn stop(&self) {}
    }
}

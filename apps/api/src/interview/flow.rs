//! Interview flow state machine.
//!
//! Single-writer pattern: every transition goes through `reduce()`, which
//! returns the next state and a list of effects for the session engine to
//! execute (timer lifecycle, device stop, notices, answer commit, scoring
//! handoff). The reducer never touches devices, timers, or the answer list
//! itself, so the whole turn-taking flow can be tested by feeding a scripted
//! event sequence.

use serde::Serialize;

/// Recording-duration policy for one session.
#[derive(Debug, Clone, Copy)]
pub struct FlowPolicy {
    /// A recording may not be stopped manually before this many seconds.
    pub min_secs: u32,
    /// Reaching this many seconds forces an automatic stop.
    pub max_secs: u32,
}

/// Why the transcription source could not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartFailure {
    PermissionDenied,
    DeviceUnavailable,
}

/// Flow state. Exactly one question is active at a time; `index` is 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum FlowState {
    NotStarted,
    AwaitingRecordingStart {
        index: usize,
    },
    Recording {
        index: usize,
        elapsed: u32,
        /// Identifies one recording attempt; ticks from a previous attempt
        /// are dropped by epoch mismatch.
        #[serde(skip)]
        epoch: u64,
    },
    ReadyToSubmit {
        index: usize,
        #[serde(skip)]
        duration: u32,
    },
    Submitting {
        index: usize,
    },
    Finished,
}

impl Default for FlowState {
    fn default() -> Self {
        FlowState::NotStarted
    }
}

/// Events that drive transitions. User actions, timer ticks, and source
/// outcomes all arrive through this one type.
#[derive(Debug, Clone)]
pub enum FlowEvent {
    /// "Begin interview". `camera_warning` carries a message when optional
    /// camera acquisition failed (never blocks progression).
    Begin { camera_warning: Option<String> },
    /// The transcription source reported a successful start.
    RecordingStarted { epoch: u64 },
    /// The transcription source refused to start.
    RecordingRefused { reason: StartFailure },
    /// Incremental transcript text from the source.
    Transcript { text: String },
    /// One-second timer tick for the given recording epoch.
    Tick { epoch: u64 },
    /// User asked to stop recording.
    StopRequested,
    /// The source failed while recording.
    SourceFailed { message: String },
    /// "Next question" with a snapshot of the working transcript.
    Submit { transcript: String },
    /// The engine appended the answer; `last` marks the final question.
    AnswerCommitted { last: bool },
}

/// Effects for the session engine to execute after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowEffect {
    StartTicker { epoch: u64 },
    StopTicker,
    StopTranscription,
    /// Replace the working transcript with the source's latest text.
    UpdateTranscript { text: String },
    ClearTranscript,
    Notice { level: NoticeLevel, message: String },
    /// Append `{question[index], transcript, duration}` to the answer list.
    CommitAnswer { index: usize, duration: u32 },
    /// Invoke the completion handoff with the full answer list. Emitted
    /// exactly once, on entering `Finished`.
    Handoff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

fn notice(level: NoticeLevel, message: impl Into<String>) -> FlowEffect {
    FlowEffect::Notice {
        level,
        message: message.into(),
    }
}

/// Reducer: `(state, event) -> (next_state, effects)`.
///
/// Rules: refused transitions keep the current state and surface a notice;
/// events that make no sense in the current state are dropped; ticks with a
/// stale epoch are dropped.
pub fn reduce(policy: &FlowPolicy, state: &FlowState, event: FlowEvent) -> (FlowState, Vec<FlowEffect>) {
    use FlowEffect::*;
    use FlowEvent::*;
    use FlowState::*;

    match (state, event) {
        // -----------------
        // NotStarted
        // -----------------
        (NotStarted, Begin { camera_warning }) => {
            let effects = match camera_warning {
                Some(message) => vec![notice(NoticeLevel::Warning, message)],
                None => vec![],
            };
            (AwaitingRecordingStart { index: 0 }, effects)
        }

        // -----------------
        // AwaitingRecordingStart
        // -----------------
        (AwaitingRecordingStart { index }, RecordingStarted { epoch }) => (
            Recording {
                index: *index,
                elapsed: 0,
                epoch,
            },
            vec![StartTicker { epoch }],
        ),
        (AwaitingRecordingStart { .. }, RecordingRefused { reason }) => {
            let message = match reason {
                StartFailure::PermissionDenied => {
                    "Microphone access is required for the interview"
                }
                StartFailure::DeviceUnavailable => {
                    "There was an error with speech recognition"
                }
            };
            (state.clone(), vec![notice(NoticeLevel::Error, message)])
        }

        // -----------------
        // Recording
        // -----------------
        (
            Recording {
                index,
                elapsed,
                epoch,
            },
            Tick { epoch: tick_epoch },
        ) if *epoch == tick_epoch => {
            let elapsed = elapsed + 1;
            if elapsed >= policy.max_secs {
                // Forced stop; the minimum no longer applies.
                (
                    ReadyToSubmit {
                        index: *index,
                        duration: elapsed,
                    },
                    vec![
                        StopTicker,
                        StopTranscription,
                        notice(
                            NoticeLevel::Info,
                            format!(
                                "Maximum recording time of {}s reached",
                                policy.max_secs
                            ),
                        ),
                    ],
                )
            } else {
                (
                    Recording {
                        index: *index,
                        elapsed,
                        epoch: *epoch,
                    },
                    vec![],
                )
            }
        }
        // Stale tick from a previous recording attempt.
        (Recording { .. }, Tick { .. }) => (state.clone(), vec![]),

        (Recording { .. }, Transcript { text }) => {
            (state.clone(), vec![UpdateTranscript { text }])
        }

        (
            Recording {
                index, elapsed, ..
            },
            StopRequested,
        ) => {
            if *elapsed < policy.min_secs {
                (
                    state.clone(),
                    vec![notice(
                        NoticeLevel::Warning,
                        format!(
                            "Please record for at least {}s before stopping ({}s so far)",
                            policy.min_secs, elapsed
                        ),
                    )],
                )
            } else {
                (
                    ReadyToSubmit {
                        index: *index,
                        duration: *elapsed,
                    },
                    vec![StopTicker, StopTranscription],
                )
            }
        }

        // Source error mid-recording: back to AwaitingRecordingStart with the
        // working transcript preserved (the engine keeps it).
        (Recording { index, .. }, SourceFailed { message }) => (
            AwaitingRecordingStart { index: *index },
            vec![
                StopTicker,
                StopTranscription,
                notice(
                    NoticeLevel::Error,
                    format!("Speech recognition failed: {message}"),
                ),
            ],
        ),

        // -----------------
        // ReadyToSubmit
        // -----------------
        (
            ReadyToSubmit { index, duration },
            Submit { transcript },
        ) => {
            if transcript.trim().is_empty() {
                (
                    state.clone(),
                    vec![notice(
                        NoticeLevel::Warning,
                        "Your answer is empty; record a response before moving on",
                    )],
                )
            } else {
                (
                    Submitting { index: *index },
                    vec![CommitAnswer {
                        index: *index,
                        duration: *duration,
                    }],
                )
            }
        }

        // -----------------
        // Submitting
        // -----------------
        (Submitting { index }, AnswerCommitted { last }) => {
            if last {
                (Finished, vec![Handoff])
            } else {
                (
                    AwaitingRecordingStart { index: index + 1 },
                    vec![ClearTranscript],
                )
            }
        }

        // -----------------
        // Everything else: no transition
        // -----------------
        _ => (state.clone(), vec![]),
    }
}

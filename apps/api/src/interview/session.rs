//! One interview session: the flow engine around the reducer.
//!
//! A `Session` owns the question list, the growing answer list, the working
//! transcript, and the current [`FlowState`]. Commands arrive from the HTTP
//! layer (or from internal timer/scoring tasks), get translated into flow
//! events, and the resulting effects are executed here. Effects that need to
//! spawn tasks against the store are returned as [`Deferred`] actions.

use std::collections::VecDeque;
use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::interview::flow::{
    self, FlowEffect, FlowEvent, FlowPolicy, FlowState, NoticeLevel, StartFailure,
};
use crate::interview::sources::{CameraSource, SourceStatus, TranscriptionSource};
use crate::models::{Answer, Profile, Question, Report};

/// Commands accepted by a session. `Tick` and `ScoringDone` are internal:
/// they are produced by spawned tasks, never taken off the wire.
#[derive(Debug, Clone)]
pub enum SessionCommand {
    Begin,
    StartRecording,
    Transcript { text: String },
    SourceError { message: String },
    StopRecording,
    Submit,
    ToggleCamera,
    Tick { epoch: u64 },
    ScoringDone(Result<Report, String>),
}

/// Follow-up work the store performs after a command, outside this module.
#[derive(Debug)]
pub enum Deferred {
    SpawnTicker { epoch: u64 },
    SpawnScoring { answers: Vec<Answer> },
}

/// User-facing message accumulated during the session.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Client-facing snapshot of a session.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub candidate: String,
    #[serde(flatten)]
    pub state: FlowState,
    pub question_count: usize,
    pub current_question: Option<Question>,
    pub answered: usize,
    pub transcript: String,
    pub camera: SourceStatus,
    pub notices: Vec<Notice>,
    pub report_ready: bool,
}

pub struct Session {
    pub id: Uuid,
    pub profile: Profile,
    pub questions: Vec<Question>,
    pub answers: Vec<Answer>,
    pub state: FlowState,
    pub report: Option<Report>,
    transcript: String,
    notices: Vec<Notice>,
    video_requested: bool,
    camera_status: SourceStatus,
    policy: FlowPolicy,
    epoch_counter: u64,
    ticker: Option<JoinHandle<()>>,
    transcription: Arc<dyn TranscriptionSource>,
    camera: Arc<dyn CameraSource>,
}

impl Session {
    pub fn new(
        profile: Profile,
        questions: Vec<Question>,
        video_requested: bool,
        policy: FlowPolicy,
        transcription: Arc<dyn TranscriptionSource>,
        camera: Arc<dyn CameraSource>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            profile,
            questions,
            answers: Vec::new(),
            state: FlowState::NotStarted,
            report: None,
            transcript: String::new(),
            notices: Vec::new(),
            video_requested,
            camera_status: SourceStatus::Inactive,
            policy,
            epoch_counter: 0,
            ticker: None,
            transcription,
            camera,
        }
    }

    pub async fn apply(&mut self, command: SessionCommand) -> Vec<Deferred> {
        match command {
            SessionCommand::Begin => {
                if !matches!(self.state, FlowState::NotStarted) {
                    return vec![];
                }
                let camera_warning = if self.video_requested {
                    match self.camera.start().await {
                        Ok(()) => {
                            self.camera_status = SourceStatus::Active;
                            None
                        }
                        Err(reason) => {
                            self.camera_status = camera_status_for(reason);
                            Some(format!(
                                "Continuing without video: {}",
                                camera_failure_message(reason)
                            ))
                        }
                    }
                } else {
                    None
                };
                self.dispatch(FlowEvent::Begin { camera_warning }).await
            }
            SessionCommand::StartRecording => {
                if !matches!(self.state, FlowState::AwaitingRecordingStart { .. }) {
                    return vec![];
                }
                match self.transcription.start().await {
                    Ok(()) => {
                        self.epoch_counter += 1;
                        let epoch = self.epoch_counter;
                        self.dispatch(FlowEvent::RecordingStarted { epoch }).await
                    }
                    Err(reason) => {
                        self.dispatch(FlowEvent::RecordingRefused { reason }).await
                    }
                }
            }
            SessionCommand::Transcript { text } => {
                self.dispatch(FlowEvent::Transcript { text }).await
            }
            SessionCommand::SourceError { message } => {
                self.dispatch(FlowEvent::SourceFailed { message }).await
            }
            SessionCommand::StopRecording => self.dispatch(FlowEvent::StopRequested).await,
            SessionCommand::Submit => {
                let transcript = self.transcript.clone();
                self.dispatch(FlowEvent::Submit { transcript }).await
            }
            SessionCommand::Tick { epoch } => self.dispatch(FlowEvent::Tick { epoch }).await,
            SessionCommand::ToggleCamera => {
                self.toggle_camera().await;
                vec![]
            }
            SessionCommand::ScoringDone(result) => {
                match result {
                    Ok(report) => self.report = Some(report),
                    Err(message) => self.push_notice(
                        NoticeLevel::Error,
                        format!("Report generation failed: {message}"),
                    ),
                }
                vec![]
            }
        }
    }

    /// Run the reducer, executing effects as they come. `CommitAnswer`
    /// produces a follow-up `AnswerCommitted` event handled in the same call.
    async fn dispatch(&mut self, first: FlowEvent) -> Vec<Deferred> {
        let mut deferred = Vec::new();
        let mut queue = VecDeque::from([first]);
        while let Some(event) = queue.pop_front() {
            let (next, effects) = flow::reduce(&self.policy, &self.state, event);
            self.state = next;
            for effect in effects {
                match effect {
                    FlowEffect::StartTicker { epoch } => {
                        deferred.push(Deferred::SpawnTicker { epoch });
                    }
                    FlowEffect::StopTicker => self.stop_ticker(),
                    FlowEffect::StopTranscription => self.transcription.stop().await,
                    FlowEffect::UpdateTranscript { text } => self.transcript = text,
                    FlowEffect::ClearTranscript => self.transcript.clear(),
                    FlowEffect::Notice { level, message } => self.push_notice(level, message),
                    FlowEffect::CommitAnswer { index, duration } => {
                        self.answers.push(Answer {
                            question: self.questions[index].clone(),
                            text: self.transcript.trim().to_string(),
                            duration_secs: duration,
                        });
                        let last = self.answers.len() == self.questions.len();
                        queue.push_back(FlowEvent::AnswerCommitted { last });
                    }
                    FlowEffect::Handoff => {
                        deferred.push(Deferred::SpawnScoring {
                            answers: self.answers.clone(),
                        });
                    }
                }
            }
        }
        deferred
    }

    /// Camera lifecycle is independent of question flow: toggling never
    /// touches the reducer.
    async fn toggle_camera(&mut self) {
        match self.camera_status {
            SourceStatus::Active => {
                self.camera.stop().await;
                self.camera_status = SourceStatus::Inactive;
            }
            _ => match self.camera.start().await {
                Ok(()) => self.camera_status = SourceStatus::Active,
                Err(reason) => {
                    self.camera_status = camera_status_for(reason);
                    self.push_notice(
                        NoticeLevel::Warning,
                        format!("Camera unavailable: {}", camera_failure_message(reason)),
                    );
                }
            },
        }
    }

    fn push_notice(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice {
            level,
            message: message.into(),
        });
    }

    pub fn set_ticker(&mut self, handle: JoinHandle<()>) {
        self.stop_ticker();
        self.ticker = Some(handle);
    }

    fn stop_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }

    /// Stop the ticker and both device sources. Called on session removal.
    pub async fn shutdown(&mut self) {
        self.stop_ticker();
        self.transcription.stop().await;
        if self.camera_status == SourceStatus::Active {
            self.camera.stop().await;
        }
        self.camera_status = SourceStatus::Inactive;
    }

    pub fn view(&self) -> SessionView {
        let current_index = match self.state {
            FlowState::AwaitingRecordingStart { index }
            | FlowState::Recording { index, .. }
            | FlowState::ReadyToSubmit { index, .. }
            | FlowState::Submitting { index } => Some(index),
            FlowState::NotStarted | FlowState::Finished => None,
        };
        SessionView {
            id: self.id,
            candidate: self.profile.name.clone(),
            state: self.state.clone(),
            question_count: self.questions.len(),
            current_question: current_index.and_then(|i| self.questions.get(i).cloned()),
            answered: self.answers.len(),
            transcript: self.transcript.clone(),
            camera: self.camera_status,
            notices: self.notices.clone(),
            report_ready: self.report.is_some(),
        }
    }
}

fn camera_status_for(reason: StartFailure) -> SourceStatus {
    match reason {
        StartFailure::PermissionDenied => SourceStatus::Denied,
        StartFailure::DeviceUnavailable => SourceStatus::Failed,
    }
}

fn camera_failure_message(reason: StartFailure) -> &'static str {
    match reason {
        StartFailure::PermissionDenied => "camera access was denied",
        StartFailure::DeviceUnavailable => "the camera is unavailable",
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}

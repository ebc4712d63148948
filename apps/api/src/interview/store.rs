//! In-memory session registry.
//!
//! Sessions live behind `Arc<Mutex<_>>` so the per-second ticker tasks and
//! the scoring task can feed events back through the store while HTTP
//! handlers hold their own references. All mutation goes through one command
//! path per session; the mutex is the single-writer guarantee.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::flow::FlowPolicy;
use crate::interview::session::{Deferred, Session, SessionCommand, SessionView};
use crate::interview::sources::{RelayCamera, RelayTranscription};
use crate::models::{Profile, Question, Report};
use crate::scoring::Scorer;

pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Arc<Mutex<Session>>>>,
    scorer: Arc<dyn Scorer>,
    policy: FlowPolicy,
}

impl SessionStore {
    pub fn new(policy: FlowPolicy, scorer: Arc<dyn Scorer>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            scorer,
            policy,
        }
    }

    pub async fn create(
        &self,
        profile: Profile,
        questions: Vec<Question>,
        video_requested: bool,
    ) -> SessionView {
        let session = Session::new(
            profile,
            questions,
            video_requested,
            self.policy,
            Arc::new(RelayTranscription),
            Arc::new(RelayCamera),
        );
        let id = session.id;
        let view = session.view();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(session)));
        debug!(session_id = %id, "session created");
        view
    }

    /// Apply a client command and return the updated view. Deferred actions
    /// (ticker, scoring) are spawned here; the tasks they run feed internal
    /// commands back through [`Self::deliver`], which never spawns.
    pub async fn apply(
        self: &Arc<Self>,
        id: Uuid,
        command: SessionCommand,
    ) -> Result<SessionView, AppError> {
        let session = self.get(id).await?;
        let mut guard = session.lock().await;
        let deferred = guard.apply(command).await;
        for action in deferred {
            match action {
                Deferred::SpawnTicker { epoch } => {
                    let store = Arc::clone(self);
                    let handle = tokio::spawn(async move {
                        loop {
                            tokio::time::sleep(Duration::from_secs(1)).await;
                            store.deliver(id, SessionCommand::Tick { epoch }).await;
                        }
                    });
                    guard.set_ticker(handle);
                }
                Deferred::SpawnScoring { answers } => {
                    let store = Arc::clone(self);
                    let scorer = Arc::clone(&self.scorer);
                    tokio::spawn(async move {
                        let result = scorer
                            .score(&answers)
                            .await
                            .map_err(|err| err.to_string());
                        if let Err(message) = &result {
                            warn!(session_id = %id, error = %message, "scoring failed");
                        }
                        store
                            .deliver(id, SessionCommand::ScoringDone(result))
                            .await;
                    });
                }
            }
        }
        Ok(guard.view())
    }

    /// Internal command delivery for spawned tasks. Ticks and scoring results
    /// never produce deferred actions, so this path does not spawn and the
    /// task futures stay finitely sized.
    async fn deliver(&self, id: Uuid, command: SessionCommand) {
        let session = { self.sessions.read().await.get(&id).cloned() };
        if let Some(session) = session {
            let deferred = session.lock().await.apply(command).await;
            debug_assert!(deferred.is_empty());
        }
    }

    pub async fn view(&self, id: Uuid) -> Result<SessionView, AppError> {
        Ok(self.get(id).await?.lock().await.view())
    }

    /// The report once scoring has completed; 409 material until then.
    pub async fn report(&self, id: Uuid) -> Result<Report, AppError> {
        let session = self.get(id).await?;
        let guard = session.lock().await;
        guard.report.clone().ok_or(AppError::ReportNotReady)
    }

    /// Tear the session down: abort its ticker, release its sources, forget
    /// it. Answers and report go with it.
    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let session = self
            .sessions
            .write()
            .await
            .remove(&id)
            .ok_or(AppError::SessionNotFound(id))?;
        session.lock().await.shutdown().await;
        debug!(session_id = %id, "session removed");
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Arc<Mutex<Session>>, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(AppError::SessionNotFound(id))
    }
}

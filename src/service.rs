//! Dispatcher task
//!
//! Events may be posted from many concurrent HTTP requests, but the registry
//! must be mutated serially and in arrival order. All writes therefore go
//! through one queue drained by a single task.

use crate::error::AppError;
use crate::events::StreamEvent;
use crate::state::AppState;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Work item for the dispatcher task
#[derive(Debug, Clone)]
pub enum TrackerCommand {
    /// Apply one stream event
    Event(StreamEvent),
    /// Reset every record for a new session
    ResetSession,
}

/// Handle for submitting work to the dispatcher task
#[derive(Debug, Clone)]
pub struct EventQueue {
    tx: mpsc::Sender<TrackerCommand>,
}

impl EventQueue {
    /// Queue one event
    ///
    /// # Returns
    /// * `Ok(())` - the event will be applied after every earlier submission
    /// * `Err(AppError::QueueClosed)` - the dispatcher task has stopped
    pub async fn submit(&self, event: StreamEvent) -> Result<(), AppError> {
        self.send(TrackerCommand::Event(event)).await
    }

    /// Queue a session reset behind every earlier submission
    pub async fn reset_session(&self) -> Result<(), AppError> {
        self.send(TrackerCommand::ResetSession).await
    }

    async fn send(&self, command: TrackerCommand) -> Result<(), AppError> {
        self.tx
            .send(command)
            .await
            .map_err(|_| AppError::QueueClosed)
    }
}

/// Shared state handed to HTTP handlers
#[derive(Clone)]
pub struct ServiceState {
    /// Tracker state, read by handlers and written only by the dispatcher task
    pub app: Arc<RwLock<AppState>>,
    /// Intake for events and session commands
    pub events: EventQueue,
}

impl ServiceState {
    /// Spawn the dispatcher task over `app` and bundle the handles
    pub fn start(app: Arc<RwLock<AppState>>, queue_capacity: usize) -> (Self, JoinHandle<()>) {
        let (events, handle) = spawn_dispatcher(app.clone(), queue_capacity);
        (Self { app, events }, handle)
    }
}

/// Spawn the single task that applies queued commands to `state`
///
/// The task runs until every [`EventQueue`] clone has been dropped.
pub fn spawn_dispatcher(
    state: Arc<RwLock<AppState>>,
    capacity: usize,
) -> (EventQueue, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::channel(capacity.max(1));

    let handle = tokio::spawn(async move {
        info!("Dispatcher task started");
        while let Some(command) = rx.recv().await {
            let mut state = state.write().await;
            match command {
                TrackerCommand::Event(event) => {
                    debug!(agent = %event.agent, kind = ?event.kind, "Applying event");
                    state.apply_event(&event);
                }
                TrackerCommand::ResetSession => {
                    info!("Resetting session");
                    state.reset_session();
                }
            }
        }
        info!("Dispatcher task stopped");
    });

    (EventQueue { tx }, handle)
}

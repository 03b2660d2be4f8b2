//! Generic orchestration loop.
//!
//! The runtime owns the [`App`] and is the only context that mutates it.
//! Backend calls run on spawned tasks and never touch the App; their results
//! are posted back over an mpsc channel and applied here, between user
//! inputs, so completions cannot interleave with a field edit.
//!
//! The runtime also joins the in-flight task. A task that dies without
//! posting a result (a panicking backend) is reported to the App as a
//! transport failure, so the busy flag is cleared on every exit path.
//!
//! ```text
//!   Driver::poll_event ──┐
//!                        ├──> App::handle ──> actions ──┬── Render ──> Driver::render
//!   completions (mpsc) ──┘                              └── Submit ──> spawn(backend.submit)
//!          ▲                                                                    │
//!          └────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::pending;

use formgate_proto::{AuthRequest, SubmitFailure, SubmitResult};
use tokio::{
    sync::mpsc,
    task::{JoinError, JoinHandle},
};
use tracing::{debug, warn};

use crate::{App, AppAction, AppEvent, AuthBackend, Driver, RuntimeError};

/// Drives an [`App`] with a [`Driver`] until the app quits.
pub struct Runtime<D: Driver> {
    driver: D,
    app: App,
    completions_tx: mpsc::UnboundedSender<SubmitResult>,
    completions_rx: mpsc::UnboundedReceiver<SubmitResult>,
    in_flight: Option<JoinHandle<()>>,
}

impl<D: Driver> Runtime<D> {
    /// Create a runtime over `app`.
    pub fn new(driver: D, app: App) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self { driver, app, completions_tx, completions_rx, in_flight: None }
    }

    /// Run until the app emits [`AppAction::Quit`] and return its final state.
    ///
    /// Must be called from within a tokio runtime. On quit or driver failure
    /// a submission still in flight is aborted and the driver is stopped.
    pub async fn run(mut self) -> Result<App, RuntimeError<D::Error>> {
        let outcome = self.event_loop().await;
        self.shutdown();
        outcome.map(|()| self.app)
    }

    async fn event_loop(&mut self) -> Result<(), RuntimeError<D::Error>> {
        self.driver.render(&self.app).map_err(RuntimeError::Driver)?;

        loop {
            let events = tokio::select! {
                biased;
                Some(result) = self.completions_rx.recv() => vec![AppEvent::Completed(result)],
                joined = join_in_flight(&mut self.in_flight) => self.task_exited(joined),
                polled = self.driver.poll_event(&self.app) => polled.map_err(RuntimeError::Driver)?,
            };

            for event in events {
                if !self.process(event)? {
                    return Ok(());
                }
            }
        }
    }

    /// Apply one event. Returns `false` once the app asked to quit.
    fn process(&mut self, event: AppEvent) -> Result<bool, RuntimeError<D::Error>> {
        for action in self.app.handle(event) {
            match action {
                AppAction::Render => self.driver.render(&self.app).map_err(RuntimeError::Driver)?,
                AppAction::Submit { request } => self.dispatch(request),
                AppAction::Quit => return Ok(false),
            }
        }
        Ok(true)
    }

    fn dispatch(&mut self, request: AuthRequest) {
        let backend = self.driver.backend();
        let completions = self.completions_tx.clone();
        debug!(endpoint = %request.endpoint(), "dispatching submission");

        let task = tokio::spawn(async move {
            let result = backend.submit(request).await;
            if completions.send(result).is_err() {
                debug!("runtime stopped before submission completed");
            }
        });

        if let Some(previous) = self.in_flight.replace(task) {
            previous.abort();
        }
    }

    /// Forget the finished task; synthesize a completion if it died.
    ///
    /// A task that finished normally already queued its result, which the
    /// biased select delivers on the next iteration.
    fn task_exited(&mut self, joined: Result<(), JoinError>) -> Vec<AppEvent> {
        self.in_flight = None;
        match joined {
            Ok(()) => Vec::new(),
            Err(error) if error.is_cancelled() => Vec::new(),
            Err(error) => {
                warn!(%error, "submission task died without a result");
                vec![AppEvent::Completed(Err(SubmitFailure::Transport(
                    "submission task failed".to_string(),
                )))]
            },
        }
    }

    fn shutdown(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
        self.driver.stop();
    }
}

/// Resolves when the in-flight task exits; pending while there is none.
async fn join_in_flight(task: &mut Option<JoinHandle<()>>) -> Result<(), JoinError> {
    match task {
        Some(handle) => handle.await,
        None => pending().await,
    }
}

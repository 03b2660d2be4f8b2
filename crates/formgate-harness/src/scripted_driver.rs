//! Scripted driver.
//!
//! Feeds a fixed queue of [`AppEvent`]s to the runtime, one per poll, and
//! records a [`Frame`] each time the app renders. While a submission is in
//! flight the driver yields nothing, modelling a user waiting on the busy
//! indicator, unless built with [`ScriptedDriver::with_busy_input`]. Once the
//! script is exhausted it asks the app to quit.

use std::{
    collections::VecDeque,
    future::{Future, pending},
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
};

use formgate_app::{App, AppEvent, AuthBackend, Driver, FieldKey, Notice, Screen};
use thiserror::Error;

use crate::MemoryBackend;

/// Upper bound on renders before the script is considered runaway.
const DEFAULT_MAX_FRAMES: usize = 1024;

/// Snapshot of what the app displayed on one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Active screen
    pub screen: Screen,
    /// Busy indicator
    pub busy: bool,
    /// Notice shown, if any
    pub notice: Option<Notice>,
    /// Field errors on the active screen
    pub errors: Vec<(FieldKey, String)>,
}

impl Frame {
    fn capture(app: &App) -> Self {
        Self {
            screen: app.screen(),
            busy: app.is_busy(),
            notice: app.notice().cloned(),
            errors: app.errors(),
        }
    }
}

/// Errors raised by [`ScriptedDriver`].
#[derive(Debug, Error)]
pub enum ScriptError {
    /// More renders than the configured budget.
    #[error("render budget of {0} frames exhausted")]
    RenderBudget(usize),
}

#[derive(Debug, Default)]
struct Recording {
    frames: Mutex<Vec<Frame>>,
    stopped: AtomicBool,
}

/// Driver that replays a fixed event script.
#[derive(Debug)]
pub struct ScriptedDriver<B = MemoryBackend> {
    script: VecDeque<AppEvent>,
    backend: B,
    recording: Arc<Recording>,
    max_frames: usize,
    busy_input: bool,
}

impl<B> ScriptedDriver<B> {
    /// Create a driver that replays `script` against `backend`.
    pub fn new(backend: B, script: impl IntoIterator<Item = AppEvent>) -> Self {
        Self {
            script: script.into_iter().collect(),
            backend,
            recording: Arc::default(),
            max_frames: DEFAULT_MAX_FRAMES,
            busy_input: false,
        }
    }

    /// Fail rendering after `max` frames.
    #[must_use]
    pub fn with_max_frames(mut self, max: usize) -> Self {
        self.max_frames = max;
        self
    }

    /// Keep feeding events while a submission is in flight.
    #[must_use]
    pub fn with_busy_input(mut self) -> Self {
        self.busy_input = true;
        self
    }

    /// Handle to what the driver recorded, usable after the runtime consumed
    /// the driver.
    pub fn frames(&self) -> FrameLog {
        FrameLog(Arc::clone(&self.recording))
    }
}

/// Shared view of what a [`ScriptedDriver`] recorded.
#[derive(Debug, Clone)]
pub struct FrameLog(Arc<Recording>);

impl FrameLog {
    /// Copy of every frame recorded so far.
    pub fn snapshot(&self) -> Vec<Frame> {
        self.0.frames.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Most recent frame.
    pub fn last(&self) -> Option<Frame> {
        self.0.frames.lock().unwrap_or_else(PoisonError::into_inner).last().cloned()
    }

    /// Whether the runtime stopped the driver.
    pub fn stopped(&self) -> bool {
        self.0.stopped.load(Ordering::Acquire)
    }
}

impl<B> Driver for ScriptedDriver<B>
where
    B: AuthBackend + Clone + 'static,
{
    type Error = ScriptError;
    type Backend = B;

    fn poll_event(
        &mut self,
        app: &App,
    ) -> impl Future<Output = Result<Vec<AppEvent>, Self::Error>> + Send {
        let wait = app.is_busy() && !self.busy_input;
        async move {
            if wait {
                return pending::<Result<Vec<AppEvent>, ScriptError>>().await;
            }
            // Popped only once polled, so a completion winning the race
            // never loses a scripted event.
            Ok(vec![self.script.pop_front().unwrap_or(AppEvent::Quit)])
        }
    }

    fn backend(&self) -> Self::Backend {
        self.backend.clone()
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        let mut frames = self.recording.frames.lock().unwrap_or_else(PoisonError::into_inner);
        if frames.len() >= self.max_frames {
            return Err(ScriptError::RenderBudget(self.max_frames));
        }
        frames.push(Frame::capture(app));
        Ok(())
    }

    fn stop(&mut self) {
        self.recording.stopped.store(true, Ordering::Release);
    }
}
